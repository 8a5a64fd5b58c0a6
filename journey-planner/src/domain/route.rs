//! Route type.
//!
//! A `Route` is the ordered list of stations a vehicle line follows.
//! Stop numbers are 1-based, matching how timetables number their stops.

use std::collections::HashSet;
use std::fmt;

use super::{DomainError, Station};

/// An ordered, duplicate-free sequence of at least two stations.
///
/// Routes compare structurally (name and stops), so they can key the
/// timetable map.
///
/// # Invariants
///
/// - Name is non-empty
/// - At least two stops
/// - No stop appears twice
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Route {
    name: String,
    stops: Vec<Station>,
}

impl Route {
    /// Construct a route, validating its invariants.
    ///
    /// # Errors
    ///
    /// - `MissingInput` if the name is empty
    /// - `InvalidRoute` if there are fewer than two stops or a stop repeats
    ///
    /// # Examples
    ///
    /// ```
    /// use journey_planner::domain::{Route, Station};
    ///
    /// let a = Station::new("A").unwrap();
    /// let b = Station::new("B").unwrap();
    /// let route = Route::new("R1", vec![a.clone(), b.clone()]).unwrap();
    ///
    /// assert_eq!(route.num_stops(), 2);
    /// assert!(route.can_travel_from(&a, &b));
    /// assert!(!route.can_travel_from(&b, &a));
    /// ```
    pub fn new(name: impl Into<String>, stops: Vec<Station>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::MissingInput("route name"));
        }
        if stops.len() < 2 {
            return Err(DomainError::InvalidRoute(format!(
                "route {name} must have at least 2 stops, got {}",
                stops.len()
            )));
        }
        if let Some(dup) = first_duplicate(&stops) {
            return Err(DomainError::InvalidRoute(format!(
                "route {name} stops at {dup} more than once"
            )));
        }

        Ok(Route { name, stops })
    }

    /// Returns the route name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the stops in travel order.
    pub fn stops(&self) -> &[Station] {
        &self.stops
    }

    /// Returns the number of stops.
    pub fn num_stops(&self) -> usize {
        self.stops.len()
    }

    /// Does this route stop at the station?
    pub fn stops_at(&self, station: &Station) -> bool {
        self.stops.contains(station)
    }

    /// Returns the 1-based stop number of a station.
    pub fn stop_number(&self, station: &Station) -> Result<usize, DomainError> {
        self.stops
            .iter()
            .position(|s| s == station)
            .map(|i| i + 1)
            .ok_or_else(|| {
                DomainError::NoSuchStop(format!("{station} is not on route {}", self.name))
            })
    }

    /// Returns the station at a 1-based stop number.
    pub fn stop(&self, number: usize) -> Result<&Station, DomainError> {
        number
            .checked_sub(1)
            .and_then(|i| self.stops.get(i))
            .ok_or_else(|| {
                DomainError::NoSuchStop(format!(
                    "stop number {number} does not exist on route {}",
                    self.name
                ))
            })
    }

    /// Returns the stop after `station`, or `None` if it is the final stop.
    pub fn next_stop(&self, station: &Station) -> Result<Option<&Station>, DomainError> {
        let number = self.stop_number(station)?;
        Ok(self.stops.get(number))
    }

    /// Is `station` the final stop of this route?
    pub fn is_last_stop(&self, station: &Station) -> bool {
        self.stops.last() == Some(station)
    }

    /// Can a traveller ride from `from` to `to` on this route?
    ///
    /// True iff both stations are on the route, they differ, and `from`
    /// comes before `to`. Stations not on the route simply can't be
    /// travelled between.
    pub fn can_travel_from(&self, from: &Station, to: &Station) -> bool {
        if from == to {
            return false;
        }
        match (self.stop_number(from), self.stop_number(to)) {
            (Ok(a), Ok(b)) => a < b,
            _ => false,
        }
    }

    /// Re-check the structural invariants.
    ///
    /// Always true for a route built through [`Route::new`]; exists so tests
    /// can catch corruption introduced by later changes.
    pub fn check_invariant(&self) -> bool {
        !self.name.is_empty() && self.stops.len() >= 2 && first_duplicate(&self.stops).is_none()
    }
}

fn first_duplicate(stops: &[Station]) -> Option<&Station> {
    let mut seen = HashSet::with_capacity(stops.len());
    stops.iter().find(|s| !seen.insert(*s))
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        for (i, stop) in self.stops.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{stop}")?;
        }
        Ok(())
    }
}
