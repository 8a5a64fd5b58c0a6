//! Scheduled service type.
//!
//! A `Service` is one timetabled run of a route: a time at every stop,
//! in the route's order. Many services share one `Arc<Route>`.

use std::fmt;
use std::sync::Arc;

use super::{DomainError, Route, Station};

/// A timetable time. Units are whatever the timetable uses (minutes in
/// practice); the planner only relies on ordering and subtraction.
pub type Time = i64;

/// One scheduled run of a [`Route`].
///
/// # Invariants
///
/// - Exactly one time per route stop
/// - Times are non-negative and strictly ascending
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Service {
    route: Arc<Route>,
    times: Vec<Time>,
}

impl Service {
    /// Construct a service, validating its times against the route.
    ///
    /// # Errors
    ///
    /// Returns `InvalidService` if the number of times differs from the
    /// number of stops, or the times are not strictly ascending, or any
    /// time is negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use journey_planner::domain::{Route, Service, Station};
    ///
    /// let a = Station::new("A").unwrap();
    /// let b = Station::new("B").unwrap();
    /// let route = Arc::new(Route::new("R1", vec![a.clone(), b.clone()]).unwrap());
    ///
    /// let service = Service::new(route.clone(), vec![0, 10]).unwrap();
    /// assert_eq!(service.stop_time_at(&b).unwrap(), 10);
    ///
    /// assert!(Service::new(route.clone(), vec![10, 10]).is_err());
    /// assert!(Service::new(route, vec![0]).is_err());
    /// ```
    pub fn new(route: Arc<Route>, times: Vec<Time>) -> Result<Self, DomainError> {
        check_times(&route, &times).map_err(DomainError::InvalidService)?;
        Ok(Service { route, times })
    }

    /// Returns the route this service runs.
    pub fn route(&self) -> &Arc<Route> {
        &self.route
    }

    /// Returns the times, one per stop in route order.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// Returns the time at a 1-based stop number.
    pub fn stop_time(&self, number: usize) -> Result<Time, DomainError> {
        number
            .checked_sub(1)
            .and_then(|i| self.times.get(i))
            .copied()
            .ok_or_else(|| {
                DomainError::NoSuchStop(format!(
                    "stop number {number} does not exist on route {}",
                    self.route.name()
                ))
            })
    }

    /// Returns the time this service is at `station`.
    pub fn stop_time_at(&self, station: &Station) -> Result<Time, DomainError> {
        self.stop_time(self.route.stop_number(station)?)
    }

    /// Returns the departure time from the route's first stop.
    pub fn first_departure(&self) -> Time {
        // Safe: a route has at least two stops and times match stops
        self.times[0]
    }

    /// Can a traveller ready at time `t` ride this service from `from` to `to`?
    ///
    /// True iff the route allows `from` → `to` and the service leaves
    /// `from` no earlier than `t`.
    pub fn can_travel_from(&self, from: &Station, to: &Station, t: Time) -> bool {
        self.route.can_travel_from(from, to)
            && self.stop_time_at(from).is_ok_and(|dep| dep >= t)
    }

    /// Re-check the structural invariants.
    pub fn check_invariant(&self) -> bool {
        self.route.check_invariant() && check_times(&self.route, &self.times).is_ok()
    }
}

fn check_times(route: &Route, times: &[Time]) -> Result<(), String> {
    if times.len() != route.num_stops() {
        return Err(format!(
            "{} times given for the {} stops of route {}",
            times.len(),
            route.num_stops(),
            route.name()
        ));
    }
    if let Some(t) = times.iter().find(|t| **t < 0) {
        return Err(format!("negative time {t}"));
    }
    if let Some(pair) = times.windows(2).find(|w| w[1] <= w[0]) {
        return Err(format!(
            "times must be strictly ascending, but {} is followed by {}",
            pair[0], pair[1]
        ));
    }
    Ok(())
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.route.name())?;
        for (i, (stop, time)) in self.route.stops().iter().zip(&self.times).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{stop} {time}")?;
        }
        Ok(())
    }
}
