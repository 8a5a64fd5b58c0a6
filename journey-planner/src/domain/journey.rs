//! Journey type.
//!
//! A `Journey` is a traveller's itinerary: a non-empty chain of legs where
//! each leg boards where the previous one alighted, no earlier than it
//! arrived. Journeys grow in place through [`Journey::extend_journey`];
//! take a `clone()` first when the pre-extension journey is still needed.

use std::fmt;
use std::sync::Arc;

use super::{DomainError, Leg, Service, Station, Time};

/// A complete journey from origin to destination.
///
/// # Invariants
///
/// - At least one leg
/// - Consecutive legs connect (end station of one = start of the next)
/// - Each leg after the first departs no earlier than its predecessor arrives
/// - No two adjacent legs ride the same service (they are merged instead)
/// - `total_travel_time == last.end_time - first.start_time`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journey {
    legs: Vec<Leg>,
    total_travel_time: Time,
}

impl Journey {
    /// Creates a single-leg journey from `start` to `end` on `service`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidJourneySegment` if the service's route cannot be used
    /// to travel from `start` to `end` (including when they are equal).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use journey_planner::domain::{Journey, Route, Service, Station};
    ///
    /// let a = Station::new("A").unwrap();
    /// let b = Station::new("B").unwrap();
    /// let c = Station::new("C").unwrap();
    /// let route = Arc::new(Route::new("R1", vec![a.clone(), b.clone(), c.clone()]).unwrap());
    /// let service = Arc::new(Service::new(route, vec![0, 10, 20]).unwrap());
    ///
    /// let mut journey = Journey::new(a, b, service.clone()).unwrap();
    /// journey.extend_journey(service, c).unwrap();
    ///
    /// // Same service: merged into one leg
    /// assert_eq!(journey.legs().len(), 1);
    /// assert_eq!(journey.transfers(), 0);
    /// assert_eq!(journey.total_travel_time(), 20);
    /// ```
    pub fn new(start: Station, end: Station, service: Arc<Service>) -> Result<Self, DomainError> {
        Ok(Journey::from_leg(Leg::new(start, end, service)?))
    }

    /// Creates a single-leg journey from an existing leg.
    pub fn from_leg(leg: Leg) -> Self {
        let total_travel_time = leg.duration();
        Journey {
            legs: vec![leg],
            total_travel_time,
        }
    }

    /// Extends the journey to `next` using `service`.
    ///
    /// If the last leg already rides `service`, that leg is replaced by one
    /// from its original start to `next`. Otherwise a new leg from the
    /// current end station is appended.
    ///
    /// # Errors
    ///
    /// Returns `InvalidJourneySegment`, leaving the journey untouched, if
    /// `service` cannot take the traveller from the current end station to
    /// `next` departing no earlier than the current end time (this includes
    /// `next` being the current end station).
    pub fn extend_journey(
        &mut self,
        service: Arc<Service>,
        next: Station,
    ) -> Result<(), DomainError> {
        let last = self.last_leg();

        if !service.can_travel_from(last.end_station(), &next, last.end_time()) {
            return Err(DomainError::InvalidJourneySegment(format!(
                "cannot use route {} to travel from {} to {next} departing at or after {}",
                service.route().name(),
                last.end_station(),
                last.end_time()
            )));
        }

        if *last.service() == service {
            let merged = Leg::new(last.start_station().clone(), next, service)?;
            let idx = self.legs.len() - 1;
            self.legs[idx] = merged;
        } else {
            let leg = Leg::new(last.end_station().clone(), next, service)?;
            self.legs.push(leg);
        }

        self.total_travel_time = self.end_time() - self.start_time();
        Ok(())
    }

    /// Returns all legs in order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Returns an iterator over the legs, in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Leg> {
        self.legs.iter()
    }

    fn first_leg(&self) -> &Leg {
        // Safe: non-empty by construction
        &self.legs[0]
    }

    fn last_leg(&self) -> &Leg {
        // Safe: non-empty by construction
        &self.legs[self.legs.len() - 1]
    }

    /// Returns the origin station.
    pub fn start_station(&self) -> &Station {
        self.first_leg().start_station()
    }

    /// Returns the destination station.
    pub fn end_station(&self) -> &Station {
        self.last_leg().end_station()
    }

    /// Returns the departure time of the first leg.
    pub fn start_time(&self) -> Time {
        self.first_leg().start_time()
    }

    /// Returns the arrival time of the last leg.
    pub fn end_time(&self) -> Time {
        self.last_leg().end_time()
    }

    /// Returns the number of transfers (legs - 1).
    pub fn transfers(&self) -> usize {
        self.legs.len() - 1
    }

    /// Returns the time from first departure to final arrival.
    pub fn total_travel_time(&self) -> Time {
        self.total_travel_time
    }

    /// Returns the stations where the traveller changes service, in order.
    ///
    /// Interchange `k` is the end station of leg `k`; the final leg's end
    /// station is the destination and not an interchange.
    pub fn interchange_stations(&self) -> Vec<&Station> {
        self.legs
            .iter()
            .take(self.transfers())
            .map(Leg::end_station)
            .collect()
    }

    /// Returns the time the journey leaves interchange `k`, i.e. the start
    /// time of leg `k + 1`. `None` if `k` is not an interchange.
    pub fn interchange_departure(&self, k: usize) -> Option<Time> {
        if k >= self.transfers() {
            return None;
        }
        self.legs.get(k + 1).map(Leg::start_time)
    }

    /// Re-check the structural invariants.
    pub fn check_invariant(&self) -> bool {
        let (Some(first), Some(last)) = (self.legs.first(), self.legs.last()) else {
            return false;
        };

        if self.total_travel_time != last.end_time() - first.start_time()
            || self.total_travel_time < 0
        {
            return false;
        }

        if !first
            .service()
            .route()
            .can_travel_from(first.start_station(), first.end_station())
        {
            return false;
        }

        let legs_valid = self.legs.iter().all(Leg::check_invariant);

        let chain_valid = self.legs.windows(2).all(|w| {
            let (prev, leg) = (&w[0], &w[1]);
            prev.end_station() == leg.start_station()
                && prev.service() != leg.service()
                && leg
                    .service()
                    .can_travel_from(leg.start_station(), leg.end_station(), prev.end_time())
        });

        legs_valid && chain_valid
    }
}

impl<'a> IntoIterator for &'a Journey {
    type Item = &'a Leg;
    type IntoIter = std::slice::Iter<'a, Leg>;

    fn into_iter(self) -> Self::IntoIter {
        self.legs.iter()
    }
}

impl fmt::Display for Journey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Total travel time: {}\tTransfers: {}",
            self.total_travel_time,
            self.transfers()
        )?;
        for leg in &self.legs {
            writeln!(f, "{leg}")?;
        }
        Ok(())
    }
}
