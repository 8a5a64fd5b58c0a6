//! Journey leg type.
//!
//! A `Leg` is one uninterrupted ride on a single service. It holds the
//! service as `Arc<Service>` so that cloning legs during search is cheap.

use std::fmt;
use std::sync::Arc;

use super::{DomainError, Service, Station, Time};

/// A leg of a journey (one service, board to alight).
///
/// Times are validated at construction to guarantee `start_time()` and
/// `end_time()` never fail.
///
/// # Invariants
///
/// - The service's route can travel from `start` to `end`
/// - `start_time < end_time`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Leg {
    start: Station,
    end: Station,
    service: Arc<Service>,
    // Cached validated times (guaranteed present - validated at construction)
    start_time: Time,
    end_time: Time,
}

impl Leg {
    /// Construct a leg, validating that the service's route goes from
    /// `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidJourneySegment` if the route does not stop at both
    /// stations, or `end` is not after `start` (including `start == end`).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use journey_planner::domain::{Leg, Route, Service, Station};
    ///
    /// let a = Station::new("A").unwrap();
    /// let b = Station::new("B").unwrap();
    /// let route = Arc::new(Route::new("R1", vec![a.clone(), b.clone()]).unwrap());
    /// let service = Arc::new(Service::new(route, vec![0, 10]).unwrap());
    ///
    /// let leg = Leg::new(a.clone(), b.clone(), service.clone()).unwrap();
    /// assert_eq!(leg.to_string(), "0 - 10: catch route R1 from A to B");
    ///
    /// assert!(Leg::new(b, a, service).is_err());
    /// ```
    pub fn new(start: Station, end: Station, service: Arc<Service>) -> Result<Self, DomainError> {
        if !service.route().can_travel_from(&start, &end) {
            return Err(DomainError::InvalidJourneySegment(format!(
                "cannot travel from {start} to {end} using route {}",
                service.route().name()
            )));
        }

        let start_time = service.stop_time_at(&start)?;
        let end_time = service.stop_time_at(&end)?;

        Ok(Leg {
            start,
            end,
            service,
            start_time,
            end_time,
        })
    }

    /// Returns the boarding station.
    pub fn start_station(&self) -> &Station {
        &self.start
    }

    /// Returns the alighting station.
    pub fn end_station(&self) -> &Station {
        &self.end
    }

    /// Returns the service this leg rides.
    pub fn service(&self) -> &Arc<Service> {
        &self.service
    }

    /// Returns the departure time from the boarding station.
    pub fn start_time(&self) -> Time {
        self.start_time
    }

    /// Returns the arrival time at the alighting station.
    pub fn end_time(&self) -> Time {
        self.end_time
    }

    /// Returns the time spent on board.
    pub fn duration(&self) -> Time {
        self.end_time - self.start_time
    }

    /// Returns every stop this leg calls at with its time, boarding and
    /// alighting stops included.
    pub fn calls(&self) -> Vec<(&Station, Time)> {
        let route = self.service.route();
        let (Ok(from), Ok(to)) = (route.stop_number(&self.start), route.stop_number(&self.end))
        else {
            return Vec::new();
        };
        // Safe: 1 <= from < to <= num_stops, validated at construction
        route.stops()[from - 1..to]
            .iter()
            .zip(&self.service.times()[from - 1..to])
            .map(|(station, time)| (station, *time))
            .collect()
    }

    /// Returns the route name, for display.
    pub fn route_name(&self) -> &str {
        self.service.route().name()
    }

    /// Re-check the structural invariants.
    pub fn check_invariant(&self) -> bool {
        self.service.check_invariant()
            && self.service.route().can_travel_from(&self.start, &self.end)
            && self.service.stop_time_at(&self.start) == Ok(self.start_time)
            && self.service.stop_time_at(&self.end) == Ok(self.end_time)
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}: catch route {} from {} to {}",
            self.start_time,
            self.end_time,
            self.route_name(),
            self.start,
            self.end
        )
    }
}
