//! The timetable: every route and the services that run it.
//!
//! A `Timetable` is built once (usually by [`reader::read_timetable`]) and
//! then shared read-only by any number of searches. Services are checked
//! as they are added so the planner can rely on two properties per route:
//! no two services leave the first stop at the same time, and a service
//! that leaves earlier is earlier at every stop (no overtaking).

mod error;
pub mod reader;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::trace;

use crate::domain::{Route, Service, Station};

pub use error::{ReadError, TimetableError};
pub use reader::{parse_timetable, read_timetable};

/// Routes mapped to their services, in the order the services were added.
///
/// Iteration is in route order (by name, then stops) so searches over the
/// same timetable always visit routes in the same order.
#[derive(Debug, Clone, Default)]
pub struct Timetable {
    routes: BTreeMap<Arc<Route>, Vec<Arc<Service>>>,
}

impl Timetable {
    /// Create an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route with no services yet.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateRoute` if a route with the same name is already
    /// registered.
    pub fn add_route(&mut self, route: Arc<Route>) -> Result<(), TimetableError> {
        if self.routes.keys().any(|r| r.name() == route.name()) {
            return Err(TimetableError::DuplicateRoute(route.name().to_string()));
        }
        self.routes.insert(route, Vec::new());
        Ok(())
    }

    /// Add a service to its (already registered) route.
    ///
    /// # Errors
    ///
    /// - `UnknownRoute` if the service's route was never added
    /// - `DuplicateDeparture` if another service on the route leaves the
    ///   first stop at the same time
    /// - `Overtaking` if the new service and an existing one are not
    ///   strictly ordered at every stop
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use journey_planner::domain::{Route, Service, Station};
    /// use journey_planner::timetable::Timetable;
    ///
    /// let a = Station::new("A").unwrap();
    /// let b = Station::new("B").unwrap();
    /// let route = Arc::new(Route::new("R1", vec![a, b]).unwrap());
    ///
    /// let mut timetable = Timetable::new();
    /// timetable.add_route(route.clone()).unwrap();
    /// timetable.add_service(Service::new(route.clone(), vec![0, 10]).unwrap()).unwrap();
    ///
    /// // Leaves later but arrives earlier
    /// let overtaker = Service::new(route, vec![5, 8]).unwrap();
    /// assert!(timetable.add_service(overtaker).is_err());
    /// ```
    pub fn add_service(&mut self, service: Service) -> Result<Arc<Service>, TimetableError> {
        let route_name = service.route().name().to_string();
        let existing = self
            .routes
            .get_mut(service.route().as_ref())
            .ok_or_else(|| TimetableError::UnknownRoute(route_name.clone()))?;

        for other in existing.iter() {
            check_pair(&route_name, other, &service)?;
        }

        trace!(route = %route_name, departs = service.first_departure(), "adding service");
        let service = Arc::new(service);
        existing.push(Arc::clone(&service));
        Ok(service)
    }

    /// Returns the registered routes, in route order.
    pub fn routes(&self) -> impl Iterator<Item = &Arc<Route>> {
        self.routes.keys()
    }

    /// Returns the services of a route in the order they were added, or an
    /// empty slice if the route is not registered.
    pub fn services(&self, route: &Route) -> &[Arc<Service>] {
        self.routes.get(route).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over `(route, services)` pairs in route order.
    pub fn iter(&self) -> impl Iterator<Item = (&Arc<Route>, &[Arc<Service>])> {
        self.routes.iter().map(|(r, s)| (r, s.as_slice()))
    }

    /// Iterate over the routes stopping at `station`, with their services.
    pub fn routes_through<'a>(
        &'a self,
        station: &'a Station,
    ) -> impl Iterator<Item = (&'a Arc<Route>, &'a [Arc<Service>])> + 'a {
        self.iter().filter(move |(route, _)| route.stops_at(station))
    }

    /// Returns every station served by some route, sorted by name.
    pub fn stations(&self) -> Vec<Station> {
        self.routes
            .keys()
            .flat_map(|r| r.stops().iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Does any route stop at `station`?
    pub fn contains_station(&self, station: &Station) -> bool {
        self.routes.keys().any(|r| r.stops_at(station))
    }

    /// Returns the number of routes.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Returns the number of services across all routes.
    pub fn service_count(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }

    /// Is the timetable free of routes?
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Two services of one route must be strictly ordered at every stop.
fn check_pair(route: &str, a: &Service, b: &Service) -> Result<(), TimetableError> {
    let (earlier, later) = match a.first_departure().cmp(&b.first_departure()) {
        std::cmp::Ordering::Less => (a, b),
        std::cmp::Ordering::Greater => (b, a),
        std::cmp::Ordering::Equal => {
            return Err(TimetableError::DuplicateDeparture {
                route: route.to_string(),
                time: a.first_departure(),
            });
        }
    };

    let overtakes = earlier
        .times()
        .iter()
        .zip(later.times())
        .any(|(e, l)| l <= e);
    if overtakes {
        return Err(TimetableError::Overtaking {
            route: route.to_string(),
            earlier: earlier.first_departure(),
            later: later.first_departure(),
        });
    }
    Ok(())
}
