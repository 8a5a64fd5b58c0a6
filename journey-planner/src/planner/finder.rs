//! Earliest-arrival journey search.
//!
//! A Dijkstra-style search where the cost of reaching a station is the
//! wall-clock time of arrival. Each station is finalised once, in order of
//! arrival time. From a finalised station, each route through it is
//! followed one stop onwards on the earliest service the traveller can
//! still catch there.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::domain::{Journey, Route, Service, Station, Time};
use crate::timetable::Timetable;

/// What the search has established about reaching a station.
#[derive(Debug)]
enum NodeState {
    /// Reachable, but an earlier arrival may still turn up.
    Candidate(Label),
    /// Earliest arrival confirmed; no longer relaxed.
    Finalized,
}

/// How a candidate station is reached.
#[derive(Debug)]
enum Label {
    /// The start station: ready to leave at the minimum departure time.
    Origin,
    /// Reached by riding this journey.
    Reached(Journey),
}

impl Label {
    fn arrival(&self, min_depart: Time) -> Time {
        match self {
            Label::Origin => min_depart,
            Label::Reached(journey) => journey.end_time(),
        }
    }

    fn transfers(&self) -> usize {
        match self {
            Label::Origin => 0,
            Label::Reached(journey) => journey.transfers(),
        }
    }
}

/// Find the journey from `start` to `end` that arrives earliest, leaving
/// `start` no earlier than `min_depart`.
///
/// Returns `None` when no such journey exists. That includes `start == end`
/// and stations that no route serves.
///
/// Every station on the returned journey is reached at its earliest
/// possible arrival. Transfers only break ties between two ways of reaching
/// the same station at the same time, so the result is not guaranteed to
/// have the fewest transfers among all journeys arriving at `end` equally
/// early. Remaining ties are broken by station name, so the same query over
/// the same timetable always gives the same journey.
///
/// # Examples
///
/// ```
/// use journey_planner::domain::Station;
/// use journey_planner::planner::find_journey;
/// use journey_planner::timetable::parse_timetable;
///
/// let timetable = parse_timetable("R1\nA, B\n0 10\n\nR2\nB, C\n15 30\n\n").unwrap();
/// let a = Station::new("A").unwrap();
/// let c = Station::new("C").unwrap();
///
/// let journey = find_journey(&a, &c, 0, &timetable).unwrap();
/// assert_eq!(journey.end_time(), 30);
/// assert_eq!(journey.transfers(), 1);
///
/// assert!(find_journey(&a, &c, 1, &timetable).is_none());
/// ```
pub fn find_journey(
    start: &Station,
    end: &Station,
    min_depart: Time,
    timetable: &Timetable,
) -> Option<Journey> {
    if start == end {
        debug!(%start, "start and end are the same station");
        return None;
    }
    if !timetable.contains_station(start) || !timetable.contains_station(end) {
        debug!(%start, %end, "station not served by any route");
        return None;
    }

    let mut states: HashMap<Station, NodeState> = HashMap::new();
    states.insert(start.clone(), NodeState::Candidate(Label::Origin));
    let mut finalized = 0usize;

    while let Some(station) = next_candidate(&states, min_depart) {
        let label = match states.insert(station.clone(), NodeState::Finalized) {
            Some(NodeState::Candidate(label)) => label,
            _ => continue,
        };
        finalized += 1;
        let ready = label.arrival(min_depart);
        trace!(%station, arrival = ready, transfers = label.transfers(), "finalised station");

        if station == *end {
            return match label {
                Label::Reached(journey) => {
                    debug!(%start, %end, arrival = journey.end_time(), finalized, "journey found");
                    Some(journey)
                }
                Label::Origin => None,
            };
        }

        for (route, services) in timetable.routes_through(&station) {
            let Some(next) = next_stop(route, &station) else {
                continue;
            };
            if matches!(states.get(next), Some(NodeState::Finalized)) {
                continue;
            }
            let Some(service) = earliest_service(services, &station, ready) else {
                continue;
            };

            let extended = match &label {
                Label::Origin => Journey::new(station.clone(), next.clone(), Arc::clone(service)),
                Label::Reached(journey) => {
                    let mut journey = journey.clone();
                    journey
                        .extend_journey(Arc::clone(service), next.clone())
                        .map(|()| journey)
                }
            };
            let extended = match extended {
                Ok(journey) => journey,
                Err(e) => {
                    trace!(%station, route = %route.name(), error = %e, "skipping unusable service");
                    continue;
                }
            };

            relax(&mut states, next, extended);
        }
    }

    debug!(%start, %end, min_depart, finalized, "no journey found");
    None
}

/// The unfinalised candidate with the earliest arrival, then fewest
/// transfers, then lowest station name.
fn next_candidate(states: &HashMap<Station, NodeState>, min_depart: Time) -> Option<Station> {
    states
        .iter()
        .filter_map(|(station, state)| match state {
            NodeState::Candidate(label) => {
                Some((label.arrival(min_depart), label.transfers(), station))
            }
            NodeState::Finalized => None,
        })
        .min()
        .map(|(_, _, station)| station.clone())
}

/// The stop after `station` on `route`, if it isn't the final stop.
fn next_stop<'a>(route: &'a Route, station: &Station) -> Option<&'a Station> {
    if route.is_last_stop(station) {
        return None;
    }
    route
        .stop_number(station)
        .and_then(|number| route.stop(number + 1))
        .ok()
}

/// The service leaving `station` soonest at or after `ready`.
///
/// Services never overtake on a route, so the earliest departure is also
/// the earliest arrival at every later stop. Equal departures keep
/// timetable order.
fn earliest_service<'a>(
    services: &'a [Arc<Service>],
    station: &Station,
    ready: Time,
) -> Option<&'a Arc<Service>> {
    services
        .iter()
        .filter_map(|s| {
            let departs = s.stop_time_at(station).ok()?;
            (departs >= ready).then_some((departs, s))
        })
        .min_by_key(|(departs, _)| *departs)
        .map(|(_, s)| s)
}

/// Install `journey` as the candidate for `station` if it improves on the
/// current one.
fn relax(states: &mut HashMap<Station, NodeState>, station: &Station, journey: Journey) {
    let improves = match states.get(station) {
        None => true,
        Some(NodeState::Finalized) => false,
        Some(NodeState::Candidate(Label::Origin)) => false,
        Some(NodeState::Candidate(Label::Reached(current))) => {
            journey.end_time() < current.end_time()
                || (journey.end_time() == current.end_time()
                    && journey.transfers() < current.transfers())
        }
    };

    if improves {
        trace!(%station, arrival = journey.end_time(), "new candidate");
        states.insert(station.clone(), NodeState::Candidate(Label::Reached(journey)));
    }
}
