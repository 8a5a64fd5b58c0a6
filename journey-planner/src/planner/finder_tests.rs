//! Tests for the earliest-arrival search.

use super::*;
use crate::domain::{Journey, Route, Service, Station, Time};
use crate::timetable::Timetable;
use std::sync::Arc;

fn st(name: &str) -> Station {
    Station::new(name).unwrap()
}

/// Build a timetable from `(route name, stops, services)` triples.
fn timetable(routes: &[(&str, &[&str], &[&[Time]])]) -> Timetable {
    let mut timetable = Timetable::new();
    for (name, stops, services) in routes {
        let route = Arc::new(Route::new(*name, stops.iter().map(|s| st(s)).collect()).unwrap());
        timetable.add_route(route.clone()).unwrap();
        for times in services.iter() {
            timetable
                .add_service(Service::new(route.clone(), times.to_vec()).unwrap())
                .unwrap();
        }
    }
    timetable
}

fn abc_two_services() -> Timetable {
    timetable(&[("R1", &["A", "B", "C"], &[&[0, 10, 20], &[5, 15, 25]])])
}

fn two_routes(r2_times: &[Time]) -> Timetable {
    timetable(&[
        ("R1", &["A", "B"], &[&[0, 10]]),
        ("R2", &["B", "C"], &[r2_times]),
    ])
}

/// Every leg departs no earlier than the journey may start, or than the
/// previous leg arrives.
fn assert_feasible(journey: &Journey, min_depart: Time) {
    assert!(journey.check_invariant());
    assert!(journey.start_time() >= min_depart);
    for pair in journey.legs().windows(2) {
        assert!(pair[1].start_time() >= pair[0].end_time());
        assert_eq!(pair[1].start_station(), pair[0].end_station());
    }
}

#[test]
fn skips_service_leaving_too_early() {
    let timetable = abc_two_services();
    let journey = find_journey(&st("A"), &st("C"), 3, &timetable).unwrap();

    assert_eq!(journey.legs().len(), 1);
    assert_eq!(journey.start_station(), &st("A"));
    assert_eq!(journey.end_station(), &st("C"));
    assert_eq!(journey.legs()[0].service().times(), &[5, 15, 25]);
    assert_eq!(journey.start_time(), 5);
    assert_eq!(journey.end_time(), 25);
    assert_feasible(&journey, 3);
}

#[test]
fn takes_first_service_when_catchable() {
    let timetable = abc_two_services();
    let journey = find_journey(&st("A"), &st("C"), 0, &timetable).unwrap();

    assert_eq!(journey.legs()[0].service().times(), &[0, 10, 20]);
    assert_eq!(journey.end_time(), 20);
    assert_eq!(journey.total_travel_time(), 20);
    assert_eq!(journey.transfers(), 0);
}

#[test]
fn departure_exactly_at_min_time_is_catchable() {
    let timetable = abc_two_services();
    let journey = find_journey(&st("A"), &st("C"), 5, &timetable).unwrap();
    assert_eq!(journey.start_time(), 5);
}

#[test]
fn same_service_across_stops_is_one_leg() {
    let timetable = timetable(&[("R1", &["A", "B", "C", "D"], &[&[0, 10, 20, 30]])]);
    let journey = find_journey(&st("A"), &st("D"), 0, &timetable).unwrap();

    assert_eq!(journey.legs().len(), 1);
    assert_eq!(journey.transfers(), 0);
    assert_eq!(journey.to_string(), "Total travel time: 30\tTransfers: 0\n0 - 30: catch route R1 from A to D\n");
}

#[test]
fn starts_mid_route() {
    let timetable = abc_two_services();
    let journey = find_journey(&st("B"), &st("C"), 12, &timetable).unwrap();

    assert_eq!(journey.start_station(), &st("B"));
    assert_eq!(journey.start_time(), 15);
    assert_eq!(journey.end_time(), 25);
}

#[test]
fn changes_between_routes() {
    let timetable = two_routes(&[15, 30]);
    let journey = find_journey(&st("A"), &st("C"), 0, &timetable).unwrap();

    assert_eq!(journey.legs().len(), 2);
    assert_eq!(journey.transfers(), 1);
    assert_eq!(journey.end_time(), 30);
    assert_eq!(journey.legs()[0].route_name(), "R1");
    assert_eq!(journey.legs()[1].route_name(), "R2");
    assert_eq!(journey.interchange_stations(), vec![&st("B")]);
    assert_feasible(&journey, 0);
}

#[test]
fn connection_leaving_at_arrival_time_is_caught() {
    let timetable = two_routes(&[10, 20]);
    let journey = find_journey(&st("A"), &st("C"), 0, &timetable).unwrap();
    assert_eq!(journey.end_time(), 20);
}

#[test]
fn missed_connection_is_not_found() {
    let timetable = two_routes(&[5, 30]);
    assert!(find_journey(&st("A"), &st("C"), 0, &timetable).is_none());
}

#[test]
fn start_equal_to_end_is_not_found() {
    let timetable = abc_two_services();
    assert!(find_journey(&st("A"), &st("A"), 0, &timetable).is_none());
}

#[test]
fn unconnected_stations_are_not_found() {
    let timetable = timetable(&[
        ("R1", &["A", "B"], &[&[0, 10]]),
        ("R2", &["C", "D"], &[&[0, 10]]),
    ]);
    assert!(find_journey(&st("A"), &st("D"), 0, &timetable).is_none());
}

#[test]
fn travel_against_route_direction_is_not_found() {
    let timetable = abc_two_services();
    assert!(find_journey(&st("C"), &st("A"), 0, &timetable).is_none());
}

#[test]
fn all_services_gone_is_not_found() {
    let timetable = abc_two_services();
    assert!(find_journey(&st("A"), &st("C"), 6, &timetable).is_none());
}

#[test]
fn unknown_station_is_not_found() {
    let timetable = abc_two_services();
    assert!(find_journey(&st("A"), &st("Z"), 0, &timetable).is_none());
    assert!(find_journey(&st("Z"), &st("C"), 0, &timetable).is_none());
}

#[test]
fn empty_timetable_is_not_found() {
    assert!(find_journey(&st("A"), &st("B"), 0, &Timetable::new()).is_none());
}

#[test]
fn picks_earliest_service_regardless_of_timetable_order() {
    let timetable = timetable(&[("R1", &["A", "B"], &[&[30, 40], &[10, 20], &[20, 30]])]);
    let journey = find_journey(&st("A"), &st("B"), 11, &timetable).unwrap();
    assert_eq!(journey.start_time(), 20);
    assert_eq!(journey.end_time(), 30);
}

#[test]
fn earlier_arrival_beats_fewer_transfers() {
    let timetable = timetable(&[
        ("Direct", &["A", "C"], &[&[0, 50]]),
        ("R1", &["A", "B"], &[&[0, 10]]),
        ("R2", &["B", "C"], &[&[15, 30]]),
    ]);
    let journey = find_journey(&st("A"), &st("C"), 0, &timetable).unwrap();
    assert_eq!(journey.end_time(), 30);
    assert_eq!(journey.transfers(), 1);
}

#[test]
fn equal_arrival_prefers_fewer_transfers() {
    // The change at B reaches C first in search order, the direct service
    // via X arrives at the same time later on
    let timetable = timetable(&[
        ("R1", &["A", "X", "C"], &[&[0, 20, 30]]),
        ("R2", &["A", "B"], &[&[0, 10]]),
        ("R3", &["B", "C"], &[&[15, 30]]),
    ]);
    let journey = find_journey(&st("A"), &st("C"), 0, &timetable).unwrap();

    assert_eq!(journey.end_time(), 30);
    assert_eq!(journey.transfers(), 0);
    assert_eq!(journey.legs()[0].route_name(), "R1");
}

#[test]
fn interchanges_are_reached_at_earliest_arrival() {
    // Staying on R1 throughout also arrives at 30 with no change, but R2
    // reaches C first and C is settled on that arrival
    let timetable = timetable(&[
        ("R1", &["A", "B", "C", "D"], &[&[0, 10, 20, 30]]),
        ("R2", &["A", "C"], &[&[5, 15]]),
    ]);
    let journey = find_journey(&st("A"), &st("D"), 0, &timetable).unwrap();

    assert_eq!(journey.end_time(), 30);
    assert_eq!(journey.interchange_stations(), vec![&st("C")]);
    assert_eq!(journey.legs()[0].route_name(), "R2");
    assert_eq!(journey.legs()[0].end_time(), 15);
    assert_eq!(journey.legs()[1].route_name(), "R1");
    assert_eq!(journey.transfers(), 1);
    assert_feasible(&journey, 0);
}

#[test]
fn last_stop_of_a_route_is_a_dead_end() {
    // R1 ends at B; C is only reachable by changing to R2
    let timetable = timetable(&[
        ("R1", &["A", "B"], &[&[0, 10]]),
        ("R2", &["B", "C"], &[&[12, 20]]),
    ]);
    assert!(find_journey(&st("B"), &st("A"), 0, &timetable).is_none());
    let journey = find_journey(&st("A"), &st("C"), 0, &timetable).unwrap();
    assert_eq!(journey.transfers(), 1);
}

#[test]
fn changes_back_onto_a_later_run() {
    // Ride R1 to B, hop on R2 to C, then a later R3 to D
    let timetable = timetable(&[
        ("R1", &["A", "B"], &[&[0, 10]]),
        ("R2", &["B", "C"], &[&[12, 20]]),
        ("R3", &["C", "D"], &[&[15, 22], &[25, 30], &[40, 45]]),
    ]);
    let journey = find_journey(&st("A"), &st("D"), 0, &timetable).unwrap();

    assert_eq!(journey.legs().len(), 3);
    assert_eq!(journey.transfers(), 2);
    assert_eq!(journey.end_time(), 30);
    assert_feasible(&journey, 0);
}

#[test]
fn result_is_deterministic() {
    let timetable = timetable(&[
        ("R1", &["A", "B", "D"], &[&[0, 10, 20]]),
        ("R2", &["A", "C", "D"], &[&[0, 10, 20]]),
    ]);
    let first = find_journey(&st("A"), &st("D"), 0, &timetable).unwrap();
    for _ in 0..10 {
        assert_eq!(find_journey(&st("A"), &st("D"), 0, &timetable).unwrap(), first);
    }
    assert_eq!(first.legs()[0].route_name(), "R1");
}

#[test]
fn concurrent_searches_share_timetable() {
    let timetable = abc_two_services();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|t| scope.spawn({
                let timetable = &timetable;
                move || find_journey(&st("A"), &st("C"), t, timetable).map(|j| j.end_time())
            }))
            .collect();
        for (t, handle) in handles.into_iter().enumerate() {
            let expected = if t == 0 { 20 } else { 25 };
            assert_eq!(handle.join().unwrap(), Some(expected));
        }
    });
}

mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    const STATIONS: usize = 6;

    fn station(i: usize) -> Station {
        Station::new(format!("S{i}")).unwrap()
    }

    /// A route over distinct stations with services shifted by distinct
    /// offsets, so no service overtakes another.
    fn route_strategy(
        index: usize,
    ) -> impl Strategy<Value = (Arc<Route>, Vec<Vec<Time>>)> {
        (
            Just((0..STATIONS).collect::<Vec<_>>()).prop_shuffle(),
            2usize..=4,
            proptest::collection::vec(1i64..20, 3),
            proptest::collection::btree_set(0i64..100, 1..4),
        )
            .prop_map(move |(order, len, gaps, offsets)| {
                let stops = order[..len].iter().map(|&i| station(i)).collect();
                let route = Arc::new(Route::new(format!("R{index}"), stops).unwrap());
                let services = offsets
                    .into_iter()
                    .map(|offset| {
                        let mut t = offset;
                        let mut times = vec![t];
                        for gap in &gaps[..len - 1] {
                            t += gap;
                            times.push(t);
                        }
                        times
                    })
                    .collect();
                (route, services)
            })
    }

    fn timetable_strategy() -> impl Strategy<Value = Timetable> {
        (1usize..5)
            .prop_flat_map(|n| (0..n).map(route_strategy).collect::<Vec<_>>())
            .prop_map(|routes| {
                let mut timetable = Timetable::new();
                for (route, services) in routes {
                    timetable.add_route(route.clone()).unwrap();
                    for times in services {
                        timetable
                            .add_service(Service::new(route.clone(), times).unwrap())
                            .unwrap();
                    }
                }
                timetable
            })
    }

    /// Earliest arrival at every station by relaxing every ride between
    /// any two stops until nothing improves.
    fn earliest_arrivals(
        timetable: &Timetable,
        start: &Station,
        min_depart: Time,
    ) -> HashMap<Station, Time> {
        let mut best = HashMap::from([(start.clone(), min_depart)]);
        loop {
            let mut changed = false;
            for (route, services) in timetable.iter() {
                for service in services {
                    for i in 0..route.num_stops() {
                        let Some(&ready) = best.get(&route.stops()[i]) else {
                            continue;
                        };
                        if service.times()[i] < ready {
                            continue;
                        }
                        for j in (i + 1)..route.num_stops() {
                            let arrive = service.times()[j];
                            let entry = best.entry(route.stops()[j].clone()).or_insert(Time::MAX);
                            if arrive < *entry {
                                *entry = arrive;
                                changed = true;
                            }
                        }
                    }
                }
            }
            if !changed {
                return best;
            }
        }
    }

    proptest! {
        /// Property: the search finds a journey exactly when one exists,
        /// and it arrives as early as possible.
        #[test]
        fn finds_earliest_arrival(
            timetable in timetable_strategy(),
            from in 0usize..STATIONS,
            to in 0usize..STATIONS,
            min_depart in 0i64..80,
        ) {
            let (start, end) = (station(from), station(to));
            let found = find_journey(&start, &end, min_depart, &timetable);

            let best = earliest_arrivals(&timetable, &start, min_depart);
            let expected = if start == end { None } else { best.get(&end).copied() };

            prop_assert_eq!(found.as_ref().map(Journey::end_time), expected);
        }

        /// Property: found journeys never leave early or miss a connection.
        #[test]
        fn found_journeys_are_feasible(
            timetable in timetable_strategy(),
            from in 0usize..STATIONS,
            to in 0usize..STATIONS,
            min_depart in 0i64..80,
        ) {
            if let Some(journey) = find_journey(&station(from), &station(to), min_depart, &timetable) {
                prop_assert!(journey.check_invariant());
                prop_assert_eq!(journey.start_station(), &station(from));
                prop_assert_eq!(journey.end_station(), &station(to));
                prop_assert!(journey.start_time() >= min_depart);
                for pair in journey.legs().windows(2) {
                    prop_assert!(pair[1].start_time() >= pair[0].end_time());
                    prop_assert!(pair[0].service() != pair[1].service());
                }
            }
        }
    }
}
