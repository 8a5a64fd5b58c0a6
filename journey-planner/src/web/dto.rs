//! Data transfer objects for web requests and responses.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{Journey, Leg, Time};

/// Query for a journey search.
#[derive(Debug, Deserialize)]
pub struct JourneyRequest {
    /// Origin station name
    pub start: String,

    /// Destination station name
    pub end: String,

    /// Earliest departure time (defaults to 0)
    #[serde(default, deserialize_with = "empty_as_none")]
    pub time: Option<Time>,
}

/// Query for re-planning a found journey from one of its interchanges.
#[derive(Debug, Deserialize)]
pub struct ModifyRequest {
    /// Origin station name of the original journey
    pub start: String,

    /// Destination station name of the original journey
    pub end: String,

    /// Earliest departure time of the original journey (defaults to 0)
    #[serde(default, deserialize_with = "empty_as_none")]
    pub time: Option<Time>,

    /// Interchange index, 0 for the first change
    pub interchange: usize,

    /// New earliest departure from the interchange (defaults to the
    /// original departure from there)
    #[serde(default, deserialize_with = "empty_as_none")]
    pub new_time: Option<Time>,
}

/// Treat an empty form field as absent.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// A stop called at during a leg.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CallResult {
    /// Station name
    pub station: String,

    /// Scheduled time at the station
    pub time: Time,
}

/// One leg of a journey.
#[derive(Debug, Serialize)]
pub struct LegResult {
    /// Route name
    pub route: String,

    /// Boarding station
    pub from: String,

    /// Alighting station
    pub to: String,

    /// Departure time from the boarding station
    pub departure_time: Time,

    /// Arrival time at the alighting station
    pub arrival_time: Time,

    /// Intermediate stops (excluding boarding and alighting)
    pub stops: Vec<CallResult>,
}

/// A journey.
#[derive(Debug, Serialize)]
pub struct JourneyResult {
    /// Origin station
    pub start: String,

    /// Destination station
    pub end: String,

    /// Departure time from the origin
    pub departure_time: Time,

    /// Arrival time at the destination
    pub arrival_time: Time,

    /// Time from departure to arrival
    pub total_travel_time: Time,

    /// Number of changes
    pub transfers: usize,

    /// Stations where the traveller changes, in order
    pub interchanges: Vec<String>,

    /// Legs in order
    pub legs: Vec<LegResult>,

    /// Plain-text itinerary
    pub text: String,
}

/// Response for a re-planned journey.
#[derive(Debug, Serialize)]
pub struct ModifyResponse {
    /// The journey as first found
    pub original: JourneyResult,

    /// The journey re-planned from the interchange
    pub modified: JourneyResult,
}

/// Response listing all stations.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    /// Station names, sorted
    pub stations: Vec<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl JourneyResult {
    /// Create from a domain Journey.
    pub fn from_journey(journey: &Journey) -> Self {
        Self {
            start: journey.start_station().to_string(),
            end: journey.end_station().to_string(),
            departure_time: journey.start_time(),
            arrival_time: journey.end_time(),
            total_travel_time: journey.total_travel_time(),
            transfers: journey.transfers(),
            interchanges: journey
                .interchange_stations()
                .into_iter()
                .map(ToString::to_string)
                .collect(),
            legs: journey.iter().map(LegResult::from_leg).collect(),
            text: journey.to_string(),
        }
    }
}

impl LegResult {
    /// Create from a domain Leg.
    pub fn from_leg(leg: &Leg) -> Self {
        let calls = leg.calls();

        // Intermediate stops (exclude board and alight)
        let stops = if calls.len() > 2 {
            calls[1..calls.len() - 1]
                .iter()
                .map(|(station, time)| CallResult {
                    station: station.to_string(),
                    time: *time,
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            route: leg.route_name().to_string(),
            from: leg.start_station().to_string(),
            to: leg.end_station().to_string(),
            departure_time: leg.start_time(),
            arrival_time: leg.end_time(),
            stops,
        }
    }
}
