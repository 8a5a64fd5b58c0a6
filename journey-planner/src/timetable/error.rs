//! Timetable error types.

use std::path::PathBuf;

use crate::domain::Time;

/// Errors raised while assembling a [`super::Timetable`].
///
/// These guard the preconditions the planner relies on: each route listed
/// once, and on each route services that neither share a first departure
/// nor overtake each other.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimetableError {
    /// The same route was added twice
    #[error("route {0} occurs more than once")]
    DuplicateRoute(String),

    /// A service was added for a route not in the timetable
    #[error("route {0} is not in the timetable")]
    UnknownRoute(String),

    /// Two services on a route leave the first stop at the same time
    #[error("route {route} has two services departing at {time}")]
    DuplicateDeparture { route: String, time: Time },

    /// A later-departing service reaches some stop no later than an earlier one
    #[error("on route {route} the service departing at {later} overtakes the one departing at {earlier}")]
    Overtaking {
        route: String,
        earlier: Time,
        later: Time,
    },
}

/// Errors from reading a timetable file.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The text does not follow the timetable format
    #[error("line {line}: {message}")]
    Format { line: usize, message: String },

    /// The text is well-formed but breaks a timetable precondition
    #[error("line {line}: {source}")]
    Timetable {
        line: usize,
        #[source]
        source: TimetableError,
    },
}
