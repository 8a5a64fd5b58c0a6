//! Domain error types.
//!
//! These errors represent invariant violations caught while constructing
//! or extending timetable values. They are distinct from timetable loading
//! and web errors, and from the "no journey exists" search outcome.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A required input was absent (e.g. an empty name)
    #[error("missing input: {0}")]
    MissingInput(&'static str),

    /// Route has fewer than two stops or repeats a stop
    #[error("invalid route: {0}")]
    InvalidRoute(String),

    /// Service times don't fit the route or aren't strictly ascending
    #[error("invalid service: {0}")]
    InvalidService(String),

    /// Leg or extension that the service cannot travel
    #[error("invalid journey segment: {0}")]
    InvalidJourneySegment(String),

    /// Stop number or station is not on the route
    #[error("no such stop: {0}")]
    NoSuchStop(String),
}
