//! Station identity type.

use std::fmt;
use std::sync::Arc;

use super::DomainError;

/// A named stop location.
///
/// Stations are identified purely by name: two stations are equal iff
/// their names are equal (exact, case-sensitive). The name is shared via
/// `Arc<str>` so that cloning a station during search is cheap.
///
/// # Examples
///
/// ```
/// use journey_planner::domain::Station;
///
/// let central = Station::new("Central").unwrap();
/// assert_eq!(central.name(), "Central");
///
/// // Names are compared exactly
/// assert_ne!(central, Station::new("central").unwrap());
///
/// // Empty names are rejected
/// assert!(Station::new("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Station(Arc<str>);

impl Station {
    /// Create a station from its name.
    ///
    /// The name must not be empty. Whitespace inside the name is kept
    /// as-is (station names such as "Roma Street" contain spaces).
    pub fn new(name: impl AsRef<str>) -> Result<Self, DomainError> {
        let name = name.as_ref();
        if name.is_empty() {
            return Err(DomainError::MissingInput("station name"));
        }
        Ok(Station(Arc::from(name)))
    }

    /// Returns the station name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Station({})", self.name())
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
