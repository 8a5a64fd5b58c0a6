//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, CachedFinder};
use crate::domain::{DomainError, Station};
use crate::timetable::Timetable;

/// Shared application state.
///
/// Contains everything needed to handle requests. The timetable is
/// read-only, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Journey search with a result cache
    pub finder: Arc<CachedFinder>,

    /// Every station name, sorted
    pub stations: Arc<Vec<String>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(timetable: Timetable, cache_config: &CacheConfig) -> Self {
        let stations = timetable
            .stations()
            .iter()
            .map(|s| s.name().to_string())
            .collect();

        Self {
            finder: Arc::new(CachedFinder::new(Arc::new(timetable), cache_config)),
            stations: Arc::new(stations),
        }
    }

    /// The timetable being served.
    pub fn timetable(&self) -> &Timetable {
        self.finder.timetable()
    }

    /// Look up a station served by the timetable.
    ///
    /// Returns `Ok(None)` for a well-formed name no route stops at.
    pub fn station(&self, name: &str) -> Result<Option<Station>, DomainError> {
        let station = Station::new(name.trim())?;
        Ok(self.timetable().contains_station(&station).then_some(station))
    }
}
