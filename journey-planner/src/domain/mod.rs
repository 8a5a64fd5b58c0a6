//! Domain types for the journey planner.
//!
//! This module contains the timetable data model: stations, routes,
//! scheduled services, legs and journeys. All types enforce their
//! invariants at construction time, so code that receives these types can
//! trust their validity. Each also offers `check_invariant()` to re-verify
//! its structure in tests.

mod error;
mod journey;
mod leg;
mod route;
mod service;
mod station;

pub use error::DomainError;
pub use journey::Journey;
pub use leg::Leg;
pub use route::Route;
pub use service::{Service, Time};
pub use station::Station;
