//! Web layer for the journey planner.
//!
//! Provides HTTP endpoints for finding journeys and re-planning them.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
