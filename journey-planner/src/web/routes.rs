//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::{debug, warn};

use crate::domain::{DomainError, Station};
use crate::planner::{ReplanError, modify_journey};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/journey", get(get_journey))
        .route("/journey/modify", get(get_modified_journey))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with search form.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let template = IndexTemplate {
        stations: state.stations.to_vec(),
        route_count: state.timetable().route_count(),
    };
    Ok(Html(template.render().map_err(template_error)?))
}

/// List every station in the timetable.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    Json(StationsResponse {
        stations: state.stations.to_vec(),
    })
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Find the earliest-arriving journey between two stations.
async fn get_journey(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<JourneyRequest>,
) -> Result<Response, AppError> {
    let start = resolve_station(&state, &req.start, "start")?;
    let end = resolve_station(&state, &req.end, "end")?;
    let time = req.time.unwrap_or(0);

    let found = state.finder.find(&start, &end, time).await;
    let Some(journey) = found.as_ref() else {
        return no_journey(
            &headers,
            format!("no journey from {start} to {end} leaving at or after {time}"),
        );
    };

    debug!(
        %start,
        %end,
        time,
        arrival = journey.end_time(),
        cached_searches = state.finder.cache_entry_count(),
        "journey found"
    );

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let template = JourneyTemplate {
            journey: JourneyView::from_journey(journey),
            query: QueryView {
                start: start.to_string(),
                end: end.to_string(),
                time,
            },
        };
        let html = template.render().map_err(template_error)?;
        Ok(Html(html).into_response())
    } else {
        Ok(Json(JourneyResult::from_journey(journey)).into_response())
    }
}

/// Re-plan a found journey from one of its interchanges.
async fn get_modified_journey(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<ModifyRequest>,
) -> Result<Response, AppError> {
    let start = resolve_station(&state, &req.start, "start")?;
    let end = resolve_station(&state, &req.end, "end")?;
    let time = req.time.unwrap_or(0);

    let found = state.finder.find(&start, &end, time).await;
    let Some(original) = found.as_ref() else {
        return no_journey(
            &headers,
            format!("no journey from {start} to {end} leaving at or after {time}"),
        );
    };

    let Some(interchange) = original.interchange_stations().get(req.interchange).copied().cloned()
    else {
        return Err(ReplanError::NoSuchInterchange {
            index: req.interchange,
            interchanges: original.transfers(),
        }
        .into());
    };
    let new_time = req
        .new_time
        .or_else(|| original.interchange_departure(req.interchange))
        .unwrap_or(time);

    let Some(modified) = modify_journey(original, req.interchange, new_time, state.timetable())?
    else {
        return no_journey(
            &headers,
            format!("no journey from {interchange} to {end} leaving at or after {new_time}"),
        );
    };
    debug!(
        %start,
        %end,
        %interchange,
        new_time,
        arrival = modified.end_time(),
        "modified journey"
    );

    if accepts_html(&headers) {
        let template = ModifyTemplate {
            original: JourneyView::from_journey(original),
            modified: JourneyView::from_journey(&modified),
            interchange: interchange.to_string(),
            new_time,
        };
        let html = template.render().map_err(template_error)?;
        Ok(Html(html).into_response())
    } else {
        Ok(Json(ModifyResponse {
            original: JourneyResult::from_journey(original),
            modified: JourneyResult::from_journey(&modified),
        })
        .into_response())
    }
}

/// Parse a station name and check the timetable serves it.
fn resolve_station(state: &AppState, name: &str, role: &str) -> Result<Station, AppError> {
    match state.station(name) {
        Ok(Some(station)) => Ok(station),
        Ok(None) => Err(AppError::NotFound {
            message: format!("unknown {role} station: {}", name.trim()),
        }),
        Err(_) => Err(AppError::BadRequest {
            message: format!("{role} station is required"),
        }),
    }
}

/// Respond that no journey exists: an error page for browsers, a JSON
/// error otherwise.
fn no_journey(headers: &HeaderMap, message: String) -> Result<Response, AppError> {
    if !accepts_html(headers) {
        return Err(AppError::NotFound { message });
    }

    debug!(%message, "no journey");
    let template = ErrorTemplate {
        title: "No journey found".to_string(),
        message,
    };
    let html = template.render().map_err(template_error)?;
    Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
}

fn template_error(e: askama::Error) -> AppError {
    AppError::Internal {
        message: format!("Template error: {}", e),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<ReplanError> for AppError {
    fn from(e: ReplanError) -> Self {
        match e {
            ReplanError::NoSuchInterchange { .. } => AppError::BadRequest {
                message: e.to_string(),
            },
            ReplanError::Domain(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
