//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{Journey, Leg, Time};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the search form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub stations: Vec<String>,
    pub route_count: usize,
}

/// A found journey, with a form to re-plan from an interchange.
#[derive(Template)]
#[template(path = "journey.html")]
pub struct JourneyTemplate {
    pub journey: JourneyView,
    pub query: QueryView,
}

/// Original and re-planned journeys side by side.
#[derive(Template)]
#[template(path = "modify.html")]
pub struct ModifyTemplate {
    pub original: JourneyView,
    pub modified: JourneyView,
    pub interchange: String,
    pub new_time: Time,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// The search that produced a journey, echoed back into forms.
#[derive(Debug, Clone)]
pub struct QueryView {
    pub start: String,
    pub end: String,
    pub time: Time,
}

/// Journey view model for templates.
#[derive(Debug, Clone)]
pub struct JourneyView {
    pub start: String,
    pub end: String,
    pub departure_time: Time,
    pub arrival_time: Time,
    pub total_travel_time: Time,
    pub transfers: usize,
    pub legs: Vec<LegView>,
    pub interchanges: Vec<InterchangeView>,
    /// Plain-text itinerary
    pub text: String,
}

impl JourneyView {
    /// Create from a domain Journey.
    pub fn from_journey(journey: &Journey) -> Self {
        let interchanges = journey
            .interchange_stations()
            .into_iter()
            .enumerate()
            .map(|(index, station)| InterchangeView {
                index,
                station: station.to_string(),
                departure_time: journey.interchange_departure(index).unwrap_or_default(),
            })
            .collect();

        Self {
            start: journey.start_station().to_string(),
            end: journey.end_station().to_string(),
            departure_time: journey.start_time(),
            arrival_time: journey.end_time(),
            total_travel_time: journey.total_travel_time(),
            transfers: journey.transfers(),
            legs: journey.iter().map(LegView::from_leg).collect(),
            interchanges,
            text: journey.to_string(),
        }
    }

    /// "direct", "1 change" or "N changes".
    pub fn transfers_display(&self) -> String {
        match self.transfers {
            0 => "direct".to_string(),
            1 => "1 change".to_string(),
            n => format!("{n} changes"),
        }
    }

    /// Can this journey be re-planned from somewhere?
    pub fn has_interchanges(&self) -> bool {
        !self.interchanges.is_empty()
    }
}

/// Leg view model.
#[derive(Debug, Clone)]
pub struct LegView {
    pub route: String,
    pub from: String,
    pub to: String,
    pub departure_time: Time,
    pub arrival_time: Time,
    /// Number of stops between boarding and alighting.
    pub stops: usize,
}

impl LegView {
    /// Create from a domain Leg.
    pub fn from_leg(leg: &Leg) -> Self {
        Self {
            route: leg.route_name().to_string(),
            from: leg.start_station().to_string(),
            to: leg.end_station().to_string(),
            departure_time: leg.start_time(),
            arrival_time: leg.end_time(),
            stops: leg.calls().len().saturating_sub(2),
        }
    }
}

/// A place the journey can be re-planned from.
#[derive(Debug, Clone)]
pub struct InterchangeView {
    pub index: usize,
    pub station: String,
    /// When the journey currently leaves the interchange.
    pub departure_time: Time,
}
