//! Re-planning a journey from one of its interchanges.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{DomainError, Journey, Time};
use crate::timetable::Timetable;

use super::find_journey;

/// Error from re-planning a journey.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplanError {
    /// The interchange index is out of range
    #[error("interchange {index} does not exist, journey has {interchanges} interchanges")]
    NoSuchInterchange { index: usize, interchanges: usize },

    /// Splicing the new legs onto the journey failed validation
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Re-plan `journey` from interchange `interchange`, leaving there no
/// earlier than `new_time`.
///
/// Interchange `k` is where leg `k` ends (0-based), so valid indices run
/// from 0 to `legs - 2`. Legs `0..=k` are kept as they are. The rest of the
/// journey is searched afresh from the interchange to the original
/// destination, leaving no earlier than `new_time` or the arrival at the
/// interchange, whichever is later. The found legs are spliced on with
/// [`Journey::extend_journey`].
///
/// `journey` itself is never modified.
///
/// Returns `Ok(None)` if no onward journey exists.
///
/// # Errors
///
/// - `NoSuchInterchange` if `interchange` is not a valid index
/// - `Domain` if a found leg can't be spliced on
///
/// # Examples
///
/// ```
/// use journey_planner::domain::Station;
/// use journey_planner::planner::{find_journey, modify_journey};
/// use journey_planner::timetable::parse_timetable;
///
/// let timetable =
///     parse_timetable("R1\nA, B\n0 10\n\nR2\nB, C\n15 30\n25 40\n\n").unwrap();
/// let a = Station::new("A").unwrap();
/// let c = Station::new("C").unwrap();
///
/// let journey = find_journey(&a, &c, 0, &timetable).unwrap();
/// let later = modify_journey(&journey, 0, 20, &timetable).unwrap().unwrap();
///
/// assert_eq!(journey.end_time(), 30);
/// assert_eq!(later.end_time(), 40);
/// ```
pub fn modify_journey(
    journey: &Journey,
    interchange: usize,
    new_time: Time,
    timetable: &Timetable,
) -> Result<Option<Journey>, ReplanError> {
    let legs = journey.legs();
    let interchanges = legs.len() - 1;
    if interchange >= interchanges {
        return Err(ReplanError::NoSuchInterchange {
            index: interchange,
            interchanges,
        });
    }

    // Safe: interchange < legs.len() - 1, and a journey has at least one leg
    let mut replanned = Journey::from_leg(legs[0].clone());
    for leg in &legs[1..=interchange] {
        replanned.extend_journey(Arc::clone(leg.service()), leg.end_station().clone())?;
    }

    let from = replanned.end_station().clone();
    let depart = new_time.max(replanned.end_time());
    let Some(onward) = find_journey(&from, journey.end_station(), depart, timetable) else {
        debug!(%from, to = %journey.end_station(), depart, "no onward journey from interchange");
        return Ok(None);
    };

    for leg in onward.legs() {
        replanned.extend_journey(Arc::clone(leg.service()), leg.end_station().clone())?;
    }

    debug!(
        %from,
        depart,
        arrival = replanned.end_time(),
        legs = replanned.legs().len(),
        "re-planned journey"
    );
    Ok(Some(replanned))
}
