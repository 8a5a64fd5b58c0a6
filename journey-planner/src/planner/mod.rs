//! Journey planning over a timetable.
//!
//! [`find_journey`] answers "how do I get from here to there, arriving as
//! early as possible?" and [`modify_journey`] re-plans the remainder of a
//! found journey from one of its interchanges.
//!
//! Both are pure computations over a shared, read-only
//! [`Timetable`](crate::timetable::Timetable)
//! and may run concurrently.

mod finder;
mod replan;

#[cfg(test)]
mod finder_tests;

pub use finder::find_journey;
pub use replan::{modify_journey, ReplanError};
