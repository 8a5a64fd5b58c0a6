//! Text timetable reader.
//!
//! A timetable file is a sequence of blocks, one per route:
//!
//! ```text
//! R1
//! A, B, C
//! 0 10 20
//! 5 15 25
//!
//! R2
//! C, D
//! 30 40
//!
//! ```
//!
//! Each block is a route name (a single word, surrounding whitespace
//! ignored), a line of station names separated by `", "`, zero or more
//! service lines with one time per station, and an empty line. The last
//! line of the file must be empty, so every block is terminated.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{Route, Service, Station, Time};

use super::{ReadError, Timetable};

/// Read and parse a timetable file.
///
/// # Errors
///
/// `ReadError::Io` if the file can't be read, otherwise as for
/// [`parse_timetable`].
pub fn read_timetable(path: impl AsRef<Path>) -> Result<Timetable, ReadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let timetable = parse_timetable(&text)?;
    info!(
        path = %path.display(),
        routes = timetable.route_count(),
        services = timetable.service_count(),
        "loaded timetable"
    );
    Ok(timetable)
}

/// Parse timetable text.
///
/// # Errors
///
/// `ReadError::Format` naming the offending line for any layout problem,
/// or `ReadError::Timetable` if a route repeats or its services overtake
/// each other.
///
/// # Examples
///
/// ```
/// use journey_planner::timetable::parse_timetable;
///
/// let timetable = parse_timetable("R1\nA, B\n0 10\n\n").unwrap();
/// assert_eq!(timetable.route_count(), 1);
/// assert_eq!(timetable.service_count(), 1);
///
/// // Missing the terminating empty line
/// assert!(parse_timetable("R1\nA, B\n0 10\n").is_err());
/// ```
pub fn parse_timetable(text: &str) -> Result<Timetable, ReadError> {
    let lines: Vec<&str> = text.lines().collect();
    if let Some(last) = lines.last().filter(|l| !l.is_empty()) {
        return Err(format_error(
            lines.len(),
            format!("last line must be empty, found {last:?}"),
        ));
    }

    let mut timetable = Timetable::new();
    let mut lines = Lines::new(&lines);

    while let Some((line_no, name_line)) = lines.next() {
        let route = parse_route(line_no, name_line, &mut lines)?;
        timetable
            .add_route(Arc::clone(&route))
            .map_err(|source| ReadError::Timetable {
                line: line_no,
                source,
            })?;

        let mut count = 0;
        while let Some((line_no, line)) = lines.next() {
            if line.is_empty() {
                break;
            }
            let times = parse_times(line_no, line)?;
            let service = Service::new(Arc::clone(&route), times)
                .map_err(|e| format_error(line_no, e.to_string()))?;
            timetable
                .add_service(service)
                .map_err(|source| ReadError::Timetable {
                    line: line_no,
                    source,
                })?;
            count += 1;
        }

        debug!(route = %route.name(), stops = route.num_stops(), services = count, "read route");
    }

    Ok(timetable)
}

/// Line cursor yielding 1-based line numbers.
struct Lines<'a> {
    lines: &'a [&'a str],
    pos: usize,
}

impl<'a> Lines<'a> {
    fn new(lines: &'a [&'a str]) -> Self {
        Self { lines, pos: 0 }
    }

    fn next(&mut self) -> Option<(usize, &'a str)> {
        let line = *self.lines.get(self.pos)?;
        self.pos += 1;
        Some((self.pos, line))
    }
}

fn parse_route(
    line_no: usize,
    name_line: &str,
    lines: &mut Lines<'_>,
) -> Result<Arc<Route>, ReadError> {
    let name = name_line.trim();
    if name.is_empty() {
        return Err(format_error(line_no, "route name cannot be empty"));
    }
    if name.split_whitespace().count() != 1 {
        return Err(format_error(
            line_no,
            format!("route name {name:?} cannot contain whitespace"),
        ));
    }

    let (stations_no, stations_line) = lines
        .next()
        .ok_or_else(|| format_error(line_no + 1, format!("route {name} has no station list")))?;
    let stops = parse_stations(stations_no, stations_line)?;

    Route::new(name, stops)
        .map(Arc::new)
        .map_err(|e| format_error(stations_no, e.to_string()))
}

fn parse_stations(line_no: usize, line: &str) -> Result<Vec<Station>, ReadError> {
    line.split(", ")
        .map(|name| {
            Station::new(name)
                .map_err(|_| format_error(line_no, "station name cannot be empty"))
        })
        .collect()
}

fn parse_times(line_no: usize, line: &str) -> Result<Vec<Time>, ReadError> {
    line.split_whitespace()
        .map(|token| {
            token
                .parse::<Time>()
                .map_err(|_| format_error(line_no, format!("'{token}' is not a number")))
        })
        .collect()
}

fn format_error(line: usize, message: impl Into<String>) -> ReadError {
    ReadError::Format {
        line,
        message: message.into(),
    }
}
