//! Time token parsing
//!
//! Turns a raw punch cell into a canonical [`TimeOfDay`], or `None` when the
//! cell is an absence marker or simply not a time. Nothing here fails: an
//! unparseable cell is an ordinary outcome.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{ABSENCE_DASH, ABSENCE_MARKERS};
use crate::domain::{CellValue, TimeOfDay};

static CLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?$").expect("valid clock regex"));
static DAY_FRACTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0\.\d+$").expect("valid fraction regex"));
static DOT_SHORTHAND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})\.(\d{1,2})$").expect("valid shorthand regex"));
static BARE_HOUR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}$").expect("valid hour regex"));
static TIME_FRAGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,2}[:.]\d{2}\b").expect("valid fragment regex"));

const MINUTES_PER_DAY: f64 = 1440.0;

/// True when the text carries an explicit absence marker anywhere
/// (case-insensitive), or is a bare dash.
pub fn contains_absence_marker(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed == ABSENCE_DASH {
        return true;
    }
    let lower = trimmed.to_lowercase();
    ABSENCE_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Parse one cell. Date-typed cells contribute their time component,
/// numbers go through the same text rules as strings.
pub fn parse_time(cell: &CellValue) -> Option<TimeOfDay> {
    match cell {
        CellValue::Empty | CellValue::Bool(_) => None,
        CellValue::DateTime(dt) => Some(TimeOfDay::from(dt.time())),
        CellValue::Number(n) => parse_time_text(&n.to_string()),
        CellValue::Text(s) => parse_time_text(s),
    }
}

/// Parse a single line of text. Multi-line cells must be split first with
/// [`split_lines`].
pub fn parse_time_text(raw: &str) -> Option<TimeOfDay> {
    let token = raw.trim();
    if token.is_empty() || contains_absence_marker(token) {
        return None;
    }

    if let Some(caps) = CLOCK.captures(token) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        let second: u32 = match caps.get(3) {
            Some(s) => s.as_str().parse().ok()?,
            None => 0,
        };
        return TimeOfDay::from_hms(hour, minute, second);
    }

    if DAY_FRACTION.is_match(token) {
        let fraction: f64 = token.parse().ok()?;
        let minutes = (fraction * MINUTES_PER_DAY).round() as u32;
        // 0.9999.. rounds up to a full day, which is not a time of day
        return TimeOfDay::from_hms(minutes / 60, minutes % 60, 0);
    }

    if let Some(caps) = DOT_SHORTHAND.captures(token) {
        let hour: u32 = caps[1].parse().ok()?;
        let fraction = &caps[2];
        let value: u32 = fraction.parse().ok()?;
        // A single digit is tenths of an hour
        let minute = if fraction.len() == 1 { value * 6 } else { value };
        return TimeOfDay::from_hms(hour, minute, 0);
    }

    if BARE_HOUR.is_match(token) {
        let hour: u32 = token.parse().ok()?;
        return TimeOfDay::from_hms(hour, 0, 0);
    }

    None
}

/// Whether text reads like a time value, including times embedded in
/// longer text. Used to keep punch cells out of name detection.
pub fn looks_like_time(text: &str) -> bool {
    parse_time_text(text).is_some() || TIME_FRAGMENT.is_match(text)
}

/// Split a cell into its non-empty, trimmed lines.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
