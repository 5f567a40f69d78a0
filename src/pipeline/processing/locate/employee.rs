use std::ops::Range;

use crate::constants::{
    INTERN_DEPARTMENT_TOKENS, NAME_DENYLIST, PERMANENT_DEPARTMENT_TOKENS, STRICT_NAME_DENYLIST,
};
use crate::domain::{Category, EmployeeIdentity, RawGrid};
use crate::pipeline::processing::profile::StrictnessProfile;
use crate::pipeline::processing::time_token::{contains_absence_marker, looks_like_time};

const MIN_NAME_CHARS: usize = 2;
const MAX_NAME_CHARS: usize = 30;

// Labels that introduce a name in "Nama : Budi" style cells
const NAME_LABELS: &[&str] = &["nama", "name", "employee", "karyawan"];

/// Scan the top-left window of a sheet for the employee's name and
/// department. Returns `None` when no name is found; a missing department
/// only leaves the category as `Unknown`.
pub fn locate_employee(
    grid: &RawGrid,
    profile: &StrictnessProfile,
    column_hint: Option<Range<usize>>,
) -> Option<EmployeeIdentity> {
    let cols = column_hint.unwrap_or(0..profile.employee_cols);
    let rows = profile.employee_rows.min(grid.row_count());

    let mut name: Option<String> = None;
    let mut category: Option<Category> = None;

    'scan: for row in 0..rows {
        for col in cols.clone() {
            let text = grid.text(row, col);
            if text.is_empty() {
                continue;
            }
            if category.is_none() {
                category = department_category(&text);
            }
            if name.is_none() {
                name = name_candidate(&text, profile.strict_denylist);
            }
            if name.is_some() && category.is_some() {
                break 'scan;
            }
        }
    }

    name.map(|display_name| EmployeeIdentity {
        display_name,
        category: category.unwrap_or(Category::Unknown),
    })
}

/// Classify a department token; R&D means intern, Office means permanent.
pub fn department_category(text: &str) -> Option<Category> {
    let lower = text.to_lowercase();
    if INTERN_DEPARTMENT_TOKENS.iter().any(|t| lower.contains(t)) {
        Some(Category::Intern)
    } else if PERMANENT_DEPARTMENT_TOKENS.iter().any(|t| lower.contains(t)) {
        Some(Category::Permanent)
    } else {
        None
    }
}

/// Accept a cell as a display name, unwrapping `Label: value` cells first.
pub fn name_candidate(text: &str, strict: bool) -> Option<String> {
    let candidate = labeled_value(text).unwrap_or(text).trim();
    let chars = candidate.chars().count();

    if !(MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&chars) {
        return None;
    }
    if !candidate.chars().any(char::is_alphabetic) {
        return None;
    }
    if candidate.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    if candidate.parse::<i64>().is_ok() || looks_like_time(candidate) {
        return None;
    }
    if contains_absence_marker(candidate) || is_denylisted(candidate, strict) {
        return None;
    }
    // All-caps cells are headers, not names
    if candidate == candidate.to_uppercase() {
        return None;
    }

    Some(candidate.to_string())
}

fn labeled_value(text: &str) -> Option<&str> {
    let (label, value) = text.split_once(':')?;
    let label = label.trim().to_lowercase();
    if NAME_LABELS.iter().any(|l| label.contains(l)) {
        Some(value)
    } else {
        None
    }
}

fn is_denylisted(candidate: &str, strict: bool) -> bool {
    let lower = candidate.to_lowercase();
    lower
        .split(|c: char| !(c.is_alphanumeric() || c == '&'))
        .filter(|word| !word.is_empty())
        .any(|word| {
            NAME_DENYLIST.contains(&word) || (strict && STRICT_NAME_DENYLIST.contains(&word))
        })
}
