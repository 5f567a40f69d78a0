use crate::constants::{
    CHECK_IN_LABELS, CHECK_IN_WORDS, CHECK_OUT_LABELS, CHECK_OUT_WORDS, FIRST_SHIFT_LABEL,
    SECOND_SHIFT_LABEL,
};
use crate::domain::RawGrid;
use crate::pipeline::processing::profile::StrictnessProfile;
use crate::pipeline::processing::time_token::looks_like_time;

/// How the punch rows were decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunchRowSource {
    /// "Jam Kerja 1" / "Jam Kerja 2" rows carrying "Masuk"
    ShiftLabels,
    /// Single keyword labels, possibly mixed with positional defaults
    Keywords,
    /// Rows directly below the calendar row
    Positional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PunchRows {
    pub check_in_row: usize,
    pub check_out_row: usize,
    pub source: PunchRowSource,
}

#[derive(Default)]
struct LabelHits {
    shift_in: Option<usize>,
    shift_out: Option<usize>,
    keyword_in: Option<usize>,
    keyword_out: Option<usize>,
}

/// Decide which rows hold check-in and check-out values.
///
/// Starts from the rows right below the calendar row and lets labels found
/// near it override that guess. Profiles with `require_labels` return `None`
/// unless both rows are labelled.
pub fn locate_punch_rows(
    grid: &RawGrid,
    calendar_row: usize,
    profile: &StrictnessProfile,
) -> Option<PunchRows> {
    let hits = scan_labels(grid, calendar_row, profile);

    if let (Some(check_in_row), Some(check_out_row)) = (hits.shift_in, hits.shift_out) {
        return Some(PunchRows {
            check_in_row,
            check_out_row,
            source: PunchRowSource::ShiftLabels,
        });
    }

    let labelled_in = hits.shift_in.or(hits.keyword_in);
    let labelled_out = hits.shift_out.or(hits.keyword_out);

    if profile.require_labels && (labelled_in.is_none() || labelled_out.is_none()) {
        return None;
    }

    let check_in_row = labelled_in.unwrap_or(calendar_row + 1);
    let mut check_out_row = labelled_out.unwrap_or(calendar_row + 2);

    // A lone label may land on the other row's default; push the unlabelled
    // check-out row below it. Two labels on one row mean combined cells.
    if check_in_row == check_out_row && labelled_out.is_none() {
        check_out_row = check_in_row + 1;
    }

    let source = if labelled_in.is_some() || labelled_out.is_some() {
        PunchRowSource::Keywords
    } else {
        PunchRowSource::Positional
    };

    Some(PunchRows {
        check_in_row,
        check_out_row,
        source,
    })
}

fn scan_labels(grid: &RawGrid, calendar_row: usize, profile: &StrictnessProfile) -> LabelHits {
    let first = calendar_row.saturating_sub(profile.label_rows_above);
    let last = calendar_row + profile.label_rows_below;
    let mut hits = LabelHits::default();

    for row in (first..=last).filter(|r| *r != calendar_row) {
        let cells: Vec<String> = (0..profile.calendar_cols)
            .map(|col| grid.text(row, col))
            .filter(|text| !text.is_empty() && !looks_like_time(text))
            .map(|text| text.to_lowercase())
            .collect();
        if cells.is_empty() {
            continue;
        }

        let joined = cells.join(" ");
        let has_masuk = cells.iter().any(|c| c.contains("masuk"));

        if hits.shift_in.is_none() && has_masuk && joined.contains(FIRST_SHIFT_LABEL) {
            hits.shift_in = Some(row);
        }
        if hits.shift_out.is_none() && has_masuk && joined.contains(SECOND_SHIFT_LABEL) {
            hits.shift_out = Some(row);
        }
        if hits.keyword_in.is_none()
            && cells.iter().any(|c| is_label(c, CHECK_IN_LABELS, CHECK_IN_WORDS))
        {
            hits.keyword_in = Some(row);
        }
        if hits.keyword_out.is_none()
            && cells.iter().any(|c| is_label(c, CHECK_OUT_LABELS, CHECK_OUT_WORDS))
        {
            hits.keyword_out = Some(row);
        }
    }

    hits
}

// Substring labels match anywhere; short words ("in", "out") only as whole words
fn is_label(cell: &str, substrings: &[&str], words: &[&str]) -> bool {
    substrings.iter().any(|s| cell.contains(s))
        || cell
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| words.contains(&word))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(cells: &[(usize, usize, &str)]) -> RawGrid {
        let mut grid = RawGrid::default();
        for (row, col, text) in cells {
            grid.set(*row, *col, *text);
        }
        grid
    }

    #[test]
    fn positional_default_without_labels() {
        let grid = grid_with(&[(10, 2, "1"), (11, 2, "08:00"), (12, 2, "17:00")]);
        let rows = locate_punch_rows(&grid, 10, &StrictnessProfile::basic()).unwrap();
        assert_eq!((rows.check_in_row, rows.check_out_row), (11, 12));
        assert_eq!(rows.source, PunchRowSource::Positional);
    }

    #[test]
    fn keyword_labels_override_positions() {
        let grid = grid_with(&[
            (10, 0, "Tanggal"),
            (12, 0, "Jam Masuk"),
            (14, 0, "Jam Pulang"),
            (12, 2, "08:00"),
        ]);
        let rows = locate_punch_rows(&grid, 10, &StrictnessProfile::basic()).unwrap();
        assert_eq!((rows.check_in_row, rows.check_out_row), (12, 14));
        assert_eq!(rows.source, PunchRowSource::Keywords);
    }

    #[test]
    fn english_words_match_whole_words_only() {
        let grid = grid_with(&[(11, 0, "Senin"), (12, 0, "Check In"), (13, 0, "Check Out")]);
        let rows = locate_punch_rows(&grid, 10, &StrictnessProfile::basic()).unwrap();
        assert_eq!((rows.check_in_row, rows.check_out_row), (12, 13));
    }

    #[test]
    fn lone_check_in_label_pushes_default_check_out_down() {
        let grid = grid_with(&[(12, 0, "Masuk")]);
        let rows = locate_punch_rows(&grid, 10, &StrictnessProfile::basic()).unwrap();
        assert_eq!((rows.check_in_row, rows.check_out_row), (12, 13));
    }

    #[test]
    fn shift_labels_take_precedence() {
        let grid = grid_with(&[
            (11, 0, "Masuk"),
            (12, 0, "Jam Kerja 1"),
            (12, 1, "Masuk"),
            (13, 0, "Jam Kerja 2"),
            (13, 1, "Masuk"),
            (14, 0, "Pulang"),
        ]);
        let rows = locate_punch_rows(&grid, 10, &StrictnessProfile::strict()).unwrap();
        assert_eq!((rows.check_in_row, rows.check_out_row), (12, 13));
        assert_eq!(rows.source, PunchRowSource::ShiftLabels);
    }

    #[test]
    fn strict_profile_needs_labels() {
        let unlabeled = grid_with(&[(11, 2, "08:00"), (12, 2, "17:00")]);
        assert!(locate_punch_rows(&unlabeled, 10, &StrictnessProfile::strict()).is_none());

        let half = grid_with(&[(11, 0, "Masuk")]);
        assert!(locate_punch_rows(&half, 10, &StrictnessProfile::strict()).is_none());

        let labeled = grid_with(&[(11, 0, "Masuk"), (12, 0, "Pulang")]);
        assert!(locate_punch_rows(&labeled, 10, &StrictnessProfile::strict()).is_some());
    }

    #[test]
    fn labels_outside_window_are_ignored() {
        let grid = grid_with(&[(7, 0, "Masuk"), (16, 0, "Pulang")]);
        let rows = locate_punch_rows(&grid, 10, &StrictnessProfile::basic()).unwrap();
        assert_eq!((rows.check_in_row, rows.check_out_row), (11, 12));
    }

    #[test]
    fn labels_above_calendar_row_count() {
        let grid = grid_with(&[(8, 0, "Masuk"), (9, 0, "Pulang")]);
        let rows = locate_punch_rows(&grid, 10, &StrictnessProfile::basic()).unwrap();
        assert_eq!((rows.check_in_row, rows.check_out_row), (8, 9));
    }
}
