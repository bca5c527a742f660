// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

use coverage_overlay::{Column, Position, Range};

use super::json::LocationJson;

/// Why a location produced no fragment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Dropped {
    /// A line before the first line of the file.
    InvalidLine,

    /// A negative column that could not be repaired.
    NegativeColumn,

    /// Excluded by the reporter, e.g. by an ignore pragma.
    Skipped,

    /// A coordinate too large to represent.
    OutOfRange,
}

impl fmt::Display for Dropped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Dropped::InvalidLine => "invalid line",
            Dropped::NegativeColumn => "negative column",
            Dropped::Skipped => "skipped",
            Dropped::OutOfRange => "coordinate out of range",
        };
        f.write_str(reason)
    }
}

/// Turn a reporter location into a 0-based, ordered `Range`.
///
/// Reporters are known to emit a few inconsistent shapes, which are repaired
/// here instead of rejected:
///
/// - `0..-1` columns mark a zero-width site and become `0..1`.
/// - An end column of 0 after a non-zero start column means "to the end of the
///   line".
/// - Endpoints given in reverse order are swapped.
/// - A range that is still empty is widened to one column, so every retained
///   site stays visible.
pub fn sanitize(location: &LocationJson) -> Result<Range, Dropped> {
    let LocationJson { start, end, skip } = location;

    if start.line < 1 || end.line < 1 {
        return Err(Dropped::InvalidLine);
    }

    let (start_column, end_column) = if start.column == 0 && end.column < 0 {
        (0, RawColumn::At(1))
    } else if start.column != 0 && end.column == 0 {
        (start.column, RawColumn::EndOfLine)
    } else {
        (start.column, RawColumn::At(end.column))
    };

    if start_column < 0 || end_column.is_negative() {
        return Err(Dropped::NegativeColumn);
    }

    if *skip {
        return Err(Dropped::Skipped);
    }

    let start = Position::new(zero_based(start.line)?, offset(start_column)?);
    let mut end = Position {
        line: zero_based(end.line)?,
        column: end_column.into_column()?,
    };

    // Start columns are always concrete, so an empty range ends at one too.
    if let (true, Column::At(column)) = (start == end, end.column) {
        let widened = column.checked_add(1).ok_or(Dropped::OutOfRange)?;
        end.column = Column::At(widened);
    }

    Ok(Range::new(start, end))
}

#[derive(Clone, Copy, Debug)]
enum RawColumn {
    At(i64),
    EndOfLine,
}

impl RawColumn {
    fn is_negative(&self) -> bool {
        matches!(self, RawColumn::At(column) if *column < 0)
    }

    fn into_column(self) -> Result<Column, Dropped> {
        match self {
            RawColumn::At(column) => Ok(Column::At(offset(column)?)),
            RawColumn::EndOfLine => Ok(Column::EndOfLine),
        }
    }
}

fn zero_based(line: i64) -> Result<u32, Dropped> {
    u32::try_from(line - 1).map_err(|_| Dropped::OutOfRange)
}

fn offset(column: i64) -> Result<u32, Dropped> {
    u32::try_from(column).map_err(|_| Dropped::OutOfRange)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn location(value: serde_json::Value) -> LocationJson {
        serde_json::from_value(value).unwrap()
    }

    fn span(start: (u32, u32), end: (u32, u32)) -> Range {
        Range::new(
            Position::new(start.0, start.1),
            Position::new(end.0, end.1),
        )
    }

    #[test]
    fn test_lines_become_zero_based() {
        let loc = location(json!({
            "start": { "line": 1, "column": 0 },
            "end": { "line": 3, "column": 5 },
        }));

        assert_eq!(sanitize(&loc), Ok(span((0, 0), (2, 5))));
    }

    #[test]
    fn test_invalid_lines_are_dropped() {
        for (start, end) in [(0, 1), (1, 0), (-4, 2), (0, 0)] {
            let loc = location(json!({
                "start": { "line": start, "column": 1 },
                "end": { "line": end, "column": 4 },
            }));

            assert_eq!(sanitize(&loc), Err(Dropped::InvalidLine));
        }
    }

    #[test]
    fn test_zero_width_marker_is_widened() {
        let loc = location(json!({
            "start": { "line": 7, "column": 0 },
            "end": { "line": 7, "column": -1 },
        }));

        assert_eq!(sanitize(&loc), Ok(span((6, 0), (6, 1))));
    }

    #[test]
    fn test_zero_end_column_extends_to_end_of_line() {
        let loc = location(json!({
            "start": { "line": 2, "column": 4 },
            "end": { "line": 5, "column": 0 },
        }));

        let range = sanitize(&loc).unwrap();
        assert_eq!(range.start(), Position::new(1, 4));
        assert_eq!(range.end(), Position::end_of_line(4));
        assert!(range.extends_to_end_of_line());
    }

    #[test]
    fn test_zero_start_column_keeps_zero_end_column() {
        let loc = location(json!({
            "start": { "line": 2, "column": 0 },
            "end": { "line": 3, "column": 0 },
        }));

        assert_eq!(sanitize(&loc), Ok(span((1, 0), (2, 0))));
    }

    #[test]
    fn test_empty_range_is_widened() {
        let at_line_start = location(json!({
            "start": { "line": 3, "column": 0 },
            "end": { "line": 3, "column": 0 },
        }));
        assert_eq!(sanitize(&at_line_start), Ok(span((2, 0), (2, 1))));

        let mid_line = location(json!({
            "start": { "line": 4, "column": 4 },
            "end": { "line": 4, "column": 4 },
        }));
        assert_eq!(sanitize(&mid_line), Ok(span((3, 4), (3, 5))));

        let at_limit = location(json!({
            "start": { "line": 1, "column": u32::MAX },
            "end": { "line": 1, "column": u32::MAX },
        }));
        assert_eq!(sanitize(&at_limit), Err(Dropped::OutOfRange));
    }

    #[test]
    fn test_null_end_column_extends_to_end_of_line() {
        let loc = location(json!({
            "start": { "line": 2, "column": 4 },
            "end": { "line": 2, "column": null },
        }));

        assert_eq!(sanitize(&loc).map(|r| r.end()), Ok(Position::end_of_line(1)));
    }

    #[test]
    fn test_negative_columns_are_dropped() {
        let negative_start = location(json!({
            "start": { "line": 1, "column": -2 },
            "end": { "line": 1, "column": 0 },
        }));
        assert_eq!(sanitize(&negative_start), Err(Dropped::NegativeColumn));

        let negative_end = location(json!({
            "start": { "line": 1, "column": 3 },
            "end": { "line": 1, "column": -1 },
        }));
        assert_eq!(sanitize(&negative_end), Err(Dropped::NegativeColumn));
    }

    #[test]
    fn test_skipped_location_is_dropped() {
        let loc = location(json!({
            "start": { "line": 1, "column": 0 },
            "end": { "line": 1, "column": 9 },
            "skip": true,
        }));

        assert_eq!(sanitize(&loc), Err(Dropped::Skipped));
    }

    #[test]
    fn test_reversed_endpoints_are_swapped() {
        let same_line = location(json!({
            "start": { "line": 4, "column": 12 },
            "end": { "line": 4, "column": 3 },
        }));
        assert_eq!(sanitize(&same_line), Ok(span((3, 3), (3, 12))));

        let across_lines = location(json!({
            "start": { "line": 9, "column": 1 },
            "end": { "line": 6, "column": 8 },
        }));
        assert_eq!(sanitize(&across_lines), Ok(span((5, 8), (8, 1))));
    }

    #[test]
    fn test_huge_coordinates_are_dropped() {
        let loc = location(json!({
            "start": { "line": 1, "column": 0 },
            "end": { "line": 1, "column": 1_i64 << 40 },
        }));

        assert_eq!(sanitize(&loc), Err(Dropped::OutOfRange));
    }
}
