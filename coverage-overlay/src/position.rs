// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Column of a `Position`.
///
/// `EndOfLine` sorts after every concrete column of the same line.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Column {
    At(u32),
    EndOfLine,
}

impl Serialize for Column {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Column::At(offset) => serializer.serialize_u32(*offset),
            Column::EndOfLine => serializer.serialize_str(END_OF_LINE),
        }
    }
}

impl<'de> Deserialize<'de> for Column {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            At(u32),
            Marker(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::At(offset) => Ok(Column::At(offset)),
            Repr::Marker(marker) if marker == END_OF_LINE => Ok(Column::EndOfLine),
            Repr::Marker(other) => Err(serde::de::Error::custom(format!(
                "expected column offset or \"{END_OF_LINE}\", got \"{other}\""
            ))),
        }
    }
}

const END_OF_LINE: &str = "eol";

/// A 0-based line and a column on it.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: Column,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self {
            line,
            column: Column::At(column),
        }
    }

    pub fn end_of_line(line: u32) -> Self {
        Self {
            line,
            column: Column::EndOfLine,
        }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        let line_cmp = self.line.cmp(&other.line);

        if line_cmp != Ordering::Equal {
            return line_cmp;
        }

        self.column.cmp(&other.column)
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A span of source text. `start <= end` is guaranteed by every constructor.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Range {
    start: Position,
    end: Position,
}

impl Range {
    /// Build a range from two endpoints given in either order.
    pub fn new(a: Position, b: Position) -> Self {
        let (start, end) = ordered(a, b);
        Self { start, end }
    }

    /// Whole-line span covering lines `start..=end`.
    pub fn lines(start: u32, end: u32) -> Self {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        Self {
            start: Position::new(start, 0),
            end: Position::end_of_line(end),
        }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn extends_to_end_of_line(&self) -> bool {
        self.end.column == Column::EndOfLine
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos < self.end
    }
}

impl<'de> Deserialize<'de> for Range {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Repr {
            start: Position,
            end: Position,
        }

        let repr = Repr::deserialize(deserializer)?;
        Ok(Range::new(repr.start, repr.end))
    }
}

/// Return the two positions in ascending order.
pub fn ordered(a: Position, b: Position) -> (Position, Position) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_end_of_line_sorts_last() {
        assert!(Position::new(3, 1000) < Position::end_of_line(3));
        assert!(Position::end_of_line(3) < Position::new(4, 0));
        assert!(Position::new(2, 9) < Position::new(3, 0));
    }

    #[test]
    fn test_range_orders_endpoints() {
        let range = Range::new(Position::new(4, 2), Position::new(1, 7));
        assert_eq!(range.start(), Position::new(1, 7));
        assert_eq!(range.end(), Position::new(4, 2));

        let same_line = Range::new(Position::new(1, 9), Position::new(1, 3));
        assert_eq!(same_line.start(), Position::new(1, 3));
        assert_eq!(same_line.end(), Position::new(1, 9));
    }

    #[test]
    fn test_whole_line_range() {
        let range = Range::lines(5, 2);
        assert_eq!(range.start(), Position::new(2, 0));
        assert_eq!(range.end(), Position::end_of_line(5));
        assert!(range.extends_to_end_of_line());
        assert!(range.contains(Position::new(5, 4000)));
        assert!(!range.contains(Position::new(6, 0)));
    }

    #[test]
    fn test_column_json() -> anyhow::Result<()> {
        let range = Range::new(Position::new(0, 3), Position::end_of_line(1));
        let value = serde_json::to_value(range)?;
        assert_eq!(
            value,
            json!({
                "start": { "line": 0, "column": 3 },
                "end": { "line": 1, "column": "eol" },
            })
        );

        let back: Range = serde_json::from_value(value)?;
        assert_eq!(back, range);

        let bad = serde_json::from_value::<Column>(json!("middle"));
        assert!(bad.is_err());

        Ok(())
    }
}
