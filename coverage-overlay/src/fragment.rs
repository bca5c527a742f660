// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use serde::{Deserialize, Serialize};

use crate::position::Range;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Covered,
    Uncovered,
    CoveredBackground,
}

impl Color {
    /// Color of a site executed `count` times.
    pub fn from_count(count: i64) -> Self {
        if count > 0 {
            Color::Covered
        } else {
            Color::Uncovered
        }
    }

    /// Rank used when fragments overlap. Lower wins.
    pub(crate) fn precedence(&self) -> u8 {
        match self {
            Color::Uncovered => 0,
            Color::Covered => 1,
            Color::CoveredBackground => 2,
        }
    }
}

/// A colored span of source text.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Fragment {
    pub range: Range,
    pub color: Color,

    /// Free-form annotation, e.g. the kind of branch the fragment came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Fragment {
    pub fn new(range: Range, color: Color) -> Self {
        Self {
            range,
            color,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<Option<String>>) -> Self {
        self.note = note.into();
        self
    }
}

/// A line-only fragment. Columns are ignored; it always spans whole lines.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlatFragment {
    pub start_line: u32,
    pub end_line: u32,
    pub color: Color,
    pub note: Option<String>,
}

impl FlatFragment {
    /// Background wash for the lines touched by `fragment`.
    pub fn background(fragment: &Fragment) -> Self {
        Self {
            start_line: fragment.range.start().line,
            end_line: fragment.range.end().line,
            color: Color::CoveredBackground,
            note: fragment.note.clone(),
        }
    }
}

impl From<FlatFragment> for Fragment {
    fn from(flat: FlatFragment) -> Self {
        let range = Range::lines(flat.start_line, flat.end_line);
        Fragment::new(range, flat.color).with_note(flat.note)
    }
}
