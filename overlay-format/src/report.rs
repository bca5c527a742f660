// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::path::PathBuf;

use coverage_overlay::{CategoryStat, Fragment};
use serde::Serialize;

/// Per-category statistics of one source file.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct CoverageSummary {
    pub statements: CategoryStat,
    pub branches: CategoryStat,
    pub functions: CategoryStat,
}

impl CoverageSummary {
    pub fn overall(&self) -> CategoryStat {
        self.statements + self.branches + self.functions
    }

    pub fn label(&self) -> String {
        format!("{}%", self.overall().percent())
    }

    pub fn tooltip(&self) -> String {
        let rows = [
            ("Statements", self.statements),
            ("Branches", self.branches),
            ("Functions", self.functions),
        ];

        rows.iter()
            .map(|(title, stat)| {
                format!(
                    "{}: {}% ({}/{})",
                    title,
                    stat.percent(),
                    stat.covered,
                    stat.total
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Coverage of one source file, ready to overlay on its text.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FileReport {
    /// Absolute path to the source file.
    pub file_path: PathBuf,
    pub label: String,
    pub tooltip: String,
    pub summary: CoverageSummary,

    /// Non-overlapping, ordered by start.
    pub fragments: Vec<Fragment>,
}

impl FileReport {
    pub fn new(
        file_path: impl Into<PathBuf>,
        summary: CoverageSummary,
        fragments: Vec<Fragment>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            label: summary.label(),
            tooltip: summary.tooltip(),
            summary,
            fragments,
        }
    }
}
