// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use coverage_overlay::{Color, CoverageCollection, FlatFragment};

use super::category::CategoryCoverage;
use crate::report::CoverageSummary;

/// Result of combining the three categories of one file.
#[derive(Clone, Debug)]
pub struct Composed {
    pub coverage: CoverageCollection,
    pub summary: CoverageSummary,
}

/// Merge branch, statement and function fragments, in that order, and add a
/// whole-line background under every covered fragment.
pub fn compose(
    branches: &CategoryCoverage,
    statements: &CategoryCoverage,
    functions: &CategoryCoverage,
) -> Composed {
    let mut coverage = CoverageCollection::new();
    coverage
        .merge(&branches.collection)
        .merge(&statements.collection)
        .merge(&functions.collection)
        .normalize();

    let background = background_layer(&coverage);
    coverage.merge(&background).normalize();

    let summary = CoverageSummary {
        statements: statements.stat,
        branches: branches.stat,
        functions: functions.stat,
    };

    Composed { coverage, summary }
}

/// Line-level `CoveredBackground` wash of the covered fragments of a
/// normalized collection.
pub fn background_layer(coverage: &CoverageCollection) -> CoverageCollection {
    let mut background = CoverageCollection::new();

    for fragment in coverage.items() {
        if fragment.color == Color::Covered {
            background.add_flat(FlatFragment::background(fragment));
        }
    }

    background.normalize();
    background
}
