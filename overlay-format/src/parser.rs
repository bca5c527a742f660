// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use async_trait::async_trait;

use crate::error::ParseError;
use crate::report::FileReport;

/// Identifies a parser to whatever merges reports from several formats.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParserInfo {
    pub name: &'static str,

    /// Higher priorities are tried, and merged, first.
    pub priority: u32,

    /// Whether reports carry a `CoveredBackground` line layer.
    pub has_background: bool,
}

#[async_trait]
pub trait CoverageParser: Send + Sync {
    fn info(&self) -> ParserInfo;

    async fn report(&self) -> Result<Vec<FileReport>, ParseError>;
}
