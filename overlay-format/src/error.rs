// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use thiserror::Error;

/// Failure to read a coverage document at all.
///
/// Inconsistent entries inside a well-formed document are not errors; they are
/// dropped while building the report.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("coverage document is not a valid report")]
    InvalidDocument(#[from] serde_json::Error),
}
