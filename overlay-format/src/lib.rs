// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#[macro_use]
extern crate log;

pub mod error;
pub mod istanbul;
pub mod parser;
pub mod report;

pub use error::ParseError;
pub use istanbul::IstanbulParser;
pub use parser::{CoverageParser, ParserInfo};
pub use report::{CoverageSummary, FileReport};
