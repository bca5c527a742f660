// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::ParseError;
use crate::parser::{CoverageParser, ParserInfo};
use crate::report::FileReport;

pub mod category;
pub mod compose;
pub mod json;
pub mod sanitize;

use category::{Category, CategoryCoverage};
use json::{FileCoverageJson, IstanbulJson};

/// Parser for istanbul `coverage-final.json` documents.
#[derive(Clone, Debug)]
pub struct IstanbulParser {
    content: String,
    folder: PathBuf,
}

impl IstanbulParser {
    pub const INFO: ParserInfo = ParserInfo {
        name: "istanbul",
        priority: 20,
        has_background: true,
    };

    /// `folder` is the base for relative file paths in the document.
    pub fn new(content: impl Into<String>, folder: impl AsRef<Path>) -> Self {
        Self {
            content: content.into(),
            folder: folder.as_ref().to_owned(),
        }
    }

    /// Whether a file with extension `ext` starting with `first_chunk` looks
    /// like an istanbul report.
    pub fn test_format(ext: &str, first_chunk: &str) -> bool {
        let ext = ext.strip_prefix('.').unwrap_or(ext);

        if !ext.eq_ignore_ascii_case("json") {
            return false;
        }

        first_chunk.contains(r#""path":"#)
    }

    /// Build one report per file entry of the document.
    pub fn parse(&self) -> Result<Vec<FileReport>, ParseError> {
        let json: IstanbulJson = serde_json::from_str(&self.content)?;

        let reports = json
            .files
            .values()
            .map(|file| self.file_report(file))
            .collect();

        Ok(reports)
    }

    fn file_report(&self, file: &FileCoverageJson) -> FileReport {
        let file_path = self.resolve(&file.path);

        let statements = CategoryCoverage::map(Category::Statement, file);
        let branches = CategoryCoverage::map(Category::Branch, file);
        let functions = CategoryCoverage::map(Category::Function, file);

        let composed = compose::compose(&branches, &statements, &functions);
        let report = FileReport::new(file_path, composed.summary, composed.coverage.dump());

        debug!(
            "{}: {} ({} fragments)",
            report.file_path.display(),
            report.label,
            report.fragments.len()
        );

        report
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);

        if path.is_absolute() {
            path.to_owned()
        } else {
            self.folder.join(path)
        }
    }
}

#[async_trait]
impl CoverageParser for IstanbulParser {
    fn info(&self) -> ParserInfo {
        Self::INFO
    }

    async fn report(&self) -> Result<Vec<FileReport>, ParseError> {
        self.parse()
    }
}
