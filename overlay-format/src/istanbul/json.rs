// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Records of an istanbul `coverage-final.json` document.
//!
//! See https://github.com/gotwarlost/istanbul/blob/master/coverage.json.md

use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::Deserialize;

pub type BlockId = String;
pub type HitCount = i64;

/// Document root: arbitrary entry keys, one entry per source file.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct IstanbulJson {
    pub files: BTreeMap<String, FileCoverageJson>,
}

#[derive(Debug, Deserialize)]
pub struct FileCoverageJson {
    pub path: String,

    /// Per-line counts written by older reporters. Never read.
    #[serde(rename = "l", default)]
    pub legacy_lines: Option<IgnoredAny>,

    #[serde(rename = "s", default)]
    pub statements: BTreeMap<BlockId, HitCount>,

    #[serde(rename = "statementMap", default)]
    pub statement_map: BTreeMap<BlockId, LocationJson>,

    #[serde(rename = "b", default)]
    pub branches: BTreeMap<BlockId, Vec<HitCount>>,

    #[serde(rename = "branchMap", default)]
    pub branch_map: BTreeMap<BlockId, BranchJson>,

    #[serde(rename = "f", default)]
    pub functions: BTreeMap<BlockId, HitCount>,

    #[serde(rename = "fnMap", default)]
    pub function_map: BTreeMap<BlockId, FunctionJson>,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub struct PositionJson {
    /// 1-indexed. Missing or `null` reads as 0.
    #[serde(default, with = "nullable")]
    pub line: i64,

    /// 0-indexed. Missing or `null` reads as 0.
    #[serde(default, with = "nullable")]
    pub column: i64,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct LocationJson {
    pub start: PositionJson,
    pub end: PositionJson,

    #[serde(default)]
    pub skip: bool,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct BranchJson {
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub locations: Vec<LocationJson>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct FunctionJson {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub loc: Option<LocationJson>,

    #[serde(default)]
    pub skip: bool,
}

mod nullable {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<i64>::deserialize(deserializer)?;
        Ok(value.unwrap_or_default())
    }
}
