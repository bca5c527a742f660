// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! # coverage-overlay
//!
//! Data model for painting coverage onto source text. A `Fragment` is a colored
//! `Range` of a source file. Fragments produced by a coverage parser may overlap
//! freely; a `CoverageCollection` resolves them into a deterministic,
//! non-overlapping sequence that a renderer can apply directly.
//!
//! Line numbers in this crate are 0-based. Columns are 0-based offsets, or
//! `Column::EndOfLine` when a range runs to the end of its last line.

pub mod collection;
pub mod fragment;
pub mod position;
pub mod stat;

pub use collection::CoverageCollection;
pub use fragment::{Color, FlatFragment, Fragment};
pub use position::{Column, Position, Range};
pub use stat::CategoryStat;
