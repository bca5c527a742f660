// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use coverage_overlay::{CategoryStat, Color, CoverageCollection, Fragment};

use super::json::{FileCoverageJson, HitCount, LocationJson};
use super::sanitize::sanitize;

/// Branch kind whose location span does not line up with its arms.
pub const SINGLE_ARM_CONDITIONAL: &str = "if";

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Category {
    Statement,
    Branch,
    Function,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Statement => "statement",
            Category::Branch => "branch",
            Category::Function => "function",
        };
        f.write_str(name)
    }
}

/// Raw counts and locations of one block id, paired index by index.
#[derive(Clone, Debug, Default)]
pub struct Block<'a> {
    pub counts: Vec<HitCount>,
    pub locations: Vec<&'a LocationJson>,
    pub note: Option<&'a str>,
}

impl Category {
    /// Extract the block of `id` from the category's tables of `file`.
    pub fn block<'a>(&self, file: &'a FileCoverageJson, id: &str) -> Block<'a> {
        match self {
            Category::Statement => Block {
                counts: file.statements.get(id).copied().into_iter().collect(),
                locations: file.statement_map.get(id).into_iter().collect(),
                note: None,
            },
            Category::Function => {
                let counts = file.functions.get(id).copied().into_iter().collect();

                let locations = match file.function_map.get(id) {
                    Some(function) if function.skip => {
                        trace!("function {} ({:?}) is skipped", id, function.name);
                        vec![]
                    }
                    Some(function) => function.loc.iter().collect(),
                    None => vec![],
                };

                Block {
                    counts,
                    locations,
                    note: None,
                }
            }
            Category::Branch => {
                let counts = file.branches.get(id).cloned().unwrap_or_default();

                match file.branch_map.get(id) {
                    Some(branch) if branch.kind == SINGLE_ARM_CONDITIONAL => {
                        trace!("branch {} has kind {:?}, ignoring arms", id, branch.kind);
                        Block {
                            counts,
                            locations: vec![],
                            note: None,
                        }
                    }
                    Some(branch) => Block {
                        counts,
                        locations: branch.locations.iter().collect(),
                        note: (!branch.kind.is_empty()).then_some(branch.kind.as_str()),
                    },
                    None => Block {
                        counts,
                        ..Block::default()
                    },
                }
            }
        }
    }

    /// Block ids of the category's count table, in natural order.
    pub fn ids<'a>(&self, file: &'a FileCoverageJson) -> Vec<&'a str> {
        let mut ids: Vec<&str> = match self {
            Category::Statement => keys(&file.statements),
            Category::Branch => keys(&file.branches),
            Category::Function => keys(&file.functions),
        };
        ids.sort_by(|a, b| natural_order(a, b));
        ids
    }
}

fn keys<V>(map: &BTreeMap<String, V>) -> Vec<&str> {
    map.keys().map(String::as_str).collect()
}

// Integer-like ids first, by value, then everything else lexically.
fn natural_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Retained fragments of one category, with their statistics.
#[derive(Clone, Debug, Default)]
pub struct CategoryCoverage {
    pub collection: CoverageCollection,
    pub stat: CategoryStat,
}

impl CategoryCoverage {
    pub fn map(category: Category, file: &FileCoverageJson) -> Self {
        let mut coverage = Self::default();

        for id in category.ids(file) {
            let block = category.block(file, id);
            coverage.add_block(category, id, block);
        }

        coverage
    }

    fn add_block(&mut self, category: Category, id: &str, block: Block<'_>) {
        if block.counts.len() != block.locations.len() {
            debug!(
                "dropping {} {}: {} counts for {} locations",
                category,
                id,
                block.counts.len(),
                block.locations.len()
            );
            return;
        }

        for (arm, (location, count)) in block.locations.iter().zip(&block.counts).enumerate() {
            let range = match sanitize(location) {
                Ok(range) => range,
                Err(reason) => {
                    trace!("dropping {} {} arm {}: {}", category, id, arm, reason);
                    continue;
                }
            };

            let color = Color::from_count(*count);
            self.stat.record(color);

            let fragment = Fragment::new(range, color).with_note(block.note.map(str::to_owned));
            self.collection.add(fragment);
        }
    }
}
