// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::{BTreeMap, BTreeSet};

use crate::fragment::{FlatFragment, Fragment};
use crate::position::{Position, Range};

/// An ordered bag of fragments that can be resolved into a non-overlapping
/// sequence.
///
/// Fragments are kept in insertion order until `normalize` is called. Where
/// fragments overlap, the segment takes the color of the highest-precedence
/// fragment (`Uncovered`, then `Covered`, then `CoveredBackground`). Among
/// fragments of equal color the one inserted first wins, and its note is kept.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CoverageCollection {
    items: Vec<Fragment>,
}

impl CoverageCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, fragment: Fragment) -> &mut Self {
        self.items.push(fragment);
        self
    }

    pub fn add_flat(&mut self, flat: FlatFragment) -> &mut Self {
        self.add(flat.into())
    }

    /// Append every fragment of `other`, after the fragments already present.
    pub fn merge(&mut self, other: &CoverageCollection) -> &mut Self {
        self.items.extend(other.items.iter().cloned());
        self
    }

    /// Resolve overlaps in place.
    ///
    /// Afterwards the fragments are sorted by start, pairwise disjoint, and
    /// adjacent fragments never share both color and note. Empty fragments are
    /// discarded. Normalizing twice is the same as normalizing once.
    pub fn normalize(&mut self) -> &mut Self {
        let items = std::mem::take(&mut self.items);
        self.items = resolve(items);
        self
    }

    pub fn items(&self) -> &[Fragment] {
        &self.items
    }

    pub fn dump(&self) -> Vec<Fragment> {
        self.items.clone()
    }
}

impl FromIterator<Fragment> for CoverageCollection {
    fn from_iter<I: IntoIterator<Item = Fragment>>(iter: I) -> Self {
        let items = iter.into_iter().collect();
        Self { items }
    }
}

// Precedence of the fragment's color, then insertion index.
type Rank = (u8, usize);

fn resolve(items: Vec<Fragment>) -> Vec<Fragment> {
    let items: Vec<Fragment> = items
        .into_iter()
        .filter(|fragment| !fragment.range.is_empty())
        .collect();

    let mut bounds: Vec<Position> = items
        .iter()
        .flat_map(|fragment| [fragment.range.start(), fragment.range.end()])
        .collect();
    bounds.sort_unstable();
    bounds.dedup();

    // Stable, so equal starts keep insertion order.
    let mut by_start: Vec<usize> = (0..items.len()).collect();
    by_start.sort_by_key(|&index| items[index].range.start());

    let mut ends: BTreeMap<Position, Vec<Rank>> = BTreeMap::new();
    let mut active: BTreeSet<Rank> = BTreeSet::new();
    let mut pending = by_start.into_iter().peekable();
    let mut resolved: Vec<Fragment> = Vec::new();

    for window in bounds.windows(2) {
        let (lo, hi) = (window[0], window[1]);

        // Every end is a boundary, so fragments retire exactly once.
        if let Some(finished) = ends.remove(&lo) {
            for rank in finished {
                active.remove(&rank);
            }
        }

        while let Some(&index) = pending.peek() {
            let fragment = &items[index];

            if fragment.range.start() > lo {
                break;
            }

            let rank = (fragment.color.precedence(), index);
            active.insert(rank);
            ends.entry(fragment.range.end()).or_default().push(rank);
            pending.next();
        }

        let Some(&(_, winner)) = active.first() else {
            continue;
        };
        let winner = &items[winner];

        if let Some(last) = resolved.last_mut() {
            if last.range.end() == lo && last.color == winner.color && last.note == winner.note {
                last.range = Range::new(last.range.start(), hi);
                continue;
            }
        }

        resolved.push(Fragment {
            range: Range::new(lo, hi),
            color: winner.color,
            note: winner.note.clone(),
        });
    }

    resolved
}
