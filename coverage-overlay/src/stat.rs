// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::fragment::Color;

/// Covered vs. total sites of one coverage category.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct CategoryStat {
    pub covered: u32,
    pub total: u32,
}

impl CategoryStat {
    pub fn new(covered: u32, total: u32) -> Self {
        Self { covered, total }
    }

    pub fn record(&mut self, color: Color) {
        self.total = self.total.saturating_add(1);

        if color == Color::Covered {
            self.covered = self.covered.saturating_add(1);
        }
    }

    /// Percentage rounded up, or 0 when there is nothing to cover.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }

        let covered = u64::from(self.covered) * 100;
        let total = u64::from(self.total);

        // covered <= total, so the quotient is at most 100.
        ((covered + total - 1) / total) as u32
    }
}

impl Add for CategoryStat {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            covered: self.covered.saturating_add(other.covered),
            total: self.total.saturating_add(other.total),
        }
    }
}

impl AddAssign for CategoryStat {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounds_up() {
        assert_eq!(CategoryStat::new(1, 3).percent(), 34);
        assert_eq!(CategoryStat::new(2, 3).percent(), 67);
        assert_eq!(CategoryStat::new(3, 3).percent(), 100);
        assert_eq!(CategoryStat::new(0, 7).percent(), 0);
    }

    #[test]
    fn test_percent_of_empty_category() {
        assert_eq!(CategoryStat::default().percent(), 0);
    }

    #[test]
    fn test_record() {
        let mut stat = CategoryStat::default();
        stat.record(Color::Covered);
        stat.record(Color::Uncovered);
        stat.record(Color::Covered);
        assert_eq!(stat, CategoryStat::new(2, 3));
    }

    #[test]
    fn test_sum() {
        let mut sum = CategoryStat::new(1, 2) + CategoryStat::new(0, 1);
        sum += CategoryStat::new(4, 4);
        assert_eq!(sum, CategoryStat::new(5, 7));
    }
}
