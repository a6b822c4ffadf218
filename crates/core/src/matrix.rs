//! The per-employee daily completion matrix.
//!
//! Maps `month -> day -> set of completed activity ids` for one employee and
//! one calendar year. The matrix is derived fresh from the raw sources on
//! every aggregation request and never persisted.

use std::collections::{HashMap, HashSet};

use crate::types::ActivityId;

/// Transient completion matrix for one employee and one year.
///
/// Marking is idempotent: multiple source signals for the same
/// `(month, day, activity)` tuple collapse to one entry.
#[derive(Debug, Clone, Default)]
pub struct CompletionMatrix {
    months: HashMap<u32, HashMap<u32, HashSet<ActivityId>>>,
}

impl CompletionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an activity complete on a given day.
    ///
    /// Returns `true` if the tuple was newly inserted, `false` for a repeat
    /// mark or an out-of-range month/day (both are no-ops).
    pub fn mark(&mut self, month: u32, day: u32, activity: ActivityId) -> bool {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return false;
        }
        self.months
            .entry(month)
            .or_default()
            .entry(day)
            .or_default()
            .insert(activity)
    }

    /// Number of distinct days in a month on which the activity was marked.
    pub fn distinct_days(&self, month: u32, activity: ActivityId) -> u32 {
        self.months
            .get(&month)
            .map(|days| {
                days.values().filter(|set| set.contains(activity)).count() as u32
            })
            .unwrap_or(0)
    }

    /// Whether any day of the month has any marked activity.
    pub fn has_month(&self, month: u32) -> bool {
        self.months
            .get(&month)
            .is_some_and(|days| days.values().any(|set| !set.is_empty()))
    }

    pub fn is_empty(&self) -> bool {
        !(1..=12).any(|m| self.has_month(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_is_idempotent() {
        let mut matrix = CompletionMatrix::new();
        assert!(matrix.mark(3, 15, "shalat_berjamaah"));
        assert!(!matrix.mark(3, 15, "shalat_berjamaah"));
        assert_eq!(matrix.distinct_days(3, "shalat_berjamaah"), 1);
    }

    #[test]
    fn test_distinct_days_counts_days_not_signals() {
        let mut matrix = CompletionMatrix::new();
        for day in 1..=15 {
            matrix.mark(3, day, "shalat_berjamaah");
        }
        // A second signal for a day already marked changes nothing.
        matrix.mark(3, 7, "shalat_berjamaah");
        assert_eq!(matrix.distinct_days(3, "shalat_berjamaah"), 15);
    }

    #[test]
    fn test_activities_share_a_day_independently() {
        let mut matrix = CompletionMatrix::new();
        matrix.mark(5, 2, "doa_bersama");
        matrix.mark(5, 2, "tadarus");
        assert_eq!(matrix.distinct_days(5, "doa_bersama"), 1);
        assert_eq!(matrix.distinct_days(5, "tadarus"), 1);
        assert_eq!(matrix.distinct_days(5, "kajian_rutin"), 0);
    }

    #[test]
    fn test_out_of_range_marks_are_ignored() {
        let mut matrix = CompletionMatrix::new();
        assert!(!matrix.mark(0, 1, "tadarus"));
        assert!(!matrix.mark(13, 1, "tadarus"));
        assert!(!matrix.mark(3, 0, "tadarus"));
        assert!(!matrix.mark(3, 32, "tadarus"));
        assert!(matrix.is_empty());
    }

    #[test]
    fn test_has_month_and_is_empty() {
        let mut matrix = CompletionMatrix::new();
        assert!(matrix.is_empty());
        matrix.mark(11, 30, "baca_buku");
        assert!(matrix.has_month(11));
        assert!(!matrix.has_month(10));
        assert!(!matrix.is_empty());
    }
}
