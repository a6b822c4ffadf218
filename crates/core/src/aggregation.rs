//! Yearly aggregation of one employee's completion data.
//!
//! Consumes the transient completion matrix, the manual-report count cache,
//! and the activation/approval month sets; produces per-category and total
//! achieved/target/percentage values. Pure computation; the api crate's
//! engine owns fetching and assembly.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::catalog::{VirtueCategory, CATALOG};
use crate::matrix::CompletionMatrix;
use crate::types::ActivityId;

/* --------------------------------------------------------------------------
Input
-------------------------------------------------------------------------- */

/// Everything the aggregation needs for one employee and one year.
#[derive(Debug, Clone, Default)]
pub struct EmployeeYearInput {
    /// Daily completion matrix built from the raw sources.
    pub matrix: CompletionMatrix,
    /// Raw manual-report counts per `(month, activity)`.
    pub manual_counts: HashMap<(u32, ActivityId), u32>,
    /// Months with a true activation record.
    pub activated_months: HashSet<u32>,
    /// Months whose submission reached `approved`.
    pub approved_months: HashSet<u32>,
}

impl EmployeeYearInput {
    /// Merge a manual-report count into the cache.
    ///
    /// Multiple rows for the same activity/month keep the maximum rather
    /// than summing, matching the matrix/cache reconciliation rule.
    pub fn record_manual_count(&mut self, month: u32, activity: ActivityId, count: u32) {
        let slot = self.manual_counts.entry((month, activity)).or_insert(0);
        *slot = (*slot).max(count);
    }

    /// Whether the month has any observed activity in either signal store.
    pub fn month_has_data(&self, month: u32) -> bool {
        self.matrix.has_month(month)
            || self
                .manual_counts
                .iter()
                .any(|(&(m, _), &count)| m == month && count > 0)
    }
}

/* --------------------------------------------------------------------------
Output
-------------------------------------------------------------------------- */

/// Achieved/target/percentage triple for one category or the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryScore {
    pub achieved: u32,
    pub target: u32,
    pub percentage: u32,
}

impl CategoryScore {
    fn from_parts(achieved: u32, target: u32) -> Self {
        Self {
            achieved,
            target,
            percentage: percentage(achieved, target),
        }
    }
}

/// One employee's aggregated year.
#[derive(Debug, Clone, Default, Serialize)]
pub struct YearlyScore {
    /// Months that had observed activity and an activation record.
    pub months_count: u32,
    pub integrity: CategoryScore,
    pub teamwork: CategoryScore,
    pub discipline: CategoryScore,
    pub learning: CategoryScore,
    pub total: CategoryScore,
}

impl YearlyScore {
    pub fn category(&self, category: VirtueCategory) -> &CategoryScore {
        match category {
            VirtueCategory::Integrity => &self.integrity,
            VirtueCategory::Teamwork => &self.teamwork,
            VirtueCategory::Discipline => &self.discipline,
            VirtueCategory::Learning => &self.learning,
        }
    }
}

/* --------------------------------------------------------------------------
Computation
-------------------------------------------------------------------------- */

/// Completion percentage, clamped to `[0, 100]`. A zero target is 0, never
/// a division error.
pub fn percentage(achieved: u32, target: u32) -> u32 {
    if target == 0 {
        return 0;
    }
    let pct = (f64::from(achieved) * 100.0 / f64::from(target)).round() as u32;
    pct.min(100)
}

/// Achieved count for one activity in one month.
///
/// The matrix day count and the raw manual count are two views of a hybrid
/// source; they reconcile by maximum, never by sum, so the same completions
/// are not double counted.
pub fn activity_achieved(input: &EmployeeYearInput, month: u32, activity: ActivityId) -> u32 {
    let day_count = input.matrix.distinct_days(month, activity);
    let manual_count = input
        .manual_counts
        .get(&(month, activity))
        .copied()
        .unwrap_or(0);
    day_count.max(manual_count)
}

/// Aggregate one employee's year into category and total scores.
///
/// Month inclusion: a month counts (and accrues targets) only when it has
/// observed activity *and* an activation record. A counted month whose
/// submission is not approved contributes zero achieved while still
/// accruing its targets, so revoking an approval can only lower the
/// percentage.
pub fn aggregate_year(input: &EmployeeYearInput) -> YearlyScore {
    let mut achieved: HashMap<VirtueCategory, u32> = HashMap::new();
    let mut target: HashMap<VirtueCategory, u32> = HashMap::new();
    let mut months_count = 0;

    for month in 1..=12 {
        if !input.month_has_data(month) || !input.activated_months.contains(&month) {
            continue;
        }
        months_count += 1;
        let approved = input.approved_months.contains(&month);

        for activity in CATALOG {
            *target.entry(activity.category).or_default() += activity.monthly_target;
            if approved {
                *achieved.entry(activity.category).or_default() +=
                    activity_achieved(input, month, activity.id);
            }
        }
    }

    let score = |category: VirtueCategory| {
        CategoryScore::from_parts(
            achieved.get(&category).copied().unwrap_or(0),
            target.get(&category).copied().unwrap_or(0),
        )
    };

    let total = CategoryScore::from_parts(
        achieved.values().sum(),
        target.values().sum(),
    );

    YearlyScore {
        months_count,
        integrity: score(VirtueCategory::Integrity),
        teamwork: score(VirtueCategory::Teamwork),
        discipline: score(VirtueCategory::Discipline),
        learning: score(VirtueCategory::Learning),
        total,
    }
}
