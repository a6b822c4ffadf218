//! The static catalog of trackable daily activities.
//!
//! Every activity belongs to exactly one virtue category and carries one
//! monthly numeric target. The catalog is immutable at runtime; the
//! normalization tables in [`crate::normalize`] map raw source signals onto
//! these ids.

use serde::{Deserialize, Serialize};

use crate::types::ActivityId;

/* --------------------------------------------------------------------------
Categories
-------------------------------------------------------------------------- */

/// The four virtue categories that partition all trackable activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VirtueCategory {
    /// Worship and personal integrity ("amanah") activities.
    Integrity,
    Teamwork,
    Discipline,
    Learning,
}

/// Fixed category iteration order used by reports.
pub const CATEGORIES: [VirtueCategory; 4] = [
    VirtueCategory::Integrity,
    VirtueCategory::Teamwork,
    VirtueCategory::Discipline,
    VirtueCategory::Learning,
];

impl VirtueCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            VirtueCategory::Integrity => "integrity",
            VirtueCategory::Teamwork => "teamwork",
            VirtueCategory::Discipline => "discipline",
            VirtueCategory::Learning => "learning",
        }
    }
}

/* --------------------------------------------------------------------------
Activity definitions
-------------------------------------------------------------------------- */

/// Which raw source automatically feeds an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTrigger {
    PrayerAttendance,
    TeamSession,
    ActivitySession,
    ManualReport,
    BookReport,
}

/// One trackable daily activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityDefinition {
    pub id: ActivityId,
    pub category: VirtueCategory,
    /// How many completions per month count as full achievement.
    pub monthly_target: u32,
    pub trigger: SourceTrigger,
}

/// The full activity catalog.
pub const CATALOG: &[ActivityDefinition] = &[
    ActivityDefinition {
        id: "shalat_berjamaah",
        category: VirtueCategory::Integrity,
        monthly_target: 20,
        trigger: SourceTrigger::PrayerAttendance,
    },
    ActivityDefinition {
        id: "qiyamul_lail",
        category: VirtueCategory::Integrity,
        monthly_target: 4,
        trigger: SourceTrigger::ManualReport,
    },
    ActivityDefinition {
        id: "puasa_sunnah",
        category: VirtueCategory::Integrity,
        monthly_target: 4,
        trigger: SourceTrigger::ManualReport,
    },
    ActivityDefinition {
        id: "doa_bersama",
        category: VirtueCategory::Teamwork,
        monthly_target: 4,
        trigger: SourceTrigger::TeamSession,
    },
    ActivityDefinition {
        id: "tepat_waktu_kie",
        category: VirtueCategory::Teamwork,
        monthly_target: 4,
        trigger: SourceTrigger::TeamSession,
    },
    ActivityDefinition {
        id: "senam_bersama",
        category: VirtueCategory::Discipline,
        monthly_target: 4,
        trigger: SourceTrigger::ActivitySession,
    },
    ActivityDefinition {
        id: "apel_pagi",
        category: VirtueCategory::Discipline,
        monthly_target: 8,
        trigger: SourceTrigger::ActivitySession,
    },
    ActivityDefinition {
        id: "tadarus",
        category: VirtueCategory::Learning,
        monthly_target: 8,
        trigger: SourceTrigger::ManualReport,
    },
    ActivityDefinition {
        id: "kajian_rutin",
        category: VirtueCategory::Learning,
        monthly_target: 2,
        trigger: SourceTrigger::ActivitySession,
    },
    ActivityDefinition {
        id: "baca_buku",
        category: VirtueCategory::Learning,
        monthly_target: 1,
        trigger: SourceTrigger::BookReport,
    },
];

/// Look up an activity definition by its canonical id.
pub fn find_activity(id: &str) -> Option<&'static ActivityDefinition> {
    CATALOG.iter().find(|a| a.id == id)
}

/// All activities in one category, in catalog order.
pub fn activities_in(
    category: VirtueCategory,
) -> impl Iterator<Item = &'static ActivityDefinition> {
    CATALOG.iter().filter(move |a| a.category == category)
}

/// Sum of monthly targets for one category (one month's worth).
pub fn category_monthly_target(category: VirtueCategory) -> u32 {
    activities_in(category).map(|a| a.monthly_target).sum()
}
