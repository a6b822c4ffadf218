//! Normalization of heterogeneous raw-source rows into completion tuples.
//!
//! Each raw source speaks its own dialect: attendance rows carry dates,
//! team/activity sessions carry free-text type strings, and manual reports
//! arrive in one of three legacy payload encodings. Everything is resolved
//! here, once, at ingestion; the aggregation math never branches on source
//! shape.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Deserialize;

use crate::types::ActivityId;

/* --------------------------------------------------------------------------
Session type mapping tables
-------------------------------------------------------------------------- */

/// Recognized team-session type strings and the activity they feed.
const TEAM_SESSION_TYPES: &[(&str, ActivityId)] = &[
    ("doa bersama", "doa_bersama"),
    ("kie", "tepat_waktu_kie"),
];

/// Recognized activity-session type strings and the activity they feed.
const ACTIVITY_SESSION_TYPES: &[(&str, ActivityId)] = &[
    ("senam", "senam_bersama"),
    ("apel", "apel_pagi"),
    ("kajian", "kajian_rutin"),
];

fn lookup(table: &[(&str, ActivityId)], session_type: &str) -> Option<ActivityId> {
    let needle = session_type.trim().to_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == needle)
        .map(|(_, id)| *id)
}

/// Map a team-session type string to its activity id.
///
/// Unrecognized strings return `None` and the row is dropped; this is an
/// intentional lossy tolerance so one malformed row cannot block a report.
pub fn team_session_activity(session_type: &str) -> Option<ActivityId> {
    lookup(TEAM_SESSION_TYPES, session_type)
}

/// Map an activity-session type string to its activity id.
pub fn activity_session_activity(session_type: &str) -> Option<ActivityId> {
    lookup(ACTIVITY_SESSION_TYPES, session_type)
}

/* --------------------------------------------------------------------------
Drop accounting
-------------------------------------------------------------------------- */

/// Counts rows dropped during normalization so lossy tolerance stays
/// observable. The engine emits one warn-level log line per request when
/// the count is non-zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeStats {
    pub dropped_rows: u32,
}

impl NormalizeStats {
    pub fn record_drop(&mut self, source: &'static str, raw_type: &str) {
        self.dropped_rows += 1;
        tracing::debug!(source, raw_type, "dropped unrecognized source row");
    }
}

/* --------------------------------------------------------------------------
Manual report payloads
-------------------------------------------------------------------------- */

/// The three legacy manual-report encodings, resolved at deserialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ManualPayload {
    /// A list of dated entries: `{"entries": [{"date": "2025-03-04"}, ...]}`.
    Entries { entries: Vec<DatedEntry> },
    /// Book entries keyed by completion date:
    /// `{"book_entries": [{"completed_at": "..."}, ...]}`.
    BookEntries { book_entries: Vec<BookEntry> },
    /// A single completion timestamp: `{"completed_at": "..."}`.
    Single { completed_at: DateTime<Utc> },
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatedEntry {
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookEntry {
    pub completed_at: DateTime<Utc>,
}

/// A manual payload reduced to the common tuple shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedManual {
    /// Completion dates, used to mark the daily matrix.
    pub days: Vec<NaiveDate>,
    /// The raw entry count recorded by the report, which may exceed the
    /// number of distinct days (duplicate or undated entries).
    pub count: u32,
}

/// Normalize any of the three payload variants, keeping only dates that fall
/// inside the requested calendar year.
pub fn normalize_manual(payload: &ManualPayload, year: i32) -> NormalizedManual {
    let (days, count): (Vec<NaiveDate>, u32) = match payload {
        ManualPayload::Entries { entries } => (
            entries.iter().map(|e| e.date).collect(),
            entries.len() as u32,
        ),
        ManualPayload::BookEntries { book_entries } => (
            book_entries
                .iter()
                .map(|e| e.completed_at.date_naive())
                .collect(),
            book_entries.len() as u32,
        ),
        ManualPayload::Single { completed_at } => (vec![completed_at.date_naive()], 1),
    };

    NormalizedManual {
        days: days.into_iter().filter(|d| d.year() == year).collect(),
        count,
    }
}
