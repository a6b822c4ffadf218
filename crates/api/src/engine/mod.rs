//! The activity aggregation engine.
//!
//! Fans out to the raw-source readers, normalizes their rows through
//! `mutabaah_core`, and assembles the per-employee report rows consumed by
//! the report query service and its export variant.

pub mod report;
