//! Domain logic for the Mutaba'ah monthly activity tracking service.
//!
//! This crate contains no database or HTTP dependencies; all data is passed
//! in by the caller. The `db` crate persists it, the `api` crate serves it.

pub mod aggregation;
pub mod approval;
pub mod catalog;
pub mod error;
pub mod matrix;
pub mod month;
pub mod normalize;
pub mod roles;
pub mod types;
