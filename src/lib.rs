//! Roster API Library
//!
//! Member/Team persistence over SQLite with condition-driven search:
//! optional filters compose into a single joined, paginated query.
//! Also carries a catalogue of join, subquery, projection and bulk
//! update queries, and a small HTTP surface over them.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
