// Rust guideline compliant 2026-08-22

//! Adapters (secondary ports) for the `weather_alerts` binary.
//!
//! Each sub-module implements one hexagonal port trait defined in the
//! `domain` crate. Adapters are intentionally isolated from evaluation and
//! client logic.

pub mod jsonl_sink;
pub mod sqlite_store;
