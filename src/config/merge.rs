//! Merge rules for layered configuration sources.

pub mod key_spelling;
pub mod merge_policy;
