//! # Error Types
//!
//! Errors raised while constructing core value types. Engine-level
//! failures (hierarchy, lookup, approval transitions) live in
//! `workchain-compliance` next to the operations that raise them.

use thiserror::Error;

/// Error constructing a core value type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A calendar date string was malformed or out of range.
    #[error("invalid calendar date: {0}")]
    InvalidDate(String),
}
