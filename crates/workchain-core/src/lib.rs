//! # workchain-core — Foundational Types for WorkChain
//!
//! The leaf crate of the WorkChain workspace. It defines the identifier
//! newtypes and the calendar-date type that every other crate builds on.
//! It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `EntityId` and `DocumentId` are
//!    distinct types; you cannot pass one where the other is expected.
//!
//! 2. **Calendar dates, not instants.** Document expiry is a calendar-day
//!    concept. `CalendarDate` wraps a UTC `NaiveDate` and only parses the
//!    strict `YYYY-MM-DD` form.
//!
//! 3. **No ambient clock in library code.** `CalendarDate::today()` exists for
//!    host applications; nothing in the library crates calls it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `workchain-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::CoreError;
pub use identity::{DocumentId, EntityId};
pub use temporal::CalendarDate;
