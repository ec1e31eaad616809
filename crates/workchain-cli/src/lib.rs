//! # workchain-cli — WorkChain Command-Line Interface
//!
//! Loads a supply-chain snapshot into a [`ComplianceEngine`] and reports on
//! it. Argument parsing lives in `main.rs`; the handlers here only load,
//! query and render.
//!
//! ## Subcommands
//!
//! - `status`: own risk and combined status of one entity
//! - `tree`: the hierarchy with derived statuses
//! - `summary`: dashboard counters
//!
//! Every handler takes the evaluation date explicitly. The wall clock is
//! read once, in [`input::SnapshotArgs::evaluation_date`], and only when
//! `--as-of` is absent.
//!
//! [`ComplianceEngine`]: workchain_compliance::ComplianceEngine

pub mod input;
pub mod report;
pub mod status;
pub mod summary;
pub mod tree;

/// Options that apply to every subcommand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    /// Overrides the snapshot's `expiring_window_days` when set.
    pub expiring_window_days: Option<u32>,
}
