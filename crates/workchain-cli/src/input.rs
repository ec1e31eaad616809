//! # Snapshot Input
//!
//! Arguments shared by every subcommand and the snapshot loader behind
//! them. The parser is chosen by file extension: `.json` goes through
//! serde_json, `.yaml`, `.yml` and anything else through serde_yaml.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Args;

use workchain_compliance::{ExpiryPolicy, LoadedSnapshot, SupplyChainSnapshot};
use workchain_core::{CalendarDate, EntityId};

use crate::report::OutputFormat;
use crate::Settings;

/// Arguments common to every reporting subcommand.
#[derive(Args, Debug, Clone)]
pub struct SnapshotArgs {
    /// Supply-chain snapshot file (YAML or JSON).
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub as_of: Option<CalendarDate>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl SnapshotArgs {
    /// The date every status is derived for.
    pub fn evaluation_date(&self) -> CalendarDate {
        self.as_of.unwrap_or_else(CalendarDate::today)
    }
}

/// Read and parse a snapshot file without loading it into an engine.
pub fn read_snapshot(path: &Path) -> Result<SupplyChainSnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot: {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let snapshot = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON snapshot: {}", path.display()))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML snapshot: {}", path.display()))?
    };
    Ok(snapshot)
}

/// Read a snapshot, apply global overrides, and build an engine from it.
pub fn load_snapshot(path: &Path, settings: &Settings) -> Result<LoadedSnapshot> {
    let mut snapshot = read_snapshot(path)?;
    if let Some(days) = settings.expiring_window_days {
        tracing::debug!(
            from = snapshot.policy.expiring_window_days,
            to = days,
            "overriding expiring window"
        );
        snapshot.policy = ExpiryPolicy::new(days);
    }
    let loaded = snapshot
        .load()
        .with_context(|| format!("failed to load snapshot: {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        entities = loaded.engine.len(),
        "snapshot ready"
    );
    Ok(loaded)
}

/// Resolve an entity by display name, falling back to its snapshot key.
pub fn resolve_entity(loaded: &LoadedSnapshot, name: &str) -> Result<EntityId> {
    loaded
        .engine
        .find_by_name(name)
        .or_else(|| loaded.id(name))
        .ok_or_else(|| anyhow!("no entity named {name:?} in snapshot"))
}
