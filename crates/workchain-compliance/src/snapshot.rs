//! # Supply-Chain Snapshots
//!
//! A serializable description of a whole supply chain, used by hosts to
//! seed an engine from a YAML or JSON file.
//!
//! ```yaml
//! policy:
//!   expiring_window_days: 30
//! entities:
//!   - key: megacorp
//!     name: MegaCorp Industries
//!     tier: client
//!   - key: buildco
//!     name: BuildCo Ltd
//!     tier: contractor
//!     parent: megacorp
//!     approval: approved
//!     documents:
//!       - name: Public Liability Insurance
//!         expiry_date: 2025-08-15
//! ```
//!
//! Entries are applied in file order through the engine's public
//! operations, so every hierarchy rule applies exactly as it does to a
//! live caller. Loading builds a fresh engine and hands it back only when
//! every entry succeeded.
//!
//! Unknown fields are rejected at parse time, so a misspelled optional
//! field fails instead of silently falling back to its default.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use workchain_core::{CalendarDate, EntityId};

use crate::document::ExpiryPolicy;
use crate::engine::ComplianceEngine;
use crate::entity::{ApprovalDecision, ApprovalStatus, Tier};
use crate::error::EngineError;

/// Errors loading a snapshot into an engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// The snapshot is internally inconsistent (duplicate or dangling keys).
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// The engine rejected an entry.
    #[error("engine rejected snapshot entry: {0}")]
    Engine(#[from] EngineError),
}

/// A whole supply chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SupplyChainSnapshot {
    /// Expiry policy for the loaded engine.
    #[serde(default)]
    pub policy: ExpiryPolicy,
    /// Entities, parents before children.
    #[serde(default)]
    pub entities: Vec<SnapshotEntity>,
}

/// One entity entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotEntity {
    /// Snapshot-local key referenced by children's `parent`.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Tier.
    pub tier: Tier,
    /// Key of the parent entry. Omitted for the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Approval state to replay after creation.
    #[serde(default)]
    pub approval: ApprovalStatus,
    /// Documents in upload order.
    #[serde(default)]
    pub documents: Vec<SnapshotDocument>,
}

/// One document entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotDocument {
    /// Document type label.
    pub name: String,
    /// Expiry date (`YYYY-MM-DD`).
    pub expiry_date: CalendarDate,
}

/// An engine built from a snapshot, with the key → id mapping.
#[derive(Debug, Clone)]
pub struct LoadedSnapshot {
    /// The populated engine.
    pub engine: ComplianceEngine,
    /// Entity id assigned to each snapshot key.
    pub keys: BTreeMap<String, EntityId>,
}

impl LoadedSnapshot {
    /// Entity id for a snapshot key.
    pub fn id(&self, key: &str) -> Option<EntityId> {
        self.keys.get(key).copied()
    }
}

impl SupplyChainSnapshot {
    /// Build a fresh engine from this snapshot.
    pub fn load(&self) -> Result<LoadedSnapshot, SnapshotError> {
        let mut engine = ComplianceEngine::with_policy(self.policy);
        let mut keys: BTreeMap<String, EntityId> = BTreeMap::new();

        for entry in &self.entities {
            if keys.contains_key(&entry.key) {
                return Err(SnapshotError::InvalidSnapshot(format!(
                    "duplicate entity key {:?}",
                    entry.key
                )));
            }
            let parent = match &entry.parent {
                None => None,
                Some(parent_key) => Some(keys.get(parent_key).copied().ok_or_else(|| {
                    SnapshotError::InvalidSnapshot(format!(
                        "entity {:?} references unknown parent {:?}",
                        entry.key, parent_key
                    ))
                })?),
            };

            let id = engine.add_entity(entry.name.clone(), entry.tier, parent)?;
            for doc in &entry.documents {
                engine.add_document(id, doc.name.clone(), doc.expiry_date)?;
            }
            match entry.approval {
                ApprovalStatus::Pending => {}
                ApprovalStatus::Approved => engine.set_approval(id, ApprovalDecision::Approve)?,
                ApprovalStatus::Rejected => engine.set_approval(id, ApprovalDecision::Reject)?,
            }
            keys.insert(entry.key.clone(), id);
        }

        tracing::info!(entities = engine.len(), "snapshot loaded");
        Ok(LoadedSnapshot { engine, keys })
    }
}
