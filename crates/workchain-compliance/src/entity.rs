//! # Supply-Chain Entities
//!
//! An [`Entity`] is one node of the client → contractor → subcontractor
//! tree. It carries two status axes that are deliberately kept apart:
//!
//! - **Approval** ([`ApprovalStatus`]) is an explicit workflow decision.
//! - **Compliance** is derived from documents at query time and never
//!   stored on the entity (see [`crate::hierarchy`]).
//!
//! ## Approval States
//!
//! ```text
//! Pending ──▶ Approved (terminal)
//!    │
//!    └──────▶ Rejected (terminal)
//! ```
//!
//! There is no path back to `Pending`. A second decision on the same entity
//! is rejected, which also guards against double submission from a UI.

use std::fmt;

use serde::{Deserialize, Serialize};

use workchain_core::{CalendarDate, EntityId};

use crate::document::{Document, ExpiryPolicy};
use crate::error::EngineError;
use crate::risk::RiskLevel;

// ─── Tier ────────────────────────────────────────────────────────────

/// Depth classification of an entity in the supply chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// The root of the hierarchy. Exactly one per engine.
    Client,
    /// Engaged directly by the client.
    Contractor,
    /// Engaged by a contractor.
    Subcontractor,
}

impl Tier {
    /// Depth in the tree (client = 0).
    pub fn depth(self) -> u8 {
        match self {
            Self::Client => 0,
            Self::Contractor => 1,
            Self::Subcontractor => 2,
        }
    }

    /// The tier a parent of this tier must have. `None` for the client.
    pub fn parent_tier(self) -> Option<Tier> {
        match self {
            Self::Client => None,
            Self::Contractor => Some(Self::Client),
            Self::Subcontractor => Some(Self::Contractor),
        }
    }

    /// The snake_case identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Contractor => "contractor",
            Self::Subcontractor => "subcontractor",
        }
    }

    /// All tiers, root first.
    pub fn all() -> &'static [Tier] {
        &[Self::Client, Self::Contractor, Self::Subcontractor]
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Approval ────────────────────────────────────────────────────────

/// Approval workflow state of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Awaiting a decision. Initial state.
    #[default]
    Pending,
    /// Approved (terminal).
    Approved,
    /// Rejected (terminal).
    Rejected,
}

impl ApprovalStatus {
    /// Whether no further decision is permitted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// The snake_case identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decision that moves an entity out of `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalDecision {
    /// Approve the entity.
    Approve,
    /// Reject the entity.
    Reject,
}

impl ApprovalDecision {
    /// The status this decision leads to.
    pub fn target(self) -> ApprovalStatus {
        match self {
            Self::Approve => ApprovalStatus::Approved,
            Self::Reject => ApprovalStatus::Rejected,
        }
    }
}

// ─── Entity ──────────────────────────────────────────────────────────

/// A supply-chain participant and the documents it owns.
///
/// `tier` and `parent_id` are fixed at creation. The parent link is a
/// plain identifier used for traversal only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique entity identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Depth classification.
    pub tier: Tier,
    /// The entity that engaged this one. `None` only for the client.
    pub parent_id: Option<EntityId>,
    /// Approval workflow state.
    pub approval_status: ApprovalStatus,
    /// Documents in upload order.
    pub documents: Vec<Document>,
}

impl Entity {
    pub(crate) fn new(name: impl Into<String>, tier: Tier, parent_id: Option<EntityId>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            tier,
            parent_id,
            approval_status: ApprovalStatus::Pending,
            documents: Vec::new(),
        }
    }

    /// Worst risk among this entity's own documents. Green if it has none.
    pub fn own_risk(&self, now: CalendarDate, policy: &ExpiryPolicy) -> RiskLevel {
        RiskLevel::worst(self.documents.iter().map(|d| d.risk(now, policy)))
    }

    /// Number of own documents that are expiring or expired.
    pub fn issue_count(&self, now: CalendarDate, policy: &ExpiryPolicy) -> usize {
        self.documents
            .iter()
            .filter(|d| d.risk(now, policy).is_issue())
            .count()
    }

    /// Apply an approval decision (PENDING → APPROVED | REJECTED).
    pub(crate) fn decide(&mut self, decision: ApprovalDecision) -> Result<(), EngineError> {
        let target = decision.target();
        if self.approval_status != ApprovalStatus::Pending {
            return Err(EngineError::InvalidTransition {
                entity_id: self.id.to_string(),
                from: self.approval_status.to_string(),
                to: target.to_string(),
            });
        }
        self.approval_status = target;
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
