//! # Engine Errors
//!
//! Every failure is a caller-input error reported synchronously. None are
//! transient and none leave the engine partially updated: each operation
//! validates completely before it mutates anything.

use std::fmt;

use thiserror::Error;

use crate::entity::Tier;

/// Kind of resource a lookup failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// A supply-chain entity.
    Entity,
    /// A compliance document.
    Document,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity => f.write_str("entity"),
            Self::Document => f.write_str("document"),
        }
    }
}

/// Errors raised by [`ComplianceEngine`](crate::engine::ComplianceEngine)
/// operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The tier/parent relationship of a new entity is not allowed.
    #[error("invalid hierarchy for {tier}: {reason}")]
    InvalidHierarchy {
        /// Tier of the entity being added.
        tier: Tier,
        /// Why the placement was rejected.
        reason: String,
    },

    /// An entity or document identifier does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What was being looked up.
        kind: ResourceKind,
        /// The identifier that was not found.
        id: String,
    },

    /// An approval decision was made on an entity that is no longer pending.
    #[error("invalid approval transition for {entity_id}: {from} -> {to}")]
    InvalidTransition {
        /// The entity identifier.
        entity_id: String,
        /// Current approval status.
        from: String,
        /// Attempted approval status.
        to: String,
    },
}

impl EngineError {
    pub(crate) fn hierarchy(tier: Tier, reason: impl Into<String>) -> Self {
        Self::InvalidHierarchy {
            tier,
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(kind: ResourceKind, id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}
