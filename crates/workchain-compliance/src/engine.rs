//! # Compliance Engine — State and Mutations
//!
//! [`ComplianceEngine`] owns every entity and, through them, every document.
//! The tree shape is never stored separately: it is rebuilt from `parent_id`
//! links whenever a query needs it (see [`crate::hierarchy`]).
//!
//! ## Invariants
//!
//! - At most one client, and it is always the first entity inserted.
//! - Every non-client entity's parent exists and sits exactly one tier above.
//! - Entities are never removed, so insertion order is stable and every
//!   listing is deterministic.
//! - Mutations validate fully before touching state. A rejected call leaves
//!   the engine exactly as it was.
//!
//! ## Concurrency
//!
//! Mutations take `&mut self`. Hosts sharing an engine between threads wrap
//! it in their own lock; the engine does no internal synchronization.

use std::collections::HashMap;

use workchain_core::{CalendarDate, DocumentId, EntityId};

use crate::document::{Document, DocumentView, ExpiryPolicy};
use crate::entity::{ApprovalDecision, ApprovalStatus, Entity, Tier};
use crate::error::{EngineError, ResourceKind};

/// In-memory store of the supply-chain hierarchy.
#[derive(Debug, Clone, Default)]
pub struct ComplianceEngine {
    /// Entities in insertion order.
    entities: Vec<Entity>,
    /// Position of each entity in `entities`.
    index: HashMap<EntityId, usize>,
    /// Expiry classification policy applied to every document.
    policy: ExpiryPolicy,
}

impl ComplianceEngine {
    /// Create an empty engine with the default expiry policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty engine with a custom expiry policy.
    pub fn with_policy(policy: ExpiryPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Create an engine rooted at a single client entity.
    pub fn with_client(name: impl Into<String>) -> (Self, EntityId) {
        let mut engine = Self::new();
        let client = Entity::new(name, Tier::Client, None);
        let id = client.id;
        engine.insert(client);
        (engine, id)
    }

    /// The expiry policy used for every derivation.
    pub fn policy(&self) -> &ExpiryPolicy {
        &self.policy
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether no entity (not even the client) exists yet.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The root client, once bootstrapped.
    pub fn client(&self) -> Option<EntityId> {
        self.entities
            .first()
            .filter(|e| e.tier == Tier::Client)
            .map(|e| e.id)
    }

    /// Look up an entity.
    pub fn entity(&self, id: EntityId) -> Result<&Entity, EngineError> {
        self.index
            .get(&id)
            .map(|&pos| &self.entities[pos])
            .ok_or_else(|| EngineError::not_found(ResourceKind::Entity, id))
    }

    /// All entities in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    // ─── Mutations ───────────────────────────────────────────────────

    /// Add an entity beneath `parent_id`.
    ///
    /// A client may only be added to an empty engine and takes no parent.
    /// Contractors must be engaged by the client, subcontractors by a
    /// contractor. The new entity starts `Pending` with no documents.
    pub fn add_entity(
        &mut self,
        name: impl Into<String>,
        tier: Tier,
        parent_id: Option<EntityId>,
    ) -> Result<EntityId, EngineError> {
        let name = name.into();
        if let Err(e) = self.validate_placement(tier, parent_id) {
            tracing::warn!(name = %name, tier = %tier, error = %e, "entity placement rejected");
            return Err(e);
        }

        let entity = Entity::new(name, tier, parent_id);
        let id = entity.id;
        tracing::debug!(
            entity_id = %id,
            tier = %tier,
            parent_id = ?parent_id.map(|p| p.to_string()),
            "entity added"
        );
        self.insert(entity);
        Ok(id)
    }

    /// Attach a document to an entity.
    ///
    /// Status and risk are not computed here; they are derived at query
    /// time against the caller's evaluation date.
    pub fn add_document(
        &mut self,
        entity_id: EntityId,
        name: impl Into<String>,
        expiry_date: CalendarDate,
    ) -> Result<DocumentId, EngineError> {
        let entity = self.entity_mut(entity_id)?;
        let document = Document::new(name, expiry_date);
        let id = document.id;
        entity.documents.push(document);
        tracing::debug!(
            entity_id = %entity_id,
            document_id = %id,
            expiry = %expiry_date,
            "document added"
        );
        Ok(id)
    }

    /// Detach a document from an entity and return it.
    pub fn remove_document(
        &mut self,
        entity_id: EntityId,
        document_id: DocumentId,
    ) -> Result<Document, EngineError> {
        let entity = self.entity_mut(entity_id)?;
        let pos = entity
            .documents
            .iter()
            .position(|d| d.id == document_id)
            .ok_or_else(|| EngineError::not_found(ResourceKind::Document, document_id))?;
        let removed = entity.documents.remove(pos);
        tracing::debug!(entity_id = %entity_id, document_id = %document_id, "document removed");
        Ok(removed)
    }

    /// Record an approval decision on a pending entity.
    ///
    /// Approval is per-entity: children are not affected, and no entity's
    /// compliance status changes.
    pub fn set_approval(
        &mut self,
        entity_id: EntityId,
        decision: ApprovalDecision,
    ) -> Result<(), EngineError> {
        let entity = self.entity_mut(entity_id)?;
        match entity.decide(decision) {
            Ok(()) => {
                tracing::debug!(
                    entity_id = %entity_id,
                    status = %entity.approval_status,
                    "approval recorded"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(entity_id = %entity_id, error = %e, "approval decision rejected");
                Err(e)
            }
        }
    }

    // ─── Lookups ─────────────────────────────────────────────────────

    /// Direct children of an entity, in insertion order.
    pub fn children(&self, id: EntityId) -> Result<Vec<EntityId>, EngineError> {
        self.entity(id)?;
        Ok(self
            .entities
            .iter()
            .filter(|e| e.parent_id == Some(id))
            .map(|e| e.id)
            .collect())
    }

    /// All entities of a tier, in insertion order.
    pub fn entities_by_tier(&self, tier: Tier) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.tier == tier)
            .map(|e| e.id)
            .collect()
    }

    /// Entities still awaiting an approval decision, in insertion order.
    pub fn pending_approvals(&self) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.approval_status == ApprovalStatus::Pending)
            .map(|e| e.id)
            .collect()
    }

    /// The first entity with exactly this display name.
    pub fn find_by_name(&self, name: &str) -> Option<EntityId> {
        self.entities.iter().find(|e| e.name == name).map(|e| e.id)
    }

    /// An entity's documents with status and risk derived for `now`.
    pub fn document_views(
        &self,
        id: EntityId,
        now: CalendarDate,
    ) -> Result<Vec<DocumentView>, EngineError> {
        let entity = self.entity(id)?;
        Ok(entity
            .documents
            .iter()
            .map(|d| d.view(now, &self.policy))
            .collect())
    }

    // ─── Internals ───────────────────────────────────────────────────

    fn validate_placement(
        &self,
        tier: Tier,
        parent_id: Option<EntityId>,
    ) -> Result<(), EngineError> {
        match (tier.parent_tier(), parent_id) {
            (None, Some(_)) => Err(EngineError::hierarchy(tier, "a client cannot have a parent")),
            (None, None) if !self.is_empty() => Err(EngineError::hierarchy(
                tier,
                "the hierarchy already has a client",
            )),
            (None, None) => Ok(()),
            (Some(expected), None) => Err(EngineError::hierarchy(
                tier,
                format!("a {tier} must be engaged by a {expected}"),
            )),
            (Some(expected), Some(pid)) => {
                let parent = self.entity(pid)?;
                if parent.tier == expected {
                    Ok(())
                } else {
                    Err(EngineError::hierarchy(
                        tier,
                        format!(
                            "parent {pid} is a {}; a {tier} must be engaged by a {expected}",
                            parent.tier
                        ),
                    ))
                }
            }
        }
    }

    fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, EngineError> {
        match self.index.get(&id) {
            Some(&pos) => Ok(&mut self.entities[pos]),
            None => Err(EngineError::not_found(ResourceKind::Entity, id)),
        }
    }

    fn insert(&mut self, entity: Entity) {
        self.index.insert(entity.id, self.entities.len());
        self.entities.push(entity);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
