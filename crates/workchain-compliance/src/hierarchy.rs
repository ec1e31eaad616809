//! # Status Bubbling
//!
//! Read-only queries that derive compliance status across the tree.
//!
//! ## Algorithm
//!
//! Post-order traversal from the queried entity: every descendant is folded
//! first, then the entity's own document risk is joined with the worst
//! child result. The fold uses [`RiskLevel::join`], so the combined status of
//! an entity is the most severe own-document risk anywhere in its subtree.
//!
//! A parent → children index is built once per query from the `parent_id`
//! links instead of rescanning the entity list at every node.
//!
//! ## Driver
//!
//! Each result also names the entity whose own documents set the combined
//! severity. On ties the queried entity wins, then earlier children (in
//! insertion order) win over later ones. No driver is reported when the
//! subtree is green.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use workchain_core::{CalendarDate, EntityId};

use crate::document::DocumentView;
use crate::engine::ComplianceEngine;
use crate::entity::{ApprovalStatus, Entity, Tier};
use crate::error::EngineError;
use crate::risk::{ComplianceStatus, RiskLevel};

// ─── Result Types ────────────────────────────────────────────────────

/// Derived status of a single entity on an evaluation date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStatus {
    /// The entity evaluated.
    pub entity_id: EntityId,
    /// Worst risk among the entity's own documents.
    pub own_risk: RiskLevel,
    /// Status folded from the entity and all of its descendants.
    pub combined_status: ComplianceStatus,
    /// Own documents that are expiring or expired.
    pub issues: usize,
    /// Expiring or expired documents across the whole subtree.
    pub subtree_issues: usize,
    /// Entity whose own documents set `combined_status`.
    pub driver: Option<EntityId>,
}

/// One node of a rendered hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyNode {
    /// Entity identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Tier of the entity.
    pub tier: Tier,
    /// Approval workflow state. Independent of every compliance field.
    pub approval_status: ApprovalStatus,
    /// Worst risk among the entity's own documents.
    pub own_risk: RiskLevel,
    /// Status folded from this node and all of its descendants.
    pub combined_status: ComplianceStatus,
    /// Own documents that are expiring or expired.
    pub issues: usize,
    /// Expiring or expired documents across the whole subtree.
    pub subtree_issues: usize,
    /// Entity whose own documents set `combined_status`.
    pub driver: Option<EntityId>,
    /// Own documents with derived status.
    pub documents: Vec<DocumentView>,
    /// Children in insertion order.
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    /// Visit this node and every descendant in pre-order.
    pub fn walk(&self) -> Vec<&HierarchyNode> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.walk());
        }
        out
    }

    /// Find a node by entity id within this subtree.
    pub fn find(&self, id: EntityId) -> Option<&HierarchyNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }
}

// ─── Fold ────────────────────────────────────────────────────────────

/// Accumulated severity of a subtree.
#[derive(Debug, Clone, Copy)]
struct SubtreeFold {
    worst: RiskLevel,
    driver: Option<EntityId>,
    subtree_issues: usize,
}

impl SubtreeFold {
    fn leaf(id: EntityId, own_risk: RiskLevel, issues: usize) -> Self {
        Self {
            worst: own_risk,
            driver: own_risk.is_issue().then_some(id),
            subtree_issues: issues,
        }
    }

    /// Absorb a child's fold. Strictly-worse replaces, so ties keep the
    /// earlier driver.
    fn absorb(&mut self, child: SubtreeFold) {
        if child.worst > self.worst {
            self.worst = child.worst;
            self.driver = child.driver;
        }
        self.subtree_issues += child.subtree_issues;
    }
}

/// Parent → children adjacency, built once per query.
struct ChildIndex<'a> {
    children: HashMap<EntityId, Vec<&'a Entity>>,
}

impl<'a> ChildIndex<'a> {
    fn build(engine: &'a ComplianceEngine) -> Self {
        let mut children: HashMap<EntityId, Vec<&'a Entity>> = HashMap::new();
        for entity in engine.entities() {
            if let Some(parent) = entity.parent_id {
                children.entry(parent).or_default().push(entity);
            }
        }
        Self { children }
    }

    fn of(&self, id: EntityId) -> &[&'a Entity] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}

// ─── Queries ─────────────────────────────────────────────────────────

impl ComplianceEngine {
    /// Own risk and combined status of one entity on `now`.
    ///
    /// Pure: two calls with the same `now` and unchanged state return the
    /// same result.
    pub fn entity_status(
        &self,
        id: EntityId,
        now: CalendarDate,
    ) -> Result<EntityStatus, EngineError> {
        let entity = self.entity(id)?;
        let index = ChildIndex::build(self);
        let fold = self.fold(entity, &index, now, &mut HashMap::new());
        Ok(self.status_from_fold(entity, fold, now))
    }

    /// Status of every entity on `now`, in insertion order.
    pub fn all_statuses(&self, now: CalendarDate) -> Vec<EntityStatus> {
        let index = ChildIndex::build(self);
        let mut memo = HashMap::new();
        self.entities()
            .map(|entity| {
                let fold = self.fold(entity, &index, now, &mut memo);
                self.status_from_fold(entity, fold, now)
            })
            .collect()
    }

    /// Render the subtree rooted at `root_id` with derived statuses.
    pub fn hierarchy(
        &self,
        root_id: EntityId,
        now: CalendarDate,
    ) -> Result<HierarchyNode, EngineError> {
        let root = self.entity(root_id)?;
        let index = ChildIndex::build(self);
        Ok(self.render(root, &index, now).0)
    }

    fn status_from_fold(
        &self,
        entity: &Entity,
        fold: SubtreeFold,
        now: CalendarDate,
    ) -> EntityStatus {
        EntityStatus {
            entity_id: entity.id,
            own_risk: entity.own_risk(now, self.policy()),
            combined_status: fold.worst.status(),
            issues: entity.issue_count(now, self.policy()),
            subtree_issues: fold.subtree_issues,
            driver: fold.driver,
        }
    }

    /// Post-order fold of the subtree under `entity`. Every visited node is
    /// recorded in `memo` so a batch query folds each subtree once.
    fn fold(
        &self,
        entity: &Entity,
        index: &ChildIndex<'_>,
        now: CalendarDate,
        memo: &mut HashMap<EntityId, SubtreeFold>,
    ) -> SubtreeFold {
        if let Some(done) = memo.get(&entity.id) {
            return *done;
        }
        let mut acc = SubtreeFold::leaf(
            entity.id,
            entity.own_risk(now, self.policy()),
            entity.issue_count(now, self.policy()),
        );
        for child in index.of(entity.id) {
            acc.absorb(self.fold(child, index, now, memo));
        }
        memo.insert(entity.id, acc);
        acc
    }

    fn render(
        &self,
        entity: &Entity,
        index: &ChildIndex<'_>,
        now: CalendarDate,
    ) -> (HierarchyNode, SubtreeFold) {
        let own_risk = entity.own_risk(now, self.policy());
        let issues = entity.issue_count(now, self.policy());
        let mut acc = SubtreeFold::leaf(entity.id, own_risk, issues);

        let mut children = Vec::new();
        for child in index.of(entity.id) {
            let (node, fold) = self.render(child, index, now);
            acc.absorb(fold);
            children.push(node);
        }

        let node = HierarchyNode {
            id: entity.id,
            name: entity.name.clone(),
            tier: entity.tier,
            approval_status: entity.approval_status,
            own_risk,
            combined_status: acc.worst.status(),
            issues,
            subtree_issues: acc.subtree_issues,
            driver: acc.driver,
            documents: entity
                .documents
                .iter()
                .map(|d| d.view(now, self.policy()))
                .collect(),
            children,
        };
        (node, acc)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
