//! # Dashboard Summary
//!
//! Aggregate counters over the whole engine for an overview screen:
//! entities per combined compliance status, per approval status and per
//! tier, plus the total number of open document issues.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use workchain_core::CalendarDate;

use crate::engine::ComplianceEngine;
use crate::entity::{ApprovalStatus, Tier};
use crate::risk::ComplianceStatus;

/// Engine-wide counters on an evaluation date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    /// The evaluation date the counters were derived for.
    pub evaluated_on: CalendarDate,
    /// Total number of entities.
    pub total_entities: usize,
    /// Entities per tier.
    pub by_tier: BTreeMap<Tier, usize>,
    /// Entities whose combined status is compliant.
    pub compliant: usize,
    /// Entities whose combined status is warning.
    pub warning: usize,
    /// Entities whose combined status is critical.
    pub critical: usize,
    /// Entities awaiting an approval decision.
    pub pending_approval: usize,
    /// Approved entities.
    pub approved: usize,
    /// Rejected entities.
    pub rejected: usize,
    /// Expiring or expired documents across all entities.
    pub open_issues: usize,
}

impl ComplianceEngine {
    /// Engine-wide counters on `now`.
    pub fn summary(&self, now: CalendarDate) -> ComplianceSummary {
        let mut summary = ComplianceSummary {
            evaluated_on: now,
            total_entities: self.len(),
            by_tier: Tier::all().iter().map(|&t| (t, 0)).collect(),
            compliant: 0,
            warning: 0,
            critical: 0,
            pending_approval: 0,
            approved: 0,
            rejected: 0,
            open_issues: 0,
        };

        for status in self.all_statuses(now) {
            match status.combined_status {
                ComplianceStatus::Compliant => summary.compliant += 1,
                ComplianceStatus::Warning => summary.warning += 1,
                ComplianceStatus::Critical => summary.critical += 1,
            }
            summary.open_issues += status.issues;
        }

        for entity in self.entities() {
            *summary.by_tier.entry(entity.tier).or_default() += 1;
            match entity.approval_status {
                ApprovalStatus::Pending => summary.pending_approval += 1,
                ApprovalStatus::Approved => summary.approved += 1,
                ApprovalStatus::Rejected => summary.rejected += 1,
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ApprovalDecision;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    #[test]
    fn test_empty_engine_summary() {
        let engine = ComplianceEngine::new();
        let s = engine.summary(date("2024-02-07"));
        assert_eq!(s.total_entities, 0);
        assert_eq!(s.compliant + s.warning + s.critical, 0);
        assert_eq!(s.by_tier.len(), 3);
        assert!(s.by_tier.values().all(|&n| n == 0));
    }

    #[test]
    fn test_counts_add_up() {
        let now = date("2024-02-07");
        let (mut engine, client) = ComplianceEngine::with_client("MegaCorp Industries");
        let buildco = engine
            .add_entity("BuildCo Ltd", Tier::Contractor, Some(client))
            .unwrap();
        let elite = engine
            .add_entity("Elite Contractors", Tier::Contractor, Some(client))
            .unwrap();
        let quick = engine
            .add_entity("QuickBuild Services", Tier::Subcontractor, Some(buildco))
            .unwrap();
        engine.add_document(quick, "EL Insurance", date("2024-01-05")).unwrap();
        engine.add_document(elite, "PL Insurance", date("2024-02-28")).unwrap();
        engine.set_approval(buildco, ApprovalDecision::Approve).unwrap();
        engine.set_approval(elite, ApprovalDecision::Reject).unwrap();

        let s = engine.summary(now);
        assert_eq!(s.total_entities, 4);
        assert_eq!(s.compliant + s.warning + s.critical, s.total_entities);
        // MegaCorp, BuildCo and QuickBuild are critical; Elite is warning.
        assert_eq!(s.critical, 3);
        assert_eq!(s.warning, 1);
        assert_eq!(s.compliant, 0);
        assert_eq!(s.pending_approval, 2);
        assert_eq!(s.approved, 1);
        assert_eq!(s.rejected, 1);
        assert_eq!(s.open_issues, 2);
        assert_eq!(s.by_tier[&Tier::Contractor], 2);
        assert_eq!(s.by_tier[&Tier::Subcontractor], 1);
    }

    #[test]
    fn test_approval_only_moves_approval_counters() {
        let now = date("2024-02-07");
        let (mut engine, client) = ComplianceEngine::with_client("MegaCorp Industries");
        let buildco = engine
            .add_entity("BuildCo Ltd", Tier::Contractor, Some(client))
            .unwrap();
        let elite = engine
            .add_entity("Elite Contractors", Tier::Contractor, Some(client))
            .unwrap();
        let quick = engine
            .add_entity("QuickBuild Services", Tier::Subcontractor, Some(buildco))
            .unwrap();
        engine.add_document(quick, "EL Insurance", date("2024-01-05")).unwrap();
        engine.add_document(elite, "PL Insurance", date("2024-02-28")).unwrap();

        let before = engine.summary(now);
        engine.set_approval(buildco, ApprovalDecision::Approve).unwrap();
        engine.set_approval(quick, ApprovalDecision::Reject).unwrap();
        let after = engine.summary(now);

        assert_eq!(after.total_entities, before.total_entities);
        assert_eq!(after.by_tier, before.by_tier);
        assert_eq!(after.compliant, before.compliant);
        assert_eq!(after.warning, before.warning);
        assert_eq!(after.critical, before.critical);
        assert_eq!(after.open_issues, before.open_issues);

        assert_eq!(before.pending_approval, 4);
        assert_eq!((before.approved, before.rejected), (0, 0));
        assert_eq!(after.pending_approval, 2);
        assert_eq!((after.approved, after.rejected), (1, 1));
    }

    #[test]
    fn test_summary_serializes_tier_keys() {
        let (engine, _) = ComplianceEngine::with_client("MegaCorp Industries");
        let json = serde_json::to_value(engine.summary(date("2024-02-07"))).unwrap();
        assert_eq!(json["by_tier"]["client"], 1);
        assert_eq!(json["evaluated_on"], "2024-02-07");
    }
}
