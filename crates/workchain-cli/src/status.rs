//! # Status Subcommand
//!
//! `workchain status --snapshot <PATH> --entity <NAME>` reports one
//! entity's own risk, combined status, the entity driving that status, and
//! its documents.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use workchain_compliance::{
    ApprovalStatus, ComplianceEngine, ComplianceStatus, DocumentView, RiskLevel, Tier,
};
use workchain_core::{CalendarDate, EntityId};

use crate::input::{load_snapshot, resolve_entity, SnapshotArgs};
use crate::report::{badge, document_line, write_json, OutputFormat};
use crate::Settings;

/// Arguments for `workchain status`.
#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[command(flatten)]
    pub input: SnapshotArgs,

    /// Entity display name (or snapshot key).
    #[arg(long)]
    pub entity: String,
}

/// Everything `status` reports about one entity.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub evaluated_on: CalendarDate,
    pub entity_id: EntityId,
    pub name: String,
    pub tier: Tier,
    pub approval_status: ApprovalStatus,
    pub own_risk: RiskLevel,
    pub combined_status: ComplianceStatus,
    pub issues: usize,
    pub subtree_issues: usize,
    pub driver: Option<EntityId>,
    pub driver_name: Option<String>,
    pub documents: Vec<DocumentView>,
}

/// Assemble the report for `id` on `now`.
pub fn build_report(
    engine: &ComplianceEngine,
    id: EntityId,
    now: CalendarDate,
) -> Result<StatusReport> {
    let entity = engine.entity(id)?;
    let status = engine.entity_status(id, now)?;
    let driver_name = match status.driver {
        Some(driver) => Some(engine.entity(driver)?.name.clone()),
        None => None,
    };
    Ok(StatusReport {
        evaluated_on: now,
        entity_id: id,
        name: entity.name.clone(),
        tier: entity.tier,
        approval_status: entity.approval_status,
        own_risk: status.own_risk,
        combined_status: status.combined_status,
        issues: status.issues,
        subtree_issues: status.subtree_issues,
        driver: status.driver,
        driver_name,
        documents: engine.document_views(id, now)?,
    })
}

/// Execute the status subcommand.
pub fn run_status<W: Write>(args: &StatusArgs, settings: &Settings, out: &mut W) -> Result<u8> {
    let loaded = load_snapshot(&args.input.snapshot, settings)?;
    let id = resolve_entity(&loaded, &args.entity)?;
    let report = build_report(&loaded.engine, id, args.input.evaluation_date())?;

    match args.input.format {
        OutputFormat::Json => write_json(out, &report)?,
        OutputFormat::Text => write_text(out, &report).context("failed to write report")?,
    }
    Ok(0)
}

fn write_text<W: Write>(out: &mut W, r: &StatusReport) -> std::io::Result<()> {
    writeln!(out, "{} [{}]", r.name, badge(r.combined_status))?;
    writeln!(out, "  tier:             {}", r.tier)?;
    writeln!(out, "  approval:         {}", r.approval_status)?;
    writeln!(out, "  evaluated on:     {}", r.evaluated_on)?;
    writeln!(out, "  own risk:         {}", r.own_risk)?;
    writeln!(out, "  combined status:  {}", r.combined_status)?;
    if let Some(driver) = &r.driver_name {
        writeln!(out, "  driven by:        {driver}")?;
    }
    writeln!(
        out,
        "  issues:           {} own, {} in subtree",
        r.issues, r.subtree_issues
    )?;
    if r.documents.is_empty() {
        writeln!(out, "  documents:        none")?;
    } else {
        writeln!(out, "  documents:")?;
        for doc in &r.documents {
            writeln!(out, "    {}", document_line(doc))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use workchain_compliance::ApprovalDecision;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    fn engine() -> (ComplianceEngine, EntityId, EntityId) {
        let (mut engine, client) = ComplianceEngine::with_client("MegaCorp Industries");
        let buildco = engine
            .add_entity("BuildCo Ltd", Tier::Contractor, Some(client))
            .unwrap();
        let quick = engine
            .add_entity("QuickBuild Services", Tier::Subcontractor, Some(buildco))
            .unwrap();
        engine
            .add_document(quick, "Employer Liability Insurance", date("2024-01-05"))
            .unwrap();
        engine.set_approval(buildco, ApprovalDecision::Approve).unwrap();
        (engine, buildco, quick)
    }

    #[test]
    fn report_names_the_driver() {
        let (engine, buildco, quick) = engine();
        let report = build_report(&engine, buildco, date("2024-02-07")).unwrap();
        assert_eq!(report.combined_status, ComplianceStatus::Critical);
        assert_eq!(report.own_risk, RiskLevel::Green);
        assert_eq!(report.driver, Some(quick));
        assert_eq!(report.driver_name.as_deref(), Some("QuickBuild Services"));
        assert_eq!(report.approval_status, ApprovalStatus::Approved);
    }

    #[test]
    fn text_report_layout() {
        let (engine, buildco, _) = engine();
        let report = build_report(&engine, buildco, date("2024-02-07")).unwrap();
        let mut out = Vec::new();
        write_text(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("BuildCo Ltd [CRITICAL]\n"));
        assert!(text.contains("driven by:        QuickBuild Services"));
        assert!(text.contains("documents:        none"));
    }

    #[test]
    fn json_report_uses_snake_case() {
        let (engine, _, quick) = engine();
        let report = build_report(&engine, quick, date("2024-02-07")).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["combined_status"], "critical");
        assert_eq!(json["tier"], "subcontractor");
        assert_eq!(json["documents"][0]["status"], "expired");
        assert_eq!(json["documents"][0]["days_until_expiry"], -33);
    }
}
