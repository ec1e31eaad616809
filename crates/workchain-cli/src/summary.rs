//! # Summary Subcommand
//!
//! `workchain summary --snapshot <PATH>` prints the dashboard counters and
//! lists the entities still awaiting an approval decision.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use workchain_compliance::{ComplianceEngine, ComplianceSummary, Tier};
use workchain_core::CalendarDate;

use crate::input::{load_snapshot, SnapshotArgs};
use crate::report::{write_json, OutputFormat};
use crate::Settings;

/// Arguments for `workchain summary`.
#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: SnapshotArgs,
}

/// Counters plus the names behind the pending-approval count.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    #[serde(flatten)]
    pub summary: ComplianceSummary,
    pub awaiting_approval: Vec<String>,
}

/// Assemble the summary report on `now`.
pub fn build_report(engine: &ComplianceEngine, now: CalendarDate) -> Result<SummaryReport> {
    let awaiting_approval = engine
        .pending_approvals()
        .into_iter()
        .map(|id| engine.entity(id).map(|e| e.name.clone()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SummaryReport {
        summary: engine.summary(now),
        awaiting_approval,
    })
}

/// Execute the summary subcommand.
pub fn run_summary<W: Write>(args: &SummaryArgs, settings: &Settings, out: &mut W) -> Result<u8> {
    let loaded = load_snapshot(&args.input.snapshot, settings)?;
    let report = build_report(&loaded.engine, args.input.evaluation_date())?;

    match args.input.format {
        OutputFormat::Json => write_json(out, &report)?,
        OutputFormat::Text => write_text(out, &report).context("failed to write report")?,
    }
    Ok(0)
}

fn write_text<W: Write>(out: &mut W, r: &SummaryReport) -> std::io::Result<()> {
    let s = &r.summary;
    writeln!(out, "Supply chain as of {}", s.evaluated_on)?;
    writeln!(out, "  entities:        {}", s.total_entities)?;
    for tier in Tier::all() {
        let count = s.by_tier.get(tier).copied().unwrap_or(0);
        writeln!(out, "    {:<14} {count}", format!("{tier}:"))?;
    }
    writeln!(out, "  compliant:       {}", s.compliant)?;
    writeln!(out, "  warning:         {}", s.warning)?;
    writeln!(out, "  critical:        {}", s.critical)?;
    writeln!(out, "  open issues:     {}", s.open_issues)?;
    writeln!(
        out,
        "  approvals:       {} pending, {} approved, {} rejected",
        s.pending_approval, s.approved, s.rejected
    )?;
    for name in &r.awaiting_approval {
        writeln!(out, "    awaiting: {name}")?;
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

    fn engine() -> ComplianceEngine {
        let (mut engine, client) = ComplianceEngine::with_client("MegaCorp Industries");
        let buildco = engine
            .add_entity("BuildCo Ltd", Tier::Contractor, Some(client))
            .unwrap();
        engine
            .add_entity("Elite Contractors", Tier::Contractor, Some(client))
            .unwrap();
        engine
            .add_document(buildco, "Health & Safety Policy", date("2024-03-20"))
            .unwrap();
        engine.set_approval(buildco, ApprovalDecision::Approve).unwrap();
        engine
    }

    #[test]
    fn report_lists_pending_names() {
        let report = build_report(&engine(), date("2024-02-07")).unwrap();
        assert_eq!(
            report.awaiting_approval,
            vec!["MegaCorp Industries", "Elite Contractors"]
        );
        assert_eq!(report.summary.compliant, 3);
    }

    #[test]
    fn json_flattens_counters() {
        let report = build_report(&engine(), date("2024-03-01")).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total_entities"], 3);
        assert_eq!(json["warning"], 2);
        assert_eq!(json["approved"], 1);
        assert_eq!(json["awaiting_approval"][1], "Elite Contractors");
    }

    #[test]
    fn text_layout() {
        let report = build_report(&engine(), date("2024-02-07")).unwrap();
        let mut out = Vec::new();
        write_text(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Supply chain as of 2024-02-07\n"));
        assert!(text.contains("    contractor:    2\n"));
        assert!(text.contains("approvals:       2 pending, 1 approved, 0 rejected"));
        assert!(text.contains("    awaiting: Elite Contractors\n"));
    }
}
