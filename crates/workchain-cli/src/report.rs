//! # Report Output
//!
//! Output format selection and the helpers shared by every text renderer.
//! Reports go to the writer the handler is given (stdout in the binary);
//! logs never do.

use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use workchain_compliance::{ComplianceStatus, DocumentView};

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize report")?;
    writeln!(out, "{json}").context("failed to write report")?;
    Ok(())
}

/// Upper-case badge for a combined status.
pub fn badge(status: ComplianceStatus) -> &'static str {
    match status {
        ComplianceStatus::Compliant => "COMPLIANT",
        ComplianceStatus::Warning => "WARNING",
        ComplianceStatus::Critical => "CRITICAL",
    }
}

/// One line per document: name, expiry, status and days remaining.
pub fn document_line(doc: &DocumentView) -> String {
    let days = match doc.days_until_expiry {
        0 => "expires today".to_string(),
        d if d < 0 => format!("expired {} days ago", -d),
        d => format!("{d} days left"),
    };
    format!(
        "{}  {}  {} ({})",
        doc.expiry_date,
        doc.status.as_str(),
        doc.name,
        days
    )
}
