//! # Tree Subcommand
//!
//! `workchain tree --snapshot <PATH> [--root <NAME>]` renders the hierarchy
//! below the client (or below `--root`) with every node's combined status.
//!
//! ```text
//! MegaCorp Industries [CRITICAL] client, own green, pending
//! ├── BuildCo Ltd [CRITICAL] contractor, own green, approved
//! │   └── QuickBuild Services [CRITICAL] subcontractor, own red, pending
//! └── Elite Contractors [WARNING] contractor, own amber, pending
//! ```

use std::io::Write;

use anyhow::{anyhow, Context, Result};
use clap::Args;

use workchain_compliance::HierarchyNode;

use crate::input::{load_snapshot, resolve_entity, SnapshotArgs};
use crate::report::{badge, document_line, write_json, OutputFormat};
use crate::Settings;

/// Arguments for `workchain tree`.
#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    #[command(flatten)]
    pub input: SnapshotArgs,

    /// Render from this entity (display name or snapshot key) instead of
    /// the client.
    #[arg(long)]
    pub root: Option<String>,

    /// List each entity's documents under it.
    #[arg(long)]
    pub documents: bool,
}

/// Execute the tree subcommand.
pub fn run_tree<W: Write>(args: &TreeArgs, settings: &Settings, out: &mut W) -> Result<u8> {
    let loaded = load_snapshot(&args.input.snapshot, settings)?;
    let root = match &args.root {
        Some(name) => resolve_entity(&loaded, name)?,
        None => loaded
            .engine
            .client()
            .ok_or_else(|| anyhow!("snapshot has no client entity"))?,
    };
    let tree = loaded
        .engine
        .hierarchy(root, args.input.evaluation_date())?;

    match args.input.format {
        OutputFormat::Json => write_json(out, &tree)?,
        OutputFormat::Text => {
            render_text(out, &tree, args.documents).context("failed to write report")?
        }
    }
    Ok(0)
}

/// Render `tree` with box-drawing connectors.
pub fn render_text<W: Write>(
    out: &mut W,
    tree: &HierarchyNode,
    documents: bool,
) -> std::io::Result<()> {
    writeln!(out, "{}", node_label(tree))?;
    write_details(out, tree, "", documents)?;
    Ok(())
}

fn node_label(node: &HierarchyNode) -> String {
    format!(
        "{} [{}] {}, own {}, {}",
        node.name,
        badge(node.combined_status),
        node.tier,
        node.own_risk,
        node.approval_status
    )
}

fn write_details<W: Write>(
    out: &mut W,
    node: &HierarchyNode,
    prefix: &str,
    documents: bool,
) -> std::io::Result<()> {
    if documents {
        let bar = if node.children.is_empty() { "  " } else { "│ " };
        for doc in &node.documents {
            writeln!(out, "{prefix}{bar}  · {}", document_line(doc))?;
        }
    }
    let last = node.children.len().saturating_sub(1);
    for (i, child) in node.children.iter().enumerate() {
        let (branch, indent) = if i == last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        writeln!(out, "{prefix}{branch}{}", node_label(child))?;
        write_details(out, child, &format!("{prefix}{indent}"), documents)?;
    }
    Ok(())
}
