//! # workchain CLI entry point
//!
//! Parses command-line arguments, initialises logging, and dispatches to
//! the subcommand handlers in the library crate.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use workchain_cli::status::{run_status, StatusArgs};
use workchain_cli::summary::{run_summary, SummaryArgs};
use workchain_cli::tree::{run_tree, TreeArgs};
use workchain_cli::Settings;

/// WorkChain supply-chain compliance reporting.
///
/// Loads a snapshot of a client's contractors and subcontractors and
/// reports document expiry risk, bubbled up through the hierarchy.
#[derive(Parser, Debug)]
#[command(name = "workchain", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Days before expiry at which a document counts as expiring.
    /// Overrides the snapshot's policy.
    #[arg(long, global = true)]
    expiring_window_days: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Own risk and combined status of one entity.
    Status(StatusArgs),

    /// The supply-chain hierarchy with derived statuses.
    Tree(TreeArgs),

    /// Dashboard counters for the whole supply chain.
    Summary(SummaryArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("workchain CLI starting");

    let settings = Settings {
        expiring_window_days: cli.expiring_window_days,
    };
    let mut stdout = std::io::stdout().lock();

    let result = match &cli.command {
        Commands::Status(args) => run_status(args, &settings, &mut stdout),
        Commands::Tree(args) => run_tree(args, &settings, &mut stdout),
        Commands::Summary(args) => run_summary(args, &settings, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use workchain_cli::report::OutputFormat;
    use workchain_core::CalendarDate;

    #[test]
    fn cli_parse_status() {
        let cli = Cli::try_parse_from([
            "workchain",
            "status",
            "--snapshot",
            "chain.yaml",
            "--entity",
            "BuildCo Ltd",
            "--as-of",
            "2024-02-07",
        ])
        .unwrap();
        match cli.command {
            Commands::Status(args) => {
                assert_eq!(args.entity, "BuildCo Ltd");
                assert_eq!(args.input.snapshot, PathBuf::from("chain.yaml"));
                assert_eq!(
                    args.input.as_of,
                    Some(CalendarDate::parse("2024-02-07").unwrap())
                );
                assert_eq!(args.input.format, OutputFormat::Text);
            }
            other => panic!("Expected Status, got: {other:?}"),
        }
    }

    #[test]
    fn cli_parse_status_requires_entity() {
        let result = Cli::try_parse_from(["workchain", "status", "--snapshot", "chain.yaml"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parse_tree_with_root_and_json() {
        let cli = Cli::try_parse_from([
            "workchain",
            "tree",
            "--snapshot",
            "chain.json",
            "--root",
            "buildco",
            "--format",
            "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Tree(args) => {
                assert_eq!(args.root.as_deref(), Some("buildco"));
                assert_eq!(args.input.format, OutputFormat::Json);
                assert!(args.input.as_of.is_none());
                assert!(!args.documents);
            }
            other => panic!("Expected Tree, got: {other:?}"),
        }
    }

    #[test]
    fn cli_parse_summary() {
        let cli =
            Cli::try_parse_from(["workchain", "summary", "--snapshot", "chain.yaml"]).unwrap();
        assert!(matches!(cli.command, Commands::Summary(_)));
    }

    #[test]
    fn cli_parse_global_window_after_subcommand() {
        let cli = Cli::try_parse_from([
            "workchain",
            "summary",
            "--snapshot",
            "chain.yaml",
            "--expiring-window-days",
            "14",
        ])
        .unwrap();
        assert_eq!(cli.expiring_window_days, Some(14));
    }

    #[test]
    fn cli_parse_rejects_negative_window() {
        let result = Cli::try_parse_from([
            "workchain",
            "--expiring-window-days",
            "-3",
            "summary",
            "--snapshot",
            "chain.yaml",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parse_rejects_bad_date() {
        let result = Cli::try_parse_from([
            "workchain",
            "summary",
            "--snapshot",
            "chain.yaml",
            "--as-of",
            "07/02/2024",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parse_verbose_levels() {
        let base = ["summary", "--snapshot", "chain.yaml"];
        for (flag, level) in [(None, 0), (Some("-v"), 1), (Some("-vv"), 2), (Some("-vvv"), 3)] {
            let mut argv = vec!["workchain"];
            argv.extend(flag);
            argv.extend(base);
            let cli = Cli::try_parse_from(argv).unwrap();
            assert_eq!(cli.verbose, level);
        }
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["workchain"]).is_err());
    }

    #[test]
    fn cli_parse_invalid_format_errors() {
        let result = Cli::try_parse_from([
            "workchain",
            "summary",
            "--snapshot",
            "chain.yaml",
            "--format",
            "xml",
        ]);
        assert!(result.is_err());
    }
}
