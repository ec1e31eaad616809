//! Handler-level tests against the MegaCorp fixture and temporary files.

use std::io::Write;
use std::path::PathBuf;

use workchain_cli::input::SnapshotArgs;
use workchain_cli::report::OutputFormat;
use workchain_cli::status::{run_status, StatusArgs};
use workchain_cli::summary::{run_summary, SummaryArgs};
use workchain_cli::tree::{run_tree, TreeArgs};
use workchain_cli::Settings;
use workchain_core::CalendarDate;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/megacorp.yaml")
}

fn input(format: OutputFormat) -> SnapshotArgs {
    SnapshotArgs {
        snapshot: fixture(),
        as_of: Some(CalendarDate::parse("2024-02-07").unwrap()),
        format,
    }
}

fn status_json(entity: &str, settings: &Settings) -> serde_json::Value {
    let args = StatusArgs {
        input: input(OutputFormat::Json),
        entity: entity.to_string(),
    };
    let mut out = Vec::new();
    assert_eq!(run_status(&args, settings, &mut out).unwrap(), 0);
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn fixture_statuses_on_last_check_date() {
    let settings = Settings::default();
    for (entity, expected) in [
        ("MegaCorp Industries", "critical"),
        ("BuildCo Ltd", "critical"),
        ("QuickBuild Services", "critical"),
        ("Elite Contractors", "warning"),
    ] {
        let json = status_json(entity, &settings);
        assert_eq!(json["combined_status"], expected, "{entity}");
    }

    let buildco = status_json("BuildCo Ltd", &settings);
    assert_eq!(buildco["own_risk"], "green");
    assert_eq!(buildco["driver_name"], "QuickBuild Services");
    assert_eq!(buildco["approval_status"], "approved");
}

#[test]
fn narrower_window_clears_elite_warning() {
    // Elite's insurance is 21 days out; a 14-day window no longer flags it.
    let settings = Settings {
        expiring_window_days: Some(14),
    };
    let json = status_json("elite", &settings);
    assert_eq!(json["combined_status"], "compliant");
    assert!(json["driver"].is_null());
}

#[test]
fn tree_text_from_fixture() {
    let args = TreeArgs {
        input: input(OutputFormat::Text),
        root: None,
        documents: false,
    };
    let mut out = Vec::new();
    run_tree(&args, &Settings::default(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "MegaCorp Industries [CRITICAL] client, own green, pending\n\
         ├── BuildCo Ltd [CRITICAL] contractor, own green, approved\n\
         │   └── QuickBuild Services [CRITICAL] subcontractor, own red, pending\n\
         └── Elite Contractors [WARNING] contractor, own amber, pending\n"
    );
}

#[test]
fn tree_from_named_root() {
    let args = TreeArgs {
        input: input(OutputFormat::Json),
        root: Some("BuildCo Ltd".to_string()),
        documents: false,
    };
    let mut out = Vec::new();
    run_tree(&args, &Settings::default(), &mut out).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["name"], "BuildCo Ltd");
    assert_eq!(json["children"].as_array().unwrap().len(), 1);
    assert_eq!(json["subtree_issues"], 1);
}

#[test]
fn summary_json_from_fixture() {
    let args = SummaryArgs {
        input: input(OutputFormat::Json),
    };
    let mut out = Vec::new();
    run_summary(&args, &Settings::default(), &mut out).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["total_entities"], 4);
    assert_eq!(json["critical"], 3);
    assert_eq!(json["warning"], 1);
    assert_eq!(json["compliant"], 0);
    assert_eq!(json["open_issues"], 2);
    assert_eq!(json["pending_approval"], 3);
    assert_eq!(json["by_tier"]["contractor"], 2);
}

#[test]
fn unknown_entity_is_an_error() {
    let args = StatusArgs {
        input: input(OutputFormat::Text),
        entity: "Nobody Ltd".to_string(),
    };
    let mut out = Vec::new();
    let err = run_status(&args, &Settings::default(), &mut out).unwrap_err();
    assert!(err.to_string().contains("Nobody Ltd"));
    assert!(out.is_empty());
}

#[test]
fn json_snapshot_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{"entities": [
            {{"key": "c", "name": "C", "tier": "client"}},
            {{"key": "a", "name": "A", "tier": "contractor", "parent": "c",
              "documents": [{{"name": "Insurance", "expiry_date": "2024-02-02"}}]}}
        ]}}"#
    )
    .unwrap();

    let args = SummaryArgs {
        input: SnapshotArgs {
            snapshot: file.path().to_path_buf(),
            as_of: Some(CalendarDate::parse("2024-02-07").unwrap()),
            format: OutputFormat::Text,
        },
    };
    let mut out = Vec::new();
    run_summary(&args, &Settings::default(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("critical:        2"));
}
