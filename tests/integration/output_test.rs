//! Rendering real plans in every output format

use std::fs;

use guardsmith::{
    core::GuardSession,
    models::OutputFormat,
    output::{create_formatter, create_writer, Formatter, OutputWriter},
};
use tempfile::tempdir;

use super::support::{create_shop_project, settings_for};

#[test]
fn test_json_plan_round_trips() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    create_shop_project(root);
    let plan = GuardSession::new(settings_for(root)).run().unwrap();

    let json = create_formatter(OutputFormat::Json, false, false, false)
        .format(&plan)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["modules_scanned"], 4);
    assert_eq!(value["files"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["files"][0]["guards"][0]["name"]["naming"], "custom");
    assert_eq!(value["files"][0]["guards"][0]["name"]["name"], "isUser");

    let back: guardsmith::GuardPlan = serde_json::from_str(&json).unwrap();
    assert_eq!(back, plan);
}

#[test]
fn test_csv_has_one_row_per_guard() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    create_shop_project(root);
    let mut settings = settings_for(root);
    settings.process.export_all = true;
    let plan = GuardSession::new(settings).run().unwrap();
    let guards: usize = plan.files.iter().map(|file| file.guards.len()).sum();

    let csv = create_formatter(OutputFormat::Csv, false, false, false)
        .format(&plan)
        .unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert!(lines[0].starts_with("Source,Output,Declaration"));
    // header + guards + summary
    assert_eq!(lines.len(), guards + 2);
    assert!(lines.iter().any(|line| line.contains(",isOrderId,derived,")));
    assert!(lines[lines.len() - 1].starts_with("SUMMARY"));
}

#[test]
fn test_text_plan_written_to_file() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("project");
    create_shop_project(&root);
    let plan = GuardSession::new(settings_for(&root)).run().unwrap();

    let text = create_formatter(OutputFormat::Text, false, false, false)
        .format(&plan)
        .unwrap();
    let out = dir.path().join("plan.txt");
    create_writer(Some(&out)).write(&text).unwrap();

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("Guard Generation Plan"));
    assert!(written.contains("isOrder (interface Order, custom name)"));
    assert!(!written.contains("\u{1b}["));
}
