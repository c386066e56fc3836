//! Argument parsing and command dispatch

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use guardsmith::{
    cli::{args::OutputFormat, Args, Command},
    config::CliArgs,
    models,
};
use tempfile::tempdir;

use super::support::create_shop_project;

#[test]
fn test_cli_args_parsing() {
    let args = Args::parse_from(["guardsmith"]);
    assert_eq!(args.project, None);
    assert!(args.exclude.is_empty());
    assert_eq!(args.output, None);
    assert!(!args.clean);
    assert!(!args.quiet);

    let args = Args::parse_from([
        "guardsmith",
        "--project",
        "/work/app",
        "--exclude",
        "vendor",
        "--exclude",
        "legacy/**",
        "--export-all",
        "--guard-file-name",
        "check",
        "--output",
        "json",
        "--output-file",
        "plan.json",
        "--clean",
        "--dry-run",
        "--no-parallel",
        "src/a.ts",
        "src/models/*.ts",
    ]);

    assert_eq!(args.project, Some(PathBuf::from("/work/app")));
    assert_eq!(args.exclude, vec!["vendor".to_string(), "legacy/**".to_string()]);
    assert_eq!(args.paths, vec!["src/a.ts".to_string(), "src/models/*.ts".to_string()]);
    assert_eq!(args.output, Some(OutputFormat::Json));
    assert!(args.export_all && args.clean && args.dry_run && args.no_parallel);

    let cli = CliArgs::from(&args);
    assert_eq!(cli.output_format, Some(models::OutputFormat::Json));
    assert_eq!(cli.exclude, Some(vec!["vendor".to_string(), "legacy/**".to_string()]));
    assert_eq!(cli.guard_file_name.as_deref(), Some("check"));
}

#[test]
fn test_invalid_output_format_is_rejected() {
    assert!(Args::try_parse_from(["guardsmith", "--output", "yaml"]).is_err());
}

#[test]
fn test_run_command_writes_csv_plan() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("shop");
    create_shop_project(&root);
    let config_path = dir.path().join("empty.toml");
    fs::write(&config_path, "").unwrap();
    let plan_path = dir.path().join("plan.csv");

    let args = Args::parse_from([
        "guardsmith".to_string(),
        "--project".to_string(),
        root.display().to_string(),
        "--config".to_string(),
        config_path.display().to_string(),
        "--output".to_string(),
        "csv".to_string(),
        "--output-file".to_string(),
        plan_path.display().to_string(),
        "--no-progress".to_string(),
        "--quiet".to_string(),
    ]);

    assert_eq!(Command::from_args(args).run(), 0);

    let csv = fs::read_to_string(&plan_path).unwrap();
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.contains(",User,interface,isUser,custom,false,"));
    assert!(csv.contains(",Order,interface,isOrder,custom,false,"));
}

#[test]
fn test_run_command_exit_code_for_bad_config() {
    let dir = tempdir().unwrap();
    let args = Args::parse_from([
        "guardsmith".to_string(),
        "--project".to_string(),
        dir.path().display().to_string(),
        "--config".to_string(),
        dir.path().join("missing.toml").display().to_string(),
        "--no-progress".to_string(),
    ]);

    assert_eq!(Command::from_args(args).run(), 2);
}
