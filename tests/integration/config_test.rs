//! Layered configuration feeding a real run

use std::fs;

use guardsmith::{
    config::{load_config_with_env, parse_config_content, CliArgs, EnvConfig},
    core::GuardSession,
    error::GuardError,
    models::OutputFormat,
};
use tempfile::tempdir;

use super::support::{create_shop_project, write_file};

fn no_env() -> EnvConfig {
    EnvConfig::with_vars("GUARDSMITH", Vec::<(String, String)>::new())
}

#[test]
fn test_config_file_drives_the_run() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("shop");
    create_shop_project(&root);
    let config_path = dir.path().join("guardsmith.toml");
    fs::write(
        &config_path,
        format!(
            r#"project_path = {:?}
exportAll = true
guardFileName = "check"
exclude_patterns = ["node_modules", "src/models/index.ts"]
output_format = "json"
parallel = false
show_progress = false
importGuards = "Guards"
"#,
            root.display().to_string()
        ),
    )
    .unwrap();

    let cli = CliArgs {
        config: Some(config_path),
        ..Default::default()
    };
    let settings = load_config_with_env(cli, &no_env()).unwrap();

    assert!(settings.process.export_all);
    assert_eq!(settings.process.guard_file_name, "check");
    assert_eq!(settings.process.import_guards.as_deref(), Some("Guards"));
    assert_eq!(settings.output_format, OutputFormat::Json);

    let plan = GuardSession::new(settings).run().unwrap();
    assert_eq!(plan.modules_scanned, 3);
    assert!(plan.files.iter().all(|file| file.output.to_string_lossy().contains(".check.")));
    assert_eq!(plan.options.import_guards.as_deref(), Some("Guards"));
}

#[test]
fn test_cli_overrides_env_and_file() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "src/a.ts", "export type A = string;\n");
    let config_path = dir.path().join("guardsmith.toml");
    fs::write(
        &config_path,
        format!(
            "project_path = {:?}\nguard_file_name = \"fromfile\"\noutput_format = \"csv\"\n",
            dir.path().display().to_string()
        ),
    )
    .unwrap();

    let env = EnvConfig::with_vars(
        "GUARDSMITH",
        [("GUARDSMITH_GUARD_FILE_NAME", "fromenv"), ("GUARDSMITH_EXPORT_ALL", "true")],
    );
    let cli = CliArgs {
        config: Some(config_path),
        guard_file_name: Some("fromcli".to_string()),
        output_format: Some(OutputFormat::Text),
        ..Default::default()
    };

    let settings = load_config_with_env(cli, &env).unwrap();

    assert_eq!(settings.process.guard_file_name, "fromcli");
    assert!(settings.process.export_all);
    assert_eq!(settings.output_format, OutputFormat::Text);
}

#[test]
fn test_unknown_keys_are_passed_through() {
    let partial = parse_config_content("exportAll = true\nrendererTheme = \"dark\"\n", "guardsmith.toml").unwrap();
    assert_eq!(partial.export_all, Some(true));
    assert_eq!(
        partial.extra.get("rendererTheme"),
        Some(&toml::Value::String("dark".to_string()))
    );
}

#[test]
fn test_invalid_settings_are_rejected() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("guardsmith.toml");
    fs::write(
        &config_path,
        format!(
            "project_path = {:?}\nguard_file_name = \"bad.tag\"\n",
            dir.path().display().to_string()
        ),
    )
    .unwrap();

    let cli = CliArgs {
        config: Some(config_path),
        ..Default::default()
    };
    let result = load_config_with_env(cli, &no_env());
    assert!(matches!(result, Err(GuardError::Config { .. })));
}

#[test]
fn test_malformed_config_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("guardsmith.toml");
    fs::write(&config_path, "exportAll = = true\n").unwrap();

    let cli = CliArgs {
        config: Some(config_path),
        ..Default::default()
    };
    let result = load_config_with_env(cli, &no_env());
    assert!(result.is_err());
    assert!(result.unwrap_err().is_critical());
}
