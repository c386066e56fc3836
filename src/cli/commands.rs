//! Command implementations

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use super::Args;
use crate::config::{self, CliArgs, DEFAULT_CONFIG_FILE};
use crate::core::GuardSession;
use crate::error::{ErrorSeverity, Result};
use crate::logging;
use crate::models::GuardPlan;
use crate::output::{create_formatter, create_progress_callback, create_writer, Formatter, OutputWriter, ProgressReporter};

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Plan guards for a project
    Run(Args),
    /// Initialize a default configuration file
    Init,
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init;
        }
        Command::Run(args)
    }

    /// Execute the command, returning the process exit code on success
    pub fn execute(&self) -> Result<i32> {
        match self {
            Command::Run(args) => {
                let settings = config::load_config(CliArgs::from(args))?;
                logging::apply_settings(&settings);
                debug!(?settings, "resolved settings");

                let reporter = Arc::new(ProgressReporter::new(
                    settings.show_progress,
                    settings.quiet,
                    settings.verbose,
                ));
                logging::attach_progress(reporter.multi_progress());
                reporter.start(0, "Parsing sources");

                let session = GuardSession::new(settings);
                let plan = session.run_with_progress(create_progress_callback(reporter.clone()));
                reporter.finish("Done");
                logging::attach_progress(None);
                let plan = plan?;

                write_plan(&plan, session.settings())?;
                Ok(exit_code_for(&plan))
            }
            Command::Init => {
                let config_path = Path::new(DEFAULT_CONFIG_FILE);
                if init_config(config_path)? {
                    println!("Created default configuration file at: {}", config_path.display());
                    println!("Edit it to set the project root, exclusions and generation options.");
                } else {
                    println!("Configuration file already exists at: {}", config_path.display());
                    println!("To overwrite it, delete the file first and run this command again.");
                }
                Ok(0)
            }
        }
    }

    /// Run the command and handle errors
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(code) => code,
            Err(err) => {
                eprintln!("{}: {}", err.severity(), err.user_message());
                exit_code_for_severity(err.severity())
            }
        }
    }
}

/// Write the default configuration to `path` unless a file is already there
pub fn init_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    config::create_default_config(path)?;
    info!(path = %path.display(), "wrote default configuration");
    Ok(true)
}

fn write_plan(plan: &GuardPlan, settings: &crate::models::Settings) -> Result<()> {
    let use_colors = settings.use_colors && settings.output_file.is_none();
    let formatter = create_formatter(settings.output_format, use_colors, settings.verbose, settings.quiet);
    let output = formatter.format(plan)?;
    create_writer(settings.output_file.as_ref()).write(&output)
}

fn exit_code_for(plan: &GuardPlan) -> i32 {
    if plan.has_failures() {
        1
    } else {
        0
    }
}

fn exit_code_for_severity(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Warning => 0,
        ErrorSeverity::Error => 1,
        ErrorSeverity::Critical => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_from_args() {
        let init = Command::from_args(Args::parse_from(["guardsmith", "--init"]));
        assert!(matches!(init, Command::Init));

        let run = Command::from_args(Args::parse_from(["guardsmith", "--export-all"]));
        assert!(matches!(run, Command::Run(_)));
    }

    #[test]
    fn test_init_config_does_not_overwrite() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);

        assert!(init_config(&path).unwrap());
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("guard_file_name"));

        fs::write(&path, "export_all = true\n").unwrap();
        assert!(!init_config(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "export_all = true\n");
    }

    #[test]
    fn test_run_writes_plan_file() {
        let temp_dir = tempdir().unwrap();
        let project = temp_dir.path().join("app");
        fs::create_dir_all(project.join("src")).unwrap();
        fs::write(
            project.join("src/user.ts"),
            "/** @see {isUser} ts-auto-guard:type-guard */\nexport interface User { name: string }\n",
        )
        .unwrap();
        let plan_path = temp_dir.path().join("plan.json");
        let config_path = temp_dir.path().join("empty.toml");
        fs::write(&config_path, "").unwrap();

        let args = Args::parse_from([
            "guardsmith".to_string(),
            "--project".to_string(),
            project.display().to_string(),
            "--config".to_string(),
            config_path.display().to_string(),
            "-o".to_string(),
            "json".to_string(),
            "--output-file".to_string(),
            plan_path.display().to_string(),
            "--no-progress".to_string(),
            "-q".to_string(),
        ]);

        let code = Command::from_args(args).run();
        assert_eq!(code, 0);

        let plan: serde_json::Value = serde_json::from_str(&fs::read_to_string(&plan_path).unwrap()).unwrap();
        assert_eq!(plan["files"][0]["guards"][0]["function_name"], "isUser");
    }

    #[test]
    fn test_run_reports_missing_project() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("empty.toml");
        fs::write(&config_path, "").unwrap();

        let args = Args::parse_from([
            "guardsmith".to_string(),
            "--project".to_string(),
            temp_dir.path().join("absent").display().to_string(),
            "--config".to_string(),
            config_path.display().to_string(),
            "--no-progress".to_string(),
        ]);

        assert_ne!(Command::from_args(args).run(), 0);
    }
}
