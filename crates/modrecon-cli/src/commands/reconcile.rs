//! Reconcile command
//!
//! Usage: modrecon --hosts-file <NAME> [--format xlsx|csv|html] [--summary]

use clap::Args;
use modrecon_core::diff::render_summary;
use modrecon_engine::{run, ConfigOverrides, OutputFormat, ReconConfig};
use modrecon_errors::ExError;
use modrecon_logging::Profile;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReconcileArgs {
    /// Host player's manifest, with or without the .json extension
    #[arg(long = "hosts-file", value_name = "NAME")]
    pub hosts_file: String,

    /// Report format [default: xlsx]
    #[arg(long, value_name = "FORMAT", value_parser = parse_format)]
    pub format: Option<OutputFormat>,

    /// Folder holding one manifest per player [default: data/settings_json]
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Folder receiving the reports [default: data/conflict_analysis]
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Game key inside the mod table [default: baldursgate3]
    #[arg(long, value_name = "KEY")]
    pub game: Option<String>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log profile: development or production
    #[arg(long, value_name = "PROFILE")]
    pub log_profile: Option<String>,

    /// Also append logs to a dated file in this folder
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Print a Markdown summary to stdout
    #[arg(long)]
    pub summary: bool,
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.message().to_string())
}

/// Execute the reconcile command
pub fn execute(args: ReconcileArgs) -> Result<(), ExError> {
    let overrides = ConfigOverrides {
        data_dir: args.data_dir,
        output_dir: args.output_dir,
        game_key: args.game,
        format: args.format,
        log_profile: args.log_profile,
        log_dir: args.log_dir,
    };
    let config = ReconConfig::resolve(args.config.as_deref(), overrides)?;

    let profile = match config.logging.profile.as_deref() {
        Some(name) => name.parse::<Profile>()?,
        None => Profile::Development,
    };
    modrecon_logging::init_with_log_dir(profile, config.logging.dir.as_deref())?;

    let report = run(&config, &args.hosts_file)?;

    if args.summary {
        print!("{}", render_summary(&report.outcome));
    }
    for path in &report.written {
        println!("{}", path.display());
    }
    Ok(())
}
