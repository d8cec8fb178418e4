//! Command-line interface entry point for `dars`

mod args;
mod commands;

use args::{Cli, Command, ReportFormatArg};
use clap::Parser;
use dars_audit::config::Config;
use dars_audit::core::report::ReportFormat;
use dars_audit::info;
use dars_audit::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use std::path::PathBuf;

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config; otherwise use config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise use config logging.file if set
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let result = match args.command {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut config, &defaults),
        Command::Parse {
            input_file,
            output,
            save,
            compact,
            no_summary: _,
        } => commands::parse::run(
            &input_file,
            commands::parse::ParseOutput {
                output: output.as_deref(),
                save,
                compact,
            },
            &config,
        ),
        Command::Validate { input_file } => commands::validate::run(&input_file),
        Command::Summary { input_file } => commands::summary::run(&input_file, &config),
        Command::Report {
            input_file,
            output,
            format,
        } => {
            let format = match format {
                ReportFormatArg::Markdown => ReportFormat::Markdown,
                ReportFormatArg::Html => ReportFormat::Html,
            };
            commands::report::run(&input_file, output.as_deref(), format, &config)
        }
        Command::Prereq {
            input_file,
            course,
            compact,
        } => commands::prereq::run(&input_file, &course, compact),
    };

    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
