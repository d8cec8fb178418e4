//! CLI argument definitions for `dars`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use dars_audit::config::ConfigOverrides;
use dars_audit::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

/// Output format accepted by `dars report`
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum ReportFormatArg {
    /// Markdown document
    #[value(alias = "md")]
    Markdown,
    /// HTML page
    #[value(alias = "htm")]
    Html,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `reports_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Parse extracted DARS report text into JSON.
    Parse {
        /// Path to the extracted report text
        #[arg(value_name = "FILE")]
        input_file: PathBuf,

        /// Write JSON to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Write JSON to `<output_dir>/<FILE stem>.json` from the config
        #[arg(long, conflicts_with = "output")]
        save: bool,

        /// Emit compact JSON
        #[arg(long)]
        compact: bool,

        /// Leave the summary digest out of the output
        #[arg(long)]
        no_summary: bool,
    },
    /// Check that a file looks like a DARS report without parsing it.
    Validate {
        /// Path to the extracted report text
        #[arg(value_name = "FILE")]
        input_file: PathBuf,
    },
    /// Print a readable digest of a parsed report.
    Summary {
        /// Path to the extracted report text
        #[arg(value_name = "FILE")]
        input_file: PathBuf,
    },
    /// Render a parsed report as Markdown or HTML.
    Report {
        /// Path to the extracted report text
        #[arg(value_name = "FILE")]
        input_file: PathBuf,

        /// Output file path (optional; defaults to the configured reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Report format
        #[arg(short, long, value_enum, default_value = "html")]
        format: ReportFormatArg,
    },
    /// Build a prerequisite graph from an AND/OR expression file.
    Prereq {
        /// JSON file holding the prerequisite expression
        #[arg(value_name = "JSON")]
        input_file: PathBuf,

        /// Course the prerequisites belong to (e.g., "COMP SCI 400")
        #[arg(short, long, value_name = "COURSE")]
        course: String,

        /// Emit compact JSON
        #[arg(long)]
        compact: bool,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "dars",
    about = "Degree audit (DARS) report parser",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the high-credit warning threshold
    #[arg(long = "credit-threshold", value_name = "CREDITS")]
    pub credit_threshold: Option<f64>,

    /// Override config reports directory
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Override config JSON output directory
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `--no-summary` on `parse` becomes an `include_summary` override so the rest of
    /// the run sees one effective configuration.
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let include_summary = match &self.command {
            Command::Parse {
                no_summary: true, ..
            } => Some(false),
            _ => None,
        };

        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            credit_warning_threshold: self.credit_threshold,
            include_summary,
            reports_dir: self
                .reports_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            output_dir: self
                .output_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("dars").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = cli(&["config"]).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.credit_warning_threshold.is_none());
        assert!(overrides.include_summary.is_none());
        assert!(overrides.reports_dir.is_none());
        assert!(overrides.output_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let overrides = cli(&[
            "--config-level",
            "debug",
            "--config-log-file",
            "/tmp/test.log",
            "--config-verbose",
            "yes",
            "--credit-threshold",
            "150",
            "--reports-dir",
            "/reports",
            "validate",
            "audit.txt",
        ])
        .to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.credit_warning_threshold, Some(150.0));
        assert_eq!(overrides.reports_dir, Some("/reports".to_string()));
        assert!(overrides.include_summary.is_none());
    }

    #[test]
    fn test_no_summary_becomes_override() {
        let overrides = cli(&["parse", "audit.txt", "--no-summary"]).to_config_overrides();
        assert_eq!(overrides.include_summary, Some(false));
    }

    #[test]
    fn test_report_format_aliases() {
        let args = cli(&["report", "audit.txt", "-f", "md"]);
        assert!(matches!(
            args.command,
            Command::Report {
                format: ReportFormatArg::Markdown,
                ..
            }
        ));
    }
}
