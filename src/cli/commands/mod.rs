//! CLI command handlers for `dars`.
//!
//! Each command is implemented in its own submodule. Handlers that can fail return
//! `Result<(), String>` with a ready-to-print message; `main` prints it and exits
//! with a non-zero status.

pub mod config;
pub mod parse;
pub mod prereq;
pub mod report;
pub mod summary;
pub mod validate;

use dars_audit::config::Config;
use dars_audit::core::models::ParsedReport;
use dars_audit::core::parser::DarsParser;
use dars_audit::{error, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Read a text file, mapping failures to a printable message
pub fn read_input(input_file: &Path) -> Result<String, String> {
    fs::read_to_string(input_file).map_err(|e| {
        error!("Failed to read {}: {e}", input_file.display());
        format!("✗ Failed to read {}: {e}", input_file.display())
    })
}

/// Read and parse a report file with the configured parser options
pub fn load_report(input_file: &Path, config: &Config) -> Result<ParsedReport, String> {
    let text = read_input(input_file)?;
    let report = DarsParser::with_options(config.parser_options())
        .parse(&text)
        .map_err(|e| {
            error!("Parse failed for {}: {e}", input_file.display());
            format!("✗ Failed to parse {}: {e}", input_file.display())
        })?;
    info!("Parsed report: {}", input_file.display());
    Ok(report)
}

/// `<dir>/<input stem><suffix>`, creating `dir` when missing
pub fn default_output_path(dir: &str, input_file: &Path, suffix: &str) -> Result<PathBuf, String> {
    let dir = PathBuf::from(dir);
    fs::create_dir_all(&dir)
        .map_err(|e| format!("✗ Failed to create directory {}: {e}", dir.display()))?;

    let stem = input_file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("dars");
    Ok(dir.join(format!("{stem}{suffix}")))
}

/// Serialize `value` as JSON, pretty unless `compact`
pub fn to_json<T: serde::Serialize>(value: &T, compact: bool) -> Result<String, String> {
    let json = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    json.map_err(|e| format!("✗ Failed to serialize JSON: {e}"))
}
