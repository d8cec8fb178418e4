//! Parse command handler

use super::{default_output_path, load_report, to_json};
use dars_audit::config::Config;
use dars_audit::core::summary::AuditDocument;
use dars_audit::{error, info, verbose};
use std::fs;
use std::path::Path;

/// Output options for `dars parse`
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOutput<'a> {
    /// Explicit output file
    pub output: Option<&'a Path>,
    /// Write into the configured output directory
    pub save: bool,
    /// Compact JSON
    pub compact: bool,
}

/// Run the parse command.
///
/// Prints the JSON document to stdout unless an output file (or `--save`) is given.
pub fn run(input_file: &Path, out: ParseOutput<'_>, config: &Config) -> Result<(), String> {
    let report = load_report(input_file, config)?;
    let warnings = report.parsing_metadata.warnings.len();
    let document = AuditDocument::new(report, config.parser.include_summary);
    let json = to_json(&document, out.compact)?;

    let target = match (out.output, out.save) {
        (Some(path), _) => Some(path.to_path_buf()),
        (None, true) => Some(default_output_path(
            &config.paths.output_dir,
            input_file,
            ".json",
        )?),
        (None, false) => None,
    };

    match target {
        Some(path) => {
            fs::write(&path, json).map_err(|e| {
                error!("Failed to write {}: {e}", path.display());
                format!("✗ Failed to write {}: {e}", path.display())
            })?;
            println!("✓ Parsed audit written to: {}", path.display());
            info!("Parsed audit exported to: {}", path.display());
        }
        None => println!("{json}"),
    }

    verbose!("✓ {warnings} warning(s) attached to {}", input_file.display());
    Ok(())
}
