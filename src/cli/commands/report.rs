//! Report command handler
//!
//! Renders a parsed audit as Markdown or HTML.

use super::{default_output_path, load_report};
use dars_audit::config::Config;
use dars_audit::core::report::{
    HtmlReporter, MarkdownReporter, ReportContext, ReportFormat, ReportGenerator,
};
use dars_audit::{error, info};
use std::path::{Path, PathBuf};

/// Run the report command.
///
/// # Arguments
/// * `input_file` - Path to the extracted report text
/// * `output_file` - Optional output path
/// * `format` - Report format
/// * `config` - Configuration containing the default reports directory
pub fn run(
    input_file: &Path,
    output_file: Option<&Path>,
    format: ReportFormat,
    config: &Config,
) -> Result<(), String> {
    let report = load_report(input_file, config)?;
    let ctx = ReportContext::new(&report);

    let final_output_path: PathBuf = match output_file {
        Some(output) => output.to_path_buf(),
        None => default_output_path(
            &config.paths.reports_dir,
            input_file,
            &format!("_audit.{}", format.extension()),
        )?,
    };

    let generator: Box<dyn ReportGenerator> = match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
    };
    generator.generate(&ctx, &final_output_path).map_err(|e| {
        error!(
            "Report generation failed for {}: {e}",
            input_file.display()
        );
        format!("✗ Failed to write {format} report: {e}")
    })?;

    println!("✓ Report generated: {}", final_output_path.display());
    info!("Report exported to: {}", final_output_path.display());
    Ok(())
}
