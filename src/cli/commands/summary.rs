//! Summary command handler

use super::load_report;
use dars_audit::config::Config;
use dars_audit::core::summary::{self, AuditSummary};
use std::fmt::Write;
use std::path::Path;

/// Run the summary command.
pub fn run(input_file: &Path, config: &Config) -> Result<(), String> {
    let report = load_report(input_file, config)?;
    let digest = summary::summarize(&report);
    print!("{}", format_summary(&digest));
    Ok(())
}

/// Human-readable digest, one fact per line
fn format_summary(digest: &AuditSummary) -> String {
    let overview = &digest.student_overview;
    let progress = &digest.academic_progress;
    let counts = &digest.requirements_status;

    let mut out = String::new();
    let _ = writeln!(out, "\n=== {} ({}) ===\n", overview.name, overview.id);
    let _ = writeln!(out, "Program:      {}", overview.primary_program);
    if !overview.college.is_empty() {
        let _ = writeln!(out, "College:      {}", overview.college);
    }
    if !overview.degree_type.is_empty() {
        let _ = writeln!(out, "Degree:       {}", overview.degree_type);
    }
    let _ = writeln!(out, "GPA:          {:.3}", progress.current_gpa);
    let _ = writeln!(
        out,
        "Credits:      {:.1} earned, {:.1} in progress, {:.1} needed",
        progress.total_credits_earned,
        progress.total_credits_in_progress,
        progress.credits_needed_to_graduate
    );
    let _ = writeln!(
        out,
        "Requirements: {}/{} complete, {} in progress, {} remaining",
        counts.completed_requirements,
        counts.total_requirements,
        counts.in_progress_requirements,
        counts.remaining_requirements
    );
    if !progress.graduation_status.is_empty() {
        let _ = writeln!(out, "Status:       {}", progress.graduation_status);
    }

    if !digest.incomplete_requirements.is_empty() {
        let _ = writeln!(out, "\nStill needed:");
        for requirement in &digest.incomplete_requirements {
            let _ = write!(
                out,
                "  ✗ {} ({:.1} credits)",
                requirement.name, requirement.credits_remaining
            );
            if !requirement.select_from.is_empty() {
                let _ = write!(out, " from {}", requirement.select_from.join(", "));
            }
            out.push('\n');
        }
    }

    if !digest.warnings.is_empty() {
        let _ = writeln!(out, "\nWarnings:");
        for warning in &digest.warnings {
            let _ = writeln!(out, "  ! {warning}");
        }
    }
    out
}
