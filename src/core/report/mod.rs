//! Report generation for parsed audits
//!
//! Renders a parsed audit as a Markdown or HTML document. Both formats share one
//! [`AuditView`]: every number is formatted once here, so the templates only lay
//! out strings.

pub mod formats;

use crate::core::models::{ParsedReport, Requirement};
use crate::core::summary::{self, AuditSummary};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Data context for report generation
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Parsed audit being reported
    pub report: &'a ParsedReport,
    /// Summary derived from the report
    pub summary: AuditSummary,
    /// Certificate eligibility flag
    pub certificate_eligible: bool,
}

impl<'a> ReportContext<'a> {
    /// Create a report context, deriving the summary from `report`
    #[must_use]
    pub fn new(report: &'a ParsedReport) -> Self {
        Self {
            report,
            summary: summary::summarize(report),
            certificate_eligible: summary::certificate_eligible(report),
        }
    }

    /// Preparation timestamp, or "-" when the report did not print one
    #[must_use]
    pub fn prepared(&self) -> String {
        self.report
            .preparation_info
            .as_ref()
            .map_or_else(|| "-".to_string(), |p| p.full_timestamp.clone())
    }

    /// Build the flattened, pre-formatted view the templates render
    #[must_use]
    pub fn view(&self) -> AuditView {
        let overview = &self.summary.student_overview;
        let progress = &self.summary.academic_progress;
        let counts = &self.summary.requirements_status;

        let mut requirements = Vec::new();
        for requirement in &self.report.requirements {
            requirements.push(RequirementRow::from_requirement(requirement, false));
            requirements.extend(
                requirement
                    .sub_requirements
                    .iter()
                    .map(|sub| RequirementRow::from_requirement(sub, true)),
            );
        }

        AuditView {
            student_name: overview.name.clone(),
            student_id: overview.id.clone(),
            primary_program: overview.primary_program.clone(),
            college: overview.college.clone(),
            degree_type: overview.degree_type.clone(),
            prepared: self.prepared(),
            credits_earned: format!("{:.1}", progress.total_credits_earned),
            credits_in_progress: format!("{:.1}", progress.total_credits_in_progress),
            credits_needed: format!("{:.1}", progress.credits_needed_to_graduate),
            gpa: format!("{:.3}", progress.current_gpa),
            graduation_status: if progress.graduation_status.is_empty() {
                "-".to_string()
            } else {
                progress.graduation_status.clone()
            },
            completed_count: counts.completed_requirements,
            in_progress_count: counts.in_progress_requirements,
            remaining_count: counts.remaining_requirements,
            total_count: counts.total_requirements,
            certificate_eligible: if self.certificate_eligible { "yes" } else { "no" }.to_string(),
            requirements,
            incomplete: self
                .summary
                .incomplete_requirements
                .iter()
                .map(|r| IncompleteRow {
                    name: r.name.clone(),
                    remaining: format!("{:.1}", r.credits_remaining),
                    options: r.select_from.join(", "),
                    notes: r.notes.clone(),
                })
                .collect(),
            warnings: self.summary.warnings.clone(),
        }
    }
}

/// One requirement table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementRow {
    /// Requirement name
    pub name: String,
    /// Status label
    pub status: String,
    /// Earned credits
    pub earned: String,
    /// In-progress credits
    pub in_progress: String,
    /// Needed credits
    pub needed: String,
    /// Remaining credits
    pub remaining: String,
    /// Completion percentage
    pub percent: String,
    /// Selectable courses, comma separated
    pub options: String,
    /// Row is a sub-requirement of the row above it
    pub is_sub: bool,
}

impl RequirementRow {
    fn from_requirement(requirement: &Requirement, is_sub: bool) -> Self {
        Self {
            name: requirement.name.clone(),
            status: requirement.status.to_string().replace('_', " "),
            earned: format!("{:.1}", requirement.credits_earned),
            in_progress: format!("{:.1}", requirement.credits_in_progress),
            needed: format!("{:.1}", requirement.credits_needed),
            remaining: format!("{:.1}", requirement.credits_remaining()),
            percent: format!("{:.0}%", requirement.completion_percentage()),
            options: requirement.select_from.join(", "),
            is_sub,
        }
    }
}

/// One actionable incomplete requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompleteRow {
    /// Requirement name
    pub name: String,
    /// Remaining credits
    pub remaining: String,
    /// Selectable courses, comma separated
    pub options: String,
    /// Notes
    pub notes: String,
}

/// Everything a report template renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditView {
    /// Student name
    pub student_name: String,
    /// Student identifier
    pub student_id: String,
    /// Primary program
    pub primary_program: String,
    /// College
    pub college: String,
    /// Degree type
    pub degree_type: String,
    /// Preparation timestamp
    pub prepared: String,
    /// Degree credits earned
    pub credits_earned: String,
    /// Degree credits in progress
    pub credits_in_progress: String,
    /// Degree credits needed
    pub credits_needed: String,
    /// GPA
    pub gpa: String,
    /// Completion message
    pub graduation_status: String,
    /// Completed requirement count
    pub completed_count: usize,
    /// In-progress requirement count
    pub in_progress_count: usize,
    /// Incomplete requirement count
    pub remaining_count: usize,
    /// Total requirement count
    pub total_count: usize,
    /// "yes" or "no"
    pub certificate_eligible: String,
    /// Requirement rows, sub-requirements following their parent
    pub requirements: Vec<RequirementRow>,
    /// Actionable incomplete requirements
    pub incomplete: Vec<IncompleteRow>,
    /// Parse warnings
    pub warnings: Vec<String>,
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if template rendering fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}


#[cfg(test)]
mod tests {
    use super::test_support::sample_report;
    use super::*;

    #[test]
    fn test_view_flattens_sub_requirements() {
        let report = sample_report();
        let view = ReportContext::new(&report).view();
        let names: Vec<(&str, bool)> = view
            .requirements
            .iter()
            .map(|r| (r.name.as_str(), r.is_sub))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Computer Sciences Major", false),
                ("Basic Computer Science", true),
                ("Electives", true),
                ("Communications A <B>", false),
            ]
        );
        assert_eq!(view.requirements[0].percent, "50%");
        assert_eq!(view.requirements[0].status, "incomplete");
        assert_eq!(view.requirements[2].options, "COMP SCI 400, STAT 240");
        assert_eq!(view.prepared, "08/01/2025 14:23");
    }

    #[test]
    fn test_view_incomplete_rows() {
        let report = sample_report();
        let view = ReportContext::new(&report).view();
        assert_eq!(view.incomplete.len(), 1);
        assert_eq!(view.incomplete[0].remaining, "3.0");
        assert_eq!(view.certificate_eligible, "yes");
    }
}
