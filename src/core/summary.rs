//! Audit summaries and the document handed to consumers

use crate::core::models::{ParsedReport, Requirement, RequirementStatus};
use serde::{Deserialize, Serialize};

/// Primary program label when nothing was declared
const UNKNOWN_PROGRAM: &str = "Unknown";

/// Who the audit is for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentOverview {
    /// Student name
    pub name: String,
    /// Student identifier
    pub id: String,
    /// First major, else first certificate, else "Unknown"
    pub primary_program: String,
    /// College name
    pub college: String,
    /// Degree type
    pub degree_type: String,
}

/// Headline progress numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicProgress {
    /// Degree credits earned
    pub total_credits_earned: f64,
    /// Degree credits in progress
    pub total_credits_in_progress: f64,
    /// Degree credits still needed
    pub credits_needed_to_graduate: f64,
    /// Current (possibly corrected) GPA
    pub current_gpa: f64,
    /// Completion message from the report banners
    pub graduation_status: String,
}

/// Counts over the top-level requirement list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementsStatus {
    /// Number of top-level requirements
    pub total_requirements: usize,
    /// Requirements marked complete
    pub completed_requirements: usize,
    /// Requirements marked in progress
    pub in_progress_requirements: usize,
    /// Requirements marked incomplete
    pub remaining_requirements: usize,
}

/// An incomplete requirement the student can still act on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncompleteRequirement {
    /// Requirement name
    pub name: String,
    /// Credits still missing
    pub credits_remaining: f64,
    /// Requirement notes
    pub notes: String,
    /// Courses that would satisfy it
    pub select_from: Vec<String>,
}

/// Compact digest of a parsed audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    /// Student and program
    pub student_overview: StudentOverview,
    /// Credit and GPA numbers
    pub academic_progress: AcademicProgress,
    /// Requirement counts
    pub requirements_status: RequirementsStatus,
    /// Actionable incomplete requirements
    pub incomplete_requirements: Vec<IncompleteRequirement>,
    /// Parse warnings, unchanged
    pub warnings: Vec<String>,
}

/// Summarize a parsed report
///
/// Only top-level requirements are counted. The incomplete digest keeps requirements
/// that are incomplete and either still need credits or list course options.
#[must_use]
pub fn summarize(report: &ParsedReport) -> AuditSummary {
    let program = &report.degree_program;
    let student_overview = StudentOverview {
        name: report.student_info.name.clone(),
        id: report.student_info.student_id.clone(),
        primary_program: program
            .primary_program
            .as_ref()
            .map_or_else(|| UNKNOWN_PROGRAM.to_string(), |p| p.name.clone()),
        college: program.college.clone(),
        degree_type: program.degree_type.clone(),
    };

    let academic_progress = AcademicProgress {
        total_credits_earned: report.degree_credits.total_earned,
        total_credits_in_progress: report.degree_credits.total_in_progress,
        credits_needed_to_graduate: report.degree_credits.credits_needed,
        current_gpa: report.gpa_info.gpa,
        graduation_status: report.completion_status.completion_message.clone(),
    };

    let count = |status: RequirementStatus| {
        report
            .requirements
            .iter()
            .filter(|r| r.status == status)
            .count()
    };
    let requirements_status = RequirementsStatus {
        total_requirements: report.requirements.len(),
        completed_requirements: count(RequirementStatus::Complete),
        in_progress_requirements: count(RequirementStatus::InProgress),
        remaining_requirements: count(RequirementStatus::Incomplete),
    };

    let incomplete_requirements = report
        .requirements
        .iter()
        .filter(|r| is_actionable(r))
        .map(|r| IncompleteRequirement {
            name: r.name.clone(),
            credits_remaining: r.credits_remaining(),
            notes: r.notes.clone(),
            select_from: r.select_from.clone(),
        })
        .collect();

    AuditSummary {
        student_overview,
        academic_progress,
        requirements_status,
        incomplete_requirements,
        warnings: report.parsing_metadata.warnings.clone(),
    }
}

fn is_actionable(requirement: &Requirement) -> bool {
    requirement.status == RequirementStatus::Incomplete
        && (requirement.credits_remaining() > 0.0 || !requirement.select_from.is_empty())
}

/// Certificate eligibility as the upstream system defines it
///
/// Returns `false` as soon as any declared certificate's name contains the word
/// "Certificate". This polarity looks inverted but is kept as-is until a domain owner
/// confirms the intended rule.
#[must_use]
pub fn certificate_eligible(report: &ParsedReport) -> bool {
    !report
        .degree_program
        .certificates
        .iter()
        .any(|cert| cert.name.contains("Certificate"))
}

/// A parsed report with the derived fields consumers expect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditDocument {
    /// The parsed report, flattened into the top level
    #[serde(flatten)]
    pub report: ParsedReport,
    /// Summary digest, when requested
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub summary: Option<AuditSummary>,
    /// See [`certificate_eligible`]
    pub certificate_eligible: bool,
}

impl AuditDocument {
    /// Wrap a report, attaching the summary when `include_summary` is set
    #[must_use]
    pub fn new(report: ParsedReport, include_summary: bool) -> Self {
        let summary = include_summary.then(|| summarize(&report));
        let certificate_eligible = certificate_eligible(&report);
        Self {
            report,
            summary,
            certificate_eligible,
        }
    }
}
