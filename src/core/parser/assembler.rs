//! Report assembly
//!
//! Validates the input, runs every extractor over the text and collects the
//! cross-field validation warnings.

use super::error::FormatError;
use super::{analyzer, breadth, courses, patterns, sections, segmenter};
use crate::core::models::{ParsedReport, ParsingMetadata, Requirement};
use crate::{debug, info};
use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// Default sanity threshold for earned plus in-progress credits
pub const DEFAULT_CREDIT_WARNING_THRESHOLD: f64 = 200.0;

static PREPARED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| patterns::compile(r"(?i)Prepared:\s*\d{2}/\d{2}/\d{2}"));
static DARS_MARKER: LazyLock<Regex> =
    LazyLock::new(|| patterns::compile(r"(?i)DEGREE AUDIT REPORTING SYSTEM|DARS"));

/// Tunable parser behavior
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParserOptions {
    /// Total credits above which a warning is attached to the report
    pub credit_warning_threshold: f64,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            credit_warning_threshold: DEFAULT_CREDIT_WARNING_THRESHOLD,
        }
    }
}

/// Degree audit report parser
///
/// Holds no state between calls; one parser can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct DarsParser {
    options: ParserOptions,
}

impl DarsParser {
    /// Create a parser with default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with the given options
    #[must_use]
    pub const fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Options in effect
    #[must_use]
    pub const fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Check that the text looks like a degree audit report
    ///
    /// # Errors
    /// Returns [`FormatError::Empty`] for blank input, or
    /// [`FormatError::MissingPattern`] when either the `Prepared: MM/DD/YY` stamp or
    /// the DARS marker is absent. Both are required.
    pub fn validate_format(&self, text: &str) -> Result<(), FormatError> {
        if text.trim().is_empty() {
            return Err(FormatError::Empty);
        }
        if !PREPARED_MARKER.is_match(text) {
            return Err(FormatError::MissingPattern("Prepared: MM/DD/YY".to_string()));
        }
        if !DARS_MARKER.is_match(text) {
            return Err(FormatError::MissingPattern(
                "DEGREE AUDIT REPORTING SYSTEM or DARS".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse report text, stamping the result with the current time
    ///
    /// # Errors
    /// Returns a [`FormatError`] when the format check fails or the assembled report
    /// holds values that cannot be represented.
    pub fn parse(&self, text: &str) -> Result<ParsedReport, FormatError> {
        self.parse_at(text, Utc::now())
    }

    /// Parse report text, stamping the result with `parsed_at`
    ///
    /// Two calls with the same text and timestamp produce equal reports.
    ///
    /// # Errors
    /// See [`DarsParser::parse`].
    pub fn parse_at(
        &self,
        text: &str,
        parsed_at: DateTime<Utc>,
    ) -> Result<ParsedReport, FormatError> {
        self.validate_format(text)?;

        let mut report = ParsedReport {
            student_info: sections::extract_student_info(text),
            preparation_info: sections::extract_preparation_info(text),
            degree_program: sections::extract_degree_program(text),
            gpa_info: sections::extract_gpa_info(text),
            degree_credits: sections::extract_degree_credits(text),
            courses: courses::deduplicate(courses::extract_courses(text)),
            in_progress_courses: courses::extract_in_progress_section(text),
            breadth_requirements: breadth::extract_breadth_requirements(text),
            requirements: extract_requirements(text),
            high_school_units: sections::extract_high_school_units(text),
            advanced_standing: sections::extract_advanced_standing(text),
            completion_status: sections::determine_completion_status(text),
            parsing_metadata: ParsingMetadata {
                parsed_at: parsed_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                parser_version: env!("CARGO_PKG_VERSION").to_string(),
                warnings: Vec::new(),
            },
        };

        ensure_representable(&report)?;
        report.parsing_metadata.warnings = self.collect_warnings(&report);

        info!(
            "Parsed report: {} courses, {} in progress, {} requirements, {} warnings",
            report.courses.len(),
            report.in_progress_courses.len(),
            report.requirements.len(),
            report.parsing_metadata.warnings.len()
        );
        Ok(report)
    }

    /// Cross-field validation; never blocks the parse
    fn collect_warnings(&self, report: &ParsedReport) -> Vec<String> {
        let mut warnings = Vec::new();

        if report.student_info.is_name_unknown() {
            warnings.push("Student name could not be determined".to_string());
        }
        if report.student_info.student_id.is_empty() {
            warnings.push("Student ID could not be determined".to_string());
        }
        if report.degree_program.is_empty() {
            warnings.push("No degree programs found".to_string());
        }
        if let Some(reported) = report.gpa_info.reported_gpa {
            warnings.push(format!(
                "GPA calculation mismatch: reported {reported}, calculated {:.3}",
                report.gpa_info.gpa
            ));
        }

        let total = report.degree_credits.total_credits();
        if total > self.options.credit_warning_threshold {
            warnings.push(format!("Unusually high total credits: {total}"));
        }
        warnings
    }
}

/// Segment the report and analyze each block, dropping blocks that fail analysis
fn extract_requirements(text: &str) -> Vec<Requirement> {
    segmenter::segment(text)
        .into_iter()
        .filter_map(|block| {
            match analyzer::analyze(
                &block.name,
                &block.content,
                block.is_complete(),
                block.is_in_progress(),
            ) {
                Ok(requirement) => Some(requirement),
                Err(e) => {
                    debug!("Dropping requirement {:?}: {e}", block.name);
                    None
                }
            }
        })
        .collect()
}

/// Reject reports whose numeric totals cannot be serialized
fn ensure_representable(report: &ParsedReport) -> Result<(), FormatError> {
    let credits = &report.degree_credits;
    let gpa = &report.gpa_info;
    let values = [
        credits.total_earned,
        credits.total_in_progress,
        credits.credits_needed,
        credits.advanced_standing,
        credits.resident_credits,
        gpa.gpa_credits,
        gpa.total_points,
        gpa.gpa,
    ];
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(FormatError::Malformed(
            "credit or GPA totals are out of range".to_string(),
        ))
    }
}

/// Parse report text with default options
///
/// # Errors
/// See [`DarsParser::parse`].
pub fn parse_dars_text(text: &str) -> Result<ParsedReport, FormatError> {
    DarsParser::new().parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const MINIMAL: &str = "\
DEGREE AUDIT REPORTING SYSTEM
Prepared: 08/01/25 - 14:23 9081234567
OK Communications A
   FA22 COMP SCI300 3.00 A Programming I
";

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 1, 14, 23, 0).unwrap()
    }

    #[test]
    fn test_validate_format_requires_both_markers() {
        let parser = DarsParser::new();
        assert_eq!(parser.validate_format("   \n "), Err(FormatError::Empty));
        assert!(matches!(
            parser.validate_format("DARS report without a stamp"),
            Err(FormatError::MissingPattern(_))
        ));
        assert!(matches!(
            parser.validate_format("Prepared: 08/01/25 but no marker"),
            Err(FormatError::MissingPattern(_))
        ));
        assert!(parser.validate_format(MINIMAL).is_ok());
    }

    #[test]
    fn test_parse_minimal_report() {
        let report = DarsParser::new().parse_at(MINIMAL, fixed_time()).unwrap();
        assert_eq!(report.courses.len(), 1);
        assert_eq!(report.requirements.len(), 1);
        assert_eq!(report.parsing_metadata.parsed_at, "2025-08-01T14:23:00Z");
        assert_eq!(report.parsing_metadata.parser_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let parser = DarsParser::new();
        let first = parser.parse_at(MINIMAL, fixed_time()).unwrap();
        let second = parser.parse_at(MINIMAL, fixed_time()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_high_credit_warning_uses_threshold() {
        let text = format!("{MINIMAL}NO Total Credits for the Degree\n EARNED: 150.00 CREDITS\n IN-PROGRESS 10.00 CREDITS\n");
        let strict = DarsParser::with_options(ParserOptions {
            credit_warning_threshold: 100.0,
        });
        let report = strict.parse_at(&text, fixed_time()).unwrap();
        assert!(report
            .warnings()
            .contains(&"Unusually high total credits: 160".to_string()));

        let report = DarsParser::new().parse_at(&text, fixed_time()).unwrap();
        assert!(!report.warnings().iter().any(|w| w.starts_with("Unusually")));
    }

    #[test]
    fn test_identity_warnings_for_anonymous_report() {
        let text = "DARS\nPrepared: 08/01/25 - 14:23\nNO Foreign Language\n  NEEDS: 3.00 CREDITS\n";
        let report = DarsParser::new().parse_at(text, fixed_time()).unwrap();
        assert_eq!(
            report.warnings(),
            [
                "Student name could not be determined".to_string(),
                "Student ID could not be determined".to_string(),
                "No degree programs found".to_string(),
            ]
        );
    }

    #[test]
    fn test_identity_warnings_absent_for_full_header() {
        let text = include_str!("../../../tests/fixtures/sample_dars.txt");
        let report = DarsParser::new().parse_at(text, fixed_time()).unwrap();
        for warning in [
            "Student name could not be determined",
            "Student ID could not be determined",
            "No degree programs found",
        ] {
            assert!(
                !report.warnings().iter().any(|w| w == warning),
                "unexpected warning: {warning}"
            );
        }
    }

    #[test]
    fn test_unreadable_requirement_is_dropped() {
        let text = "\
DEGREE AUDIT REPORTING SYSTEM
Prepared: 08/01/25 - 14:23 9081234567
NO Foreign Language
  NEEDS: 99999999999999 COURSES
OK Communications A
  EARNED: 3.00 CREDITS
";
        let report = DarsParser::new().parse_at(text, fixed_time()).unwrap();
        let names: Vec<&str> = report.requirements.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Communications A"]);
        assert!((report.requirements[0].credits_earned - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gpa_mismatch_warning() {
        let text = format!(
            "{MINIMAL}2.000 University GPA 30.00 GPA CRED. EARNED 96.00 POINTS 2.000 GPA\n"
        );
        let report = DarsParser::new().parse_at(&text, fixed_time()).unwrap();
        assert!((report.gpa_info.gpa - 3.2).abs() < f64::EPSILON);
        assert!(report
            .warnings()
            .contains(&"GPA calculation mismatch: reported 2, calculated 3.200".to_string()));
    }
}
