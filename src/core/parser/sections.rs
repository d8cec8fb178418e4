//! Report-level metadata extraction
//!
//! Student identity, preparation time, declared programs, GPA, degree credit totals,
//! high school units, advanced standing and the completion banners. Every extractor
//! is best effort: a missing field yields its empty default.

use super::patterns;
use crate::core::models::{
    AdvancedStandingEntry, CompletionStatus, DegreeCredits, DegreeProgram, GpaInfo,
    PreparationInfo, ProgramDeclaration, ProgramKind, StudentInfo, UNKNOWN_STUDENT,
};
use crate::debug;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;

const UNSATISFIED_BANNER: &str = "AT LEAST ONE REQUIREMENT HAS NOT BEEN SATISFIED";
const COMPLETE_BANNER: &str = "ALL REQUIREMENTS COMPLETE";
const NEARING_BANNER: &str = "nearing the minimum credits to graduate";

static STUDENT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    patterns::compile(r"([^,\n]*),\s*([A-Za-z][A-Za-z\s\-]*)\s+Catalog Year:")
});
static STUDENT_ID: LazyLock<Regex> = LazyLock::new(|| patterns::compile(r"Prepared:.*?(\d{10})"));
static CATALOG_YEAR: LazyLock<Regex> = LazyLock::new(|| patterns::compile(r"Catalog Year:\s*(\d{4,5})"));
static PROGRAM_CODE: LazyLock<Regex> =
    LazyLock::new(|| patterns::compile(r"Program Code:\s*([A-Z]+\s*\d+)"));
static ALTERNATE_CATALOG_YEAR: LazyLock<Regex> =
    LazyLock::new(|| patterns::compile(r"Alternate Catalog Year:\s*(\d{4,5})"));
static ADMIT_TYPE: LazyLock<Regex> = LazyLock::new(|| patterns::compile(r"Admit Type:\s*([A-Z]+)"));

static PREPARED: LazyLock<Regex> = LazyLock::new(|| {
    patterns::compile(r"Prepared:\s*(\d{2}/\d{2}/\d{2})\s*-\s*(\d{2}:\d{2})\s*(\d+)")
});

static COLLEGE: LazyLock<Regex> = LazyLock::new(|| patterns::compile(r"College of ([^-]+) - (.+)"));
static MAJOR: LazyLock<Regex> =
    LazyLock::new(|| patterns::compile(r"MAJOR:\s*(\d{2}/\d{2}/\d{2})\s*(\d+)\s*(.+)"));
static CERTIFICATE: LazyLock<Regex> =
    LazyLock::new(|| patterns::compile(r"CERTIF:\s*(\d{2}/\d{2}/\d{2})\s*(\d+)\s*(.+)"));

static UNIVERSITY_GPA: LazyLock<Regex> = LazyLock::new(|| {
    patterns::compile(
        r"(?:\d\.\d{3}\s+)?University GPA\s+(\d+\.\d+)\s+GPA CRED\.\s+EARNED\s+(\d+\.\d+)\s+POINTS\s+(\d+\.\d+)\s+GPA",
    )
});
static UNIVERSITY_GPA_LOOSE: LazyLock<Regex> = LazyLock::new(|| {
    patterns::compile(
        r"(?s)University GPA.*?(\d+\.\d+)\s+GPA CRED.*?(\d+\.\d+)\s+POINTS\s+(\d+\.\d+)\s+GPA",
    )
});

static TOTAL_CREDITS_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    patterns::compile(
        r"(?:NO|OK) Total Credits for the Degree\s+EARNED:\s*(\d+\.\d+)\s+CREDITS\s+IN-PROGRESS\s+(\d+\.\d+)\s+CREDITS(?:\s+-->\s+NEEDS:\s*(\d+\.\d+)\s+CREDITS)?",
    )
});
static RESIDENT_CREDITS: LazyLock<Regex> = LazyLock::new(|| {
    patterns::compile(r"Resident degree credits\s+(\d+\.\d+)\s+CREDITS ADDED")
});
static ADVANCED_STANDING_TOTAL: LazyLock<Regex> = LazyLock::new(|| {
    patterns::compile(r"(?s)ADVANCED STANDING CREDITS.*?\*\*TOTALS\*\*\s+(\d+)\s+(\d+)")
});
static ADVANCED_STANDING_SECTION: LazyLock<Regex> =
    LazyLock::new(|| patterns::compile(r"(?s)ADVANCED STANDING CREDITS(.*?)\*\*TOTALS\*\*"));

static HS_UNITS_SECTION: LazyLock<Regex> =
    LazyLock::new(|| patterns::compile(r"(?s)HS UNITS:(.*?)(?:ADVANCED STANDING|\z)"));
static HS_UNIT: LazyLock<Regex> =
    LazyLock::new(|| patterns::compile(r"([A-Z]+):\s*([A-Z\s]+)\s+([\d\.]+)"));

/// Text of capture group `idx`, or an empty string
fn group<'t>(caps: &Captures<'t>, idx: usize) -> &'t str {
    caps.get(idx).map_or("", |m| m.as_str())
}

/// First capture of `pattern` in `text`, or an empty string
fn first_capture(pattern: &Regex, text: &str) -> String {
    pattern
        .captures(text)
        .map(|caps| group(&caps, 1).trim().to_string())
        .unwrap_or_default()
}

fn parse_number(raw: &str) -> f64 {
    raw.parse().unwrap_or(0.0)
}

/// Extract the student's identity and catalog fields
///
/// The name comes from `<Last>,<First> Catalog Year:`. A last name made only of
/// punctuation (some records print a lone `.`) yields the first name alone.
#[must_use]
pub fn extract_student_info(text: &str) -> StudentInfo {
    let name = STUDENT_NAME.captures(text).map_or_else(
        || UNKNOWN_STUDENT.to_string(),
        |caps| {
            let last = group(&caps, 1).trim();
            let first = group(&caps, 2).trim();
            if last.chars().all(|c| !c.is_alphanumeric() && c != '_') {
                first.to_string()
            } else {
                format!("{first} {last}")
            }
        },
    );

    StudentInfo {
        name,
        student_id: first_capture(&STUDENT_ID, text),
        catalog_year: first_capture(&CATALOG_YEAR, text),
        program_code: first_capture(&PROGRAM_CODE, text),
        alternate_catalog_year: first_capture(&ALTERNATE_CATALOG_YEAR, text),
        admit_type: first_capture(&ADMIT_TYPE, text),
    }
}

/// Extract `Prepared: MM/DD/YY - HH:MM <id>`, if printed
#[must_use]
pub fn extract_preparation_info(text: &str) -> Option<PreparationInfo> {
    let caps = PREPARED.captures(text)?;
    Some(PreparationInfo::from_short_date(group(&caps, 1), group(&caps, 2)))
}

/// Extract the college, degree type and every major / certificate declaration
#[must_use]
pub fn extract_degree_program(text: &str) -> DegreeProgram {
    let mut program = DegreeProgram::default();

    if let Some(caps) = COLLEGE.captures(text) {
        program.college = group(&caps, 1).trim().to_string();
        program.degree_type = group(&caps, 2).trim().to_string();
    }
    program.majors = declarations(&MAJOR, text, ProgramKind::Major);
    program.certificates = declarations(&CERTIFICATE, text, ProgramKind::Certificate);
    program.resolve_primary();
    program
}

fn declarations(pattern: &Regex, text: &str, kind: ProgramKind) -> Vec<ProgramDeclaration> {
    pattern
        .captures_iter(text)
        .map(|caps| ProgramDeclaration {
            date_declared: group(&caps, 1).to_string(),
            code: group(&caps, 2).to_string(),
            name: group(&caps, 3).trim().to_string(),
            kind,
        })
        .collect()
}

/// Extract the University GPA block
///
/// Tries the labeled single-line form first, then a looser multi-line form. When
/// neither matches every field is zero.
#[must_use]
pub fn extract_gpa_info(text: &str) -> GpaInfo {
    let caps = UNIVERSITY_GPA.captures(text).or_else(|| {
        debug!("University GPA line not found, trying loose GPA pattern");
        UNIVERSITY_GPA_LOOSE.captures(text)
    });

    caps.map_or_else(GpaInfo::empty, |caps| {
        let gpa_credits = parse_number(group(&caps, 1));
        GpaInfo::new(
            gpa_credits,
            gpa_credits,
            parse_number(group(&caps, 2)),
            parse_number(group(&caps, 3)),
        )
    })
}

/// Extract degree-level credit totals
///
/// Prefers the combined "Total Credits for the Degree" block; falls back to the
/// credit tokens of the whole report. Resident and advanced standing totals are read
/// independently.
#[must_use]
pub fn extract_degree_credits(text: &str) -> DegreeCredits {
    let mut credits = DegreeCredits::default();

    if let Some(caps) = TOTAL_CREDITS_BLOCK.captures(text) {
        credits.total_earned = parse_number(group(&caps, 1));
        credits.total_in_progress = parse_number(group(&caps, 2));
        credits.credits_needed = parse_number(group(&caps, 3));
    } else {
        debug!("Total Credits for the Degree block not found, using report-wide credit tokens");
        let tokens = patterns::credit_tokens(text);
        credits.total_earned = tokens.earned.map_or(0.0, parse_number);
        credits.total_in_progress = tokens.in_progress.map_or(0.0, parse_number);
        credits.credits_needed = tokens.needs_credits.map_or(0.0, parse_number);
    }

    if let Some(caps) = RESIDENT_CREDITS.captures(text) {
        credits.resident_credits = parse_number(group(&caps, 1));
    }
    if let Some(caps) = ADVANCED_STANDING_TOTAL.captures(text) {
        credits.advanced_standing = parse_number(group(&caps, 1));
    }
    credits
}

/// Extract high school units keyed by `SUBJECT_UNIT_TYPE`
#[must_use]
pub fn extract_high_school_units(text: &str) -> BTreeMap<String, f64> {
    let Some(section) = HS_UNITS_SECTION.captures(text) else {
        return BTreeMap::new();
    };

    HS_UNIT
        .captures_iter(group(&section, 1))
        .filter_map(|caps| {
            let units = group(&caps, 3).parse::<f64>().ok()?;
            let key = format!("{}_{}", group(&caps, 1), group(&caps, 2).trim()).replace(' ', "_");
            Some((key, units))
        })
        .collect()
}

/// Extract the rows of the advanced standing table
///
/// Rows need at least four columns; a non-numeric last column counts as zero credits.
#[must_use]
pub fn extract_advanced_standing(text: &str) -> Vec<AdvancedStandingEntry> {
    let Some(section) = ADVANCED_STANDING_SECTION.captures(text) else {
        return Vec::new();
    };

    group(&section, 1)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("DATE") && !line.starts_with("**"))
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 4 {
                return None;
            }
            let last = parts[parts.len() - 1];
            let is_numeric = last.chars().all(|c| c.is_ascii_digit() || c == '.')
                && last.chars().any(|c| c.is_ascii_digit());
            Some(AdvancedStandingEntry {
                date: parts[0].to_string(),
                kind: parts[1].to_string(),
                degree: parts[2].to_string(),
                credits: if is_numeric { parse_number(last) } else { 0.0 },
            })
        })
        .collect()
}

/// Read the overall completion banners
#[must_use]
pub fn determine_completion_status(text: &str) -> CompletionStatus {
    let mut status = CompletionStatus::default();

    if text.contains(UNSATISFIED_BANNER) {
        status.has_unsatisfied_requirements = true;
        status.completion_message = "At least one requirement has not been satisfied".to_string();
    } else if text.contains(COMPLETE_BANNER) {
        status.is_complete = true;
        status.requirements_satisfied = true;
        status.graduation_eligible = true;
        status.completion_message = "All requirements complete".to_string();
    }

    if text.contains(NEARING_BANNER) {
        status.nearing_graduation = true;
        status.completion_message = "Nearing minimum credits to graduate".to_string();
    }
    status
}
