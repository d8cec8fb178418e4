//! Requirement analysis
//!
//! Turns a segmented requirement block into a [`Requirement`]: credit arithmetic,
//! status, owned courses, sub-requirements for majors, and the select-from options
//! and notes of leaf requirements.

use super::courses;
use super::error::AnalysisError;
use super::patterns::{self, CreditTokens};
use super::segmenter::{self, SubRequirementBlock};
use crate::core::models::{Course, Requirement, RequirementStatus};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Separator between individual note fragments
const NOTE_SEPARATOR: &str = " | ";

static SELECT_FROM_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    patterns::compile(r"(?is)SELECT FROM:(.*?)(?:\n\s*\n|NOT FROM:|NEEDS:|\z)")
});
static OPTION_SPLIT: LazyLock<Regex> = LazyLock::new(|| patterns::compile(r"(?i)\s+OR\s+"));
static MULTI_SUBJECT: LazyLock<Regex> =
    LazyLock::new(|| patterns::compile(r"\b([A-Z&](?:\s?[A-Z&])+)\b"));
static SINGLE_SUBJECT: LazyLock<Regex> = LazyLock::new(|| patterns::compile(r"\b([A-Z&]+)\b"));
static COURSE_NUMBER: LazyLock<Regex> = LazyLock::new(|| patterns::compile(r"\b(\d{3,4}[A-Z]?)\b"));

static NOT_FROM: LazyLock<Regex> = LazyLock::new(|| patterns::compile(r"(?i)NOT FROM:?\s*([^\n]+)"));
static BREADTH_DESIGNATION: LazyLock<Regex> =
    LazyLock::new(|| patterns::compile(r"(?i)COURSES W/\s+'([^']+)'\s+Breadth"));
static NOTE_PHRASES: LazyLock<[Regex; 5]> = LazyLock::new(|| {
    [
        patterns::compile(r"(?i)Complete\s+the\s+([^.]+\.)"),
        patterns::compile(r"(?i)Must\s+([^.]+\.)"),
        patterns::compile(r"(?i)Note:\s*([^.]+\.)"),
        patterns::compile(r"(?i)maximum\s+(\d+\s+courses?\s+may\s+apply)"),
        patterns::compile(r"(?i)(\d+\s+credits?\s+and\s+\d+\s+courses?)"),
    ]
});

/// Credit totals read from a block
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct CreditTotals {
    earned: f64,
    in_progress: f64,
    needed: f64,
}

/// Analyze a top-level requirement block
///
/// # Arguments
/// * `name` - Requirement name from the header
/// * `content` - Block text following the header
/// * `is_complete` - Header carried the `OK` token
/// * `is_in_progress` - Header carried the `IP` token
///
/// # Errors
/// Returns an [`AnalysisError`] when a numeric token cannot be read; callers drop
/// the requirement in that case.
pub fn analyze(
    name: &str,
    content: &str,
    is_complete: bool,
    is_in_progress: bool,
) -> Result<Requirement, AnalysisError> {
    let sub_requirements = if name.to_lowercase().contains("major") {
        segmenter::segment_subrequirements(content)
            .iter()
            .map(analyze_subrequirement)
            .collect::<Result<Vec<_>, _>>()?
    } else {
        Vec::new()
    };

    // A parent's own totals sit above its first numbered sub-section
    let own_span = if sub_requirements.is_empty() {
        content
    } else {
        patterns::find_sub_item_markers(content)
            .first()
            .map_or(content, |marker| &content[..marker.start])
    };
    let tokens = patterns::credit_tokens(own_span);
    let totals = read_totals(&tokens, None)?;
    check_finite(name, totals)?;

    let status = if is_complete {
        RequirementStatus::Complete
    } else if is_in_progress || totals.in_progress > 0.0 {
        RequirementStatus::InProgress
    } else {
        RequirementStatus::Incomplete
    };

    let mut requirement = Requirement::new(
        name.trim().to_string(),
        status,
        totals.needed,
        totals.earned,
        totals.in_progress,
    );
    requirement.courses = courses::extract_courses(content);
    requirement.sub_requirements = sub_requirements;

    if !requirement.has_sub_requirements() {
        requirement.notes = notes_with_course_need(content, &tokens)?;
        requirement.select_from = extract_select_from(content);
    }

    Ok(requirement)
}

/// Analyze one numbered sub-section of a major
///
/// Status comes from the marker. Credits come from the sub-section's own tokens when
/// it prints them, otherwise from its courses (graded courses count as earned,
/// `INP` courses as in progress).
///
/// # Errors
/// Returns an [`AnalysisError`] when a numeric token cannot be read.
pub fn analyze_subrequirement(block: &SubRequirementBlock) -> Result<Requirement, AnalysisError> {
    let sub_courses = courses::extract_courses(&block.content);
    let tokens = patterns::credit_tokens(&block.content);
    let totals = read_totals(&tokens, Some(&sub_courses))?;
    check_finite(&block.name, totals)?;

    let mut requirement = Requirement::new(
        block.name.clone(),
        RequirementStatus::from_marker(&block.marker),
        totals.needed,
        totals.earned,
        totals.in_progress,
    );
    requirement.notes = notes_with_course_need(&block.content, &tokens)?;
    requirement.select_from = extract_select_from(&block.content);
    requirement.courses = sub_courses;
    Ok(requirement)
}

/// Course codes listed after `SELECT FROM:`, deduplicated and sorted
///
/// Alternatives are split on `OR`. Inside each alternative every subject owns the
/// course numbers between it and the next subject, so `COMP SCI 300, 400` expands to
/// two codes under `COMP SCI`.
#[must_use]
pub fn extract_select_from(block: &str) -> Vec<String> {
    let Some(caps) = SELECT_FROM_BLOCK.captures(block) else {
        return Vec::new();
    };
    let text = caps
        .get(1)
        .map_or("", |m| m.as_str())
        .lines()
        .collect::<Vec<_>>()
        .join(" ");

    let mut codes = BTreeSet::new();
    for option in OPTION_SPLIT.split(text.trim()) {
        let option = option.trim();
        if option.is_empty() {
            continue;
        }

        let mut subjects = subject_positions(&MULTI_SUBJECT, option);
        if subjects.is_empty() {
            subjects = subject_positions(&SINGLE_SUBJECT, option);
        }

        for (idx, (subject, start)) in subjects.iter().enumerate() {
            let end = subjects.get(idx + 1).map_or(option.len(), |next| next.1);
            for number in COURSE_NUMBER.captures_iter(&option[*start..end]) {
                if let Some(number) = number.get(1) {
                    codes.insert(format!("{subject} {}", number.as_str()));
                }
            }
        }
    }

    codes.into_iter().collect()
}

/// Free-text remarks found in a block, joined with ` | `
///
/// Picks up exclusions (`NOT FROM`), breadth designations, and short imperative
/// phrases such as "Complete the ..." or "maximum 2 courses may apply".
#[must_use]
pub fn extract_notes(block: &str) -> String {
    let mut notes = Vec::new();

    if let Some(excluded) = NOT_FROM.captures(block).and_then(|c| c.get(1)) {
        notes.push(format!("Excluded courses: {}", excluded.as_str().trim()));
    }
    if let Some(designation) = BREADTH_DESIGNATION.captures(block).and_then(|c| c.get(1)) {
        notes.push(format!(
            "Must have '{}' breadth designation",
            designation.as_str()
        ));
    }
    for phrase in NOTE_PHRASES.iter() {
        notes.extend(
            phrase
                .captures_iter(block)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string()),
        );
    }

    notes.join(NOTE_SEPARATOR)
}

/// Notes plus the qualitative "Needs N more course(s)" remark
fn notes_with_course_need(block: &str, tokens: &CreditTokens<'_>) -> Result<String, AnalysisError> {
    let mut notes = extract_notes(block);
    if let Some(raw) = tokens.needs_courses {
        let count: u32 = raw.parse().map_err(|_| AnalysisError::InvalidNumber {
            field: "NEEDS COURSES",
            value: raw.to_string(),
        })?;
        if !notes.is_empty() {
            notes.push_str(NOTE_SEPARATOR);
        }
        notes.push_str(&format!("Needs {count} more course(s)"));
    }
    Ok(notes)
}

/// Subject tokens and their byte offsets, with inner whitespace normalized
fn subject_positions(pattern: &Regex, option: &str) -> Vec<(String, usize)> {
    pattern
        .captures_iter(option)
        .filter_map(|caps| caps.get(1))
        .map(|m| {
            (
                m.as_str().split_whitespace().collect::<Vec<_>>().join(" "),
                m.start(),
            )
        })
        .collect()
}

/// Read earned / in-progress / needed credits
///
/// Missing earned or in-progress tokens fall back to course sums when courses are
/// given, else to zero. Needed is earned plus in-progress plus any `NEEDS` credits.
fn read_totals(
    tokens: &CreditTokens<'_>,
    fallback_courses: Option<&[Course]>,
) -> Result<CreditTotals, AnalysisError> {
    let earned = match (tokens.earned, fallback_courses) {
        (Some(raw), _) => parse_credits("EARNED", raw)?,
        (None, Some(list)) => sum_credits(list, |c| !c.is_in_progress()),
        (None, None) => 0.0,
    };
    let in_progress = match (tokens.in_progress, fallback_courses) {
        (Some(raw), _) => parse_credits("IN-PROGRESS", raw)?,
        (None, Some(list)) => sum_credits(list, Course::is_in_progress),
        (None, None) => 0.0,
    };
    let additional = tokens
        .needs_credits
        .map(|raw| parse_credits("NEEDS", raw))
        .transpose()?
        .unwrap_or(0.0);

    Ok(CreditTotals {
        earned,
        in_progress,
        needed: earned + in_progress + additional,
    })
}

fn sum_credits(list: &[Course], include: impl Fn(&Course) -> bool) -> f64 {
    list.iter().filter(|c| include(c)).map(|c| c.credits).sum()
}

fn parse_credits(field: &'static str, raw: &str) -> Result<f64, AnalysisError> {
    raw.parse::<f64>().map_err(|_| AnalysisError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

fn check_finite(name: &str, totals: CreditTotals) -> Result<(), AnalysisError> {
    if totals.needed.is_finite() && totals.earned.is_finite() && totals.in_progress.is_finite() {
        Ok(())
    } else {
        Err(AnalysisError::CreditOverflow(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_from_groups_numbers_by_subject() {
        let codes = extract_select_from("SELECT FROM: COMP SCI 300, 400, 425 OR STAT 240");
        assert_eq!(
            codes,
            vec!["COMP SCI 300", "COMP SCI 400", "COMP SCI 425", "STAT 240"]
        );
    }

    #[test]
    fn test_select_from_stops_at_boundary() {
        let codes = extract_select_from(
            "SELECT FROM: MATH 221, 222\n   OR STAT 301\nNOT FROM: MATH 211\n",
        );
        assert_eq!(codes, vec!["MATH 221", "MATH 222", "STAT 301"]);
    }

    #[test]
    fn test_select_from_stops_at_blank_line() {
        let codes = extract_select_from("SELECT FROM: ECON 101\n\nCOMP SCI 999");
        assert_eq!(codes, vec!["ECON 101"]);
    }

    #[test]
    fn test_select_from_absent() {
        assert!(extract_select_from("EARNED: 3.00 CREDITS").is_empty());
    }

    #[test]
    fn test_notes_collects_phrases() {
        let notes = extract_notes(
            "NOT FROM: COMP SCI 639\nCOURSES W/ 'N' Breadth\nmaximum 2 courses may apply\n",
        );
        assert_eq!(
            notes,
            "Excluded courses: COMP SCI 639 | Must have 'N' breadth designation | 2 courses may apply"
        );
    }

    #[test]
    fn test_credit_arithmetic_with_needs() {
        let req = analyze(
            "Quantitative Reasoning B",
            "  EARNED: 3.00 CREDITS\n  IN-PROGRESS 3.00 CREDITS\n  --> NEEDS: 2.00 CREDITS",
            false,
            false,
        )
        .unwrap();
        assert!((req.credits_needed - 8.0).abs() < f64::EPSILON);
        assert!((req.credits_remaining() - 2.0).abs() < f64::EPSILON);
        assert_eq!(req.status, RequirementStatus::InProgress);
    }

    #[test]
    fn test_needed_defaults_to_earned_plus_in_progress() {
        let req = analyze("Communications A", "  EARNED: 3.00 CREDITS", true, false).unwrap();
        assert!((req.credits_needed - 3.0).abs() < f64::EPSILON);
        assert!(req.credits_remaining().abs() < f64::EPSILON);
        assert_eq!(req.status, RequirementStatus::Complete);
    }

    #[test]
    fn test_status_incomplete() {
        let req = analyze("Ethnic Studies", "  NEEDS: 3.00 CREDITS", false, false).unwrap();
        assert_eq!(req.status, RequirementStatus::Incomplete);
    }

    #[test]
    fn test_course_need_becomes_note() {
        let req = analyze(
            "Foreign Language",
            "  NEEDS: 4.00 CREDITS\n  NEEDS: 1 COURSE\n",
            false,
            false,
        )
        .unwrap();
        assert!((req.credits_needed - 4.0).abs() < f64::EPSILON);
        assert_eq!(req.notes, "Needs 1 more course(s)");
    }

    #[test]
    fn test_major_notes_suppressed_at_parent() {
        let content = "  EARNED: 6.00 CREDITS\n+ 1) Basic Computer Science\n   FA22 COMP SCI300 3.00 A Programming II\n- 2) Electives\n   NEEDS: 3.00 CREDITS\n   SELECT FROM: COMP SCI 400, 407";
        let req = analyze("Computer Sciences Major", content, false, false).unwrap();
        assert_eq!(req.sub_requirements.len(), 2);
        assert!(req.notes.is_empty());
        assert!(req.select_from.is_empty());
        assert_eq!(
            req.sub_requirements[1].select_from,
            vec!["COMP SCI 400", "COMP SCI 407"]
        );
    }

    #[test]
    fn test_major_totals_ignore_sub_section_tokens() {
        let content = "  EARNED: 21.00 CREDITS\n  --> NEEDS: 12.00 CREDITS\n- 1) Theory\n   NEEDS: 3.00 CREDITS\nIP 2) Systems\n   IN-PROGRESS 3.00 CREDITS";
        let req = analyze("Computer Sciences Major", content, false, false).unwrap();
        assert!((req.credits_earned - 21.0).abs() < f64::EPSILON);
        assert!((req.credits_in_progress).abs() < f64::EPSILON);
        assert!((req.credits_needed - 33.0).abs() < f64::EPSILON);
        assert_eq!(req.status, RequirementStatus::Incomplete);
    }

    #[test]
    fn test_non_major_is_flat() {
        let content = "+ 1) Part one\n   SELECT FROM: ECON 101";
        let req = analyze("Economics Requirement", content, false, false).unwrap();
        assert!(req.sub_requirements.is_empty());
        assert_eq!(req.select_from, vec!["ECON 101"]);
    }

    #[test]
    fn test_subrequirement_credits_from_courses() {
        let block = SubRequirementBlock {
            marker: "IP".to_string(),
            section_number: "1)".to_string(),
            name: "Core".to_string(),
            content: "Core\n   FA22 COMP SCI300 3.00 A Programming II\n   FA25 COMP SCI577 4.00 INP Algorithms\n".to_string(),
        };
        let req = analyze_subrequirement(&block).unwrap();
        assert_eq!(req.status, RequirementStatus::InProgress);
        assert!((req.credits_earned - 3.0).abs() < f64::EPSILON);
        assert!((req.credits_in_progress - 4.0).abs() < f64::EPSILON);
        assert!((req.credits_needed - 7.0).abs() < f64::EPSILON);
        assert_eq!(req.courses.len(), 2);
    }
}
