//! Course extraction and deduplication

use super::patterns::{self, CourseLine};
use crate::core::models::{Course, IN_PROGRESS_GRADE};
use crate::debug;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

/// Title that always carries a fixed credit value regardless of what the line printed
const FIXED_CREDIT_TITLE: &str = "Statics";

/// Credit value applied to [`FIXED_CREDIT_TITLE`]
const FIXED_CREDIT_VALUE: f64 = 3.0;

/// Banner that opens the in-progress section
const IN_PROGRESS_BANNER: &str = "Courses currently in-progress";

/// Single-letter markers such as `>R` (repeatable) or `>D` (duplicate)
static TITLE_MARKER: LazyLock<Regex> = LazyLock::new(|| patterns::compile(r">[A-Z]"));

/// Identity used when collapsing repeated attempts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum DedupKey {
    /// Repeatable courses keep one entry per term
    Attempt {
        term: String,
        subject: String,
        number: String,
    },
    /// Everything else collapses by subject and number
    Course { subject: String, number: String },
}

impl DedupKey {
    fn of(course: &Course) -> Self {
        if course.is_repeatable {
            Self::Attempt {
                term: course.term.clone(),
                subject: course.subject.clone(),
                number: course.number.clone(),
            }
        } else {
            Self::Course {
                subject: course.subject.clone(),
                number: course.number.clone(),
            }
        }
    }
}

/// Pull every course line out of `span`, in document order
///
/// Lines whose numbers do not parse, and credit-summary lines that happen to look
/// like courses (their title contains `EARNED`), contribute nothing.
#[must_use]
pub fn extract_courses(span: &str) -> Vec<Course> {
    span.lines()
        .filter_map(patterns::match_course_line)
        .filter_map(build_course)
        .collect()
}

/// Pull the courses listed under the "Courses currently in-progress" banner
///
/// The section runs from the banner to the next horizontal rule; every course in it
/// is recorded with the in-progress grade.
#[must_use]
pub fn extract_in_progress_section(text: &str) -> Vec<Course> {
    let Some(banner) = text.find(IN_PROGRESS_BANNER) else {
        return Vec::new();
    };

    text[banner + IN_PROGRESS_BANNER.len()..]
        .lines()
        .skip(1)
        .take_while(|line| !patterns::is_section_rule(line))
        .filter_map(patterns::match_in_progress_course_line)
        .filter_map(build_course)
        .map(|mut course| {
            course.grade = IN_PROGRESS_GRADE.to_string();
            course
        })
        .collect()
}

/// Collapse repeated attempts of the same course
///
/// Repeatable courses are keyed by term, subject and number; all others by subject and
/// number. Merged entries keep the first attempt's fields with the union of grades
/// (sorted, deduplicated, `/`-joined). Output keeps first-seen order.
#[must_use]
pub fn deduplicate(courses: Vec<Course>) -> Vec<Course> {
    let mut merged: Vec<Course> = Vec::with_capacity(courses.len());
    let mut index_by_key: HashMap<DedupKey, usize> = HashMap::new();

    for course in courses {
        let key = DedupKey::of(&course);
        if let Some(&idx) = index_by_key.get(&key) {
            let existing = &mut merged[idx];
            existing.grade = merge_grades(&existing.grade, &course.grade);
        } else {
            index_by_key.insert(key, merged.len());
            merged.push(course);
        }
    }

    merged
}

/// Union of two `/`-separated grade sets, sorted and rejoined
fn merge_grades(left: &str, right: &str) -> String {
    let grades: BTreeSet<&str> = left
        .split('/')
        .chain(right.split('/'))
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .collect();
    grades.into_iter().collect::<Vec<_>>().join("/")
}

/// Strip in-text markers from a title, reporting the repeatable and duplicate flags
fn clean_title(raw: &str) -> (String, bool, bool) {
    let is_repeatable = raw.contains(">R");
    let is_duplicate = raw.contains(">D");
    let cleaned = TITLE_MARKER.replace_all(raw, "");
    let title = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    (title, is_repeatable, is_duplicate)
}

/// Turn a matched line into a course, or `None` when it should be skipped
fn build_course(line: CourseLine<'_>) -> Option<Course> {
    let Ok(mut credits) = line.credits.parse::<f64>() else {
        debug!("Skipping course line with malformed credits: {:?}", line.credits);
        return None;
    };

    let raw_title = line.title.trim();
    if raw_title.contains("EARNED") {
        return None;
    }
    if raw_title.contains(FIXED_CREDIT_TITLE) {
        credits = FIXED_CREDIT_VALUE;
    }

    let (title, is_repeatable, is_duplicate) = clean_title(raw_title);
    let subject = line.subject.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut course = Course::new(
        line.term.to_string(),
        subject,
        line.number.to_string(),
        credits,
        line.grade.to_string(),
        title,
    );
    course.is_repeatable = is_repeatable;
    course.is_duplicate = is_duplicate;
    Some(course)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_course() {
        let courses = extract_courses("FA22 COMP SCI300 3.00 A Programming I");
        assert_eq!(courses.len(), 1);
        let course = &courses[0];
        assert_eq!(course.term, "FA22");
        assert_eq!(course.subject, "COMP SCI");
        assert_eq!(course.number, "300");
        assert!((course.credits - 3.0).abs() < f64::EPSILON);
        assert_eq!(course.grade, "A");
        assert_eq!(course.title, "Programming I");
    }

    #[test]
    fn test_subject_whitespace_collapsed() {
        let courses = extract_courses("SP23 COMP   SCI400 3.00 B Intro to Programming III");
        assert_eq!(courses[0].subject, "COMP SCI");
    }

    #[test]
    fn test_markers_stripped_and_flagged() {
        let courses = extract_courses(
            "FA22 MUSIC 100 1.00 A >R Chorale\nSP23 MATH 221 5.00 F >D Calculus I",
        );
        assert_eq!(courses.len(), 2);
        assert!(courses[0].is_repeatable);
        assert!(!courses[0].is_duplicate);
        assert_eq!(courses[0].title, "Chorale");
        assert!(courses[1].is_duplicate);
        assert_eq!(courses[1].title, "Calculus I");
    }

    #[test]
    fn test_earned_lines_skipped() {
        let courses = extract_courses("FA22 COMP SCI300 3.00 A EARNED 3.00 CREDITS");
        assert!(courses.is_empty());
    }

    #[test]
    fn test_fixed_credit_title() {
        let courses = extract_courses("FA23 E M A201 4.00 B Statics");
        assert_eq!(courses.len(), 1);
        assert!((courses[0].credits - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_deduplicate_merges_grades() {
        let courses = extract_courses(
            "FA22 MATH 221 5.00 F Calculus I\nSP23 MATH 221 5.00 B Calculus I\nFA23 MATH 221 5.00 B Calculus I",
        );
        let merged = deduplicate(courses);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].grade, "B/F");
        assert_eq!(merged[0].term, "FA22");
    }

    #[test]
    fn test_deduplicate_keeps_repeatable_terms() {
        let courses = extract_courses(
            "FA22 MUSIC 100 1.00 A >R Chorale\nSP23 MUSIC 100 1.00 AB >R Chorale\nSP23 MUSIC 100 1.00 B >R Chorale",
        );
        let merged = deduplicate(courses);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].grade, "A");
        assert_eq!(merged[1].grade, "AB/B");
    }

    #[test]
    fn test_deduplicate_preserves_first_seen_order() {
        let courses = extract_courses(
            "FA22 STAT 240 4.00 A Data Science Modeling\nFA22 COMP SCI300 3.00 A Programming II\nSP23 STAT 240 4.00 B Data Science Modeling",
        );
        let merged = deduplicate(courses);
        let codes: Vec<String> = merged.iter().map(Course::full_course_code).collect();
        assert_eq!(codes, vec!["STAT 240", "COMP SCI 300"]);
    }

    #[test]
    fn test_merge_grades_union() {
        assert_eq!(merge_grades("B/F", "A"), "A/B/F");
        assert_eq!(merge_grades("B", "B"), "B");
    }

    #[test]
    fn test_in_progress_section() {
        let text = "IP Courses currently in-progress\n   EARNED: 0.00 CREDITS\nIP     6.00 CREDITS ADDED\n   FA25 COMP SCI544 3.00 INP Intro Big Data Systems\n   FA25 STAT 340 3.00 INP Data Modeling II\n---------------\n   FA25 MATH 340 3.00 INP Elementary Matrix\n";
        let courses = extract_in_progress_section(text);
        assert_eq!(courses.len(), 2);
        assert!(courses.iter().all(Course::is_in_progress));
        assert_eq!(courses[0].title, "Intro Big Data Systems");
        assert_eq!(courses[1].subject, "STAT");
    }

    #[test]
    fn test_in_progress_section_absent() {
        assert!(extract_in_progress_section("FA25 COMP SCI544 3.00 INP Intro").is_empty());
    }
}
