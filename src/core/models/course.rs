//! Course model

use serde::{Deserialize, Serialize};

/// Grade token the audit prints for courses that are still being taken
pub const IN_PROGRESS_GRADE: &str = "INP";

/// Grade token the audit prints for transfer credit
pub const TRANSFER_GRADE: &str = "T";

/// Grades that count as passing for most requirement purposes
const PASSING_GRADES: [&str; 9] = ["A", "AB", "B", "BC", "C", "P", "S", "CR", TRANSFER_GRADE];

/// One course occurrence recovered from an audit report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Term code (e.g., "FA22", "SP24")
    pub term: String,

    /// Subject with whitespace collapsed (e.g., "COMP SCI")
    pub subject: String,

    /// Course number, may carry a leading `X` or trailing letters (e.g., "300", "X10", "240A")
    pub number: String,

    /// Credits attached to this attempt
    pub credits: f64,

    /// Grade token; merged attempts hold a sorted `/`-joined set (e.g., "B/F")
    pub grade: String,

    /// Course title with in-text markers removed
    pub title: String,

    /// Marked `>R` (repeatable for credit)
    pub is_repeatable: bool,

    /// Marked `>D` (duplicate attempt)
    pub is_duplicate: bool,
}

impl Course {
    /// Create a new course with no markers set
    ///
    /// # Arguments
    /// * `term` - Term code
    /// * `subject` - Normalized subject
    /// * `number` - Course number
    /// * `credits` - Credits for this attempt
    /// * `grade` - Grade token
    /// * `title` - Cleaned title
    #[must_use]
    pub const fn new(
        term: String,
        subject: String,
        number: String,
        credits: f64,
        grade: String,
        title: String,
    ) -> Self {
        Self {
            term,
            subject,
            number,
            credits,
            grade,
            title,
            is_repeatable: false,
            is_duplicate: false,
        }
    }

    /// Get the display code for this course
    ///
    /// # Returns
    /// A string in the format "SUBJECT NUMBER" (e.g., "COMP SCI 300")
    #[must_use]
    pub fn full_course_code(&self) -> String {
        format!("{} {}", self.subject, self.number)
    }

    /// Whether the course is still in progress
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.grade == IN_PROGRESS_GRADE
    }

    /// Whether the grade counts as passing (C or better, pass/satisfactory, credit, transfer)
    #[must_use]
    pub fn is_passing_grade(&self) -> bool {
        PASSING_GRADES.contains(&self.grade.as_str())
    }
}
