//! Parsed audit report aggregate

use super::{Course, DegreeProgram, GpaInfo, PreparationInfo, Requirement, StudentInfo};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Degree-level credit totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DegreeCredits {
    /// Credits earned toward the degree
    pub total_earned: f64,
    /// Credits in progress toward the degree
    pub total_in_progress: f64,
    /// Credits still needed for the degree
    pub credits_needed: f64,
    /// Advanced standing credits total
    pub advanced_standing: f64,
    /// Resident degree credits
    pub resident_credits: f64,
}

impl DegreeCredits {
    /// Earned plus in-progress credits
    #[must_use]
    pub fn total_credits(&self) -> f64 {
        self.total_earned + self.total_in_progress
    }
}

/// A numbered category inside a breadth requirement (e.g., "Biological Science")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreadthSubCategory {
    /// Courses listed in the category
    pub courses: Vec<Course>,
    /// "complete" or "incomplete"
    pub status: String,
    /// Credits applied, for complete categories
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub credits: Option<f64>,
    /// Credits applied so far, for incomplete categories
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub credits_added: Option<f64>,
    /// Credits still needed, when the category states it
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub credits_needed: Option<f64>,
    /// Selection hints, for incomplete categories
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
}

/// One breadth requirement block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreadthRequirement {
    /// Display name (e.g., "Natural Sciences")
    pub name: String,
    /// "complete" or "incomplete"
    pub status: String,
    /// Credits earned
    pub credits_earned: f64,
    /// Credits needed (earned plus any stated need)
    pub credits_needed: f64,
    /// Credits in progress
    pub credits_in_progress: f64,
    /// Numbered categories keyed by name
    pub sub_categories: BTreeMap<String, BreadthSubCategory>,
}

/// One advanced standing row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedStandingEntry {
    /// Date column
    pub date: String,
    /// Credit type column (e.g., "AP", "TRAN")
    #[serde(rename = "type")]
    pub kind: String,
    /// Degree column
    pub degree: String,
    /// Credits in the last column (0.0 when not numeric)
    pub credits: f64,
}

/// Overall completion banners
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionStatus {
    /// "ALL REQUIREMENTS COMPLETE" was printed
    pub is_complete: bool,
    /// Same as `is_complete`
    pub requirements_satisfied: bool,
    /// "AT LEAST ONE REQUIREMENT HAS NOT BEEN SATISFIED" was printed
    pub has_unsatisfied_requirements: bool,
    /// Human-readable status message
    pub completion_message: String,
    /// Eligible to graduate on requirements alone
    pub graduation_eligible: bool,
    /// "nearing the minimum credits to graduate" was printed
    pub nearing_graduation: bool,
}

/// Information about the parse itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsingMetadata {
    /// RFC 3339 timestamp of the parse
    pub parsed_at: String,
    /// Version of the parser that produced the report
    pub parser_version: String,
    /// Non-fatal validation warnings
    pub warnings: Vec<String>,
}

/// Everything recovered from one audit report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedReport {
    /// Student identity
    pub student_info: StudentInfo,
    /// Report preparation time, when printed
    pub preparation_info: Option<PreparationInfo>,
    /// Declared programs
    pub degree_program: DegreeProgram,
    /// University GPA
    pub gpa_info: GpaInfo,
    /// Degree credit totals
    pub degree_credits: DegreeCredits,
    /// Every course found in the report, deduplicated
    pub courses: Vec<Course>,
    /// Courses from the in-progress section
    pub in_progress_courses: Vec<Course>,
    /// Breadth requirement blocks keyed by snake-cased name
    pub breadth_requirements: BTreeMap<String, BreadthRequirement>,
    /// Top-level requirements in report order
    pub requirements: Vec<Requirement>,
    /// High school units keyed by "SUBJECT_UNIT_TYPE"
    pub high_school_units: BTreeMap<String, f64>,
    /// Advanced standing rows
    pub advanced_standing: Vec<AdvancedStandingEntry>,
    /// Completion banners
    pub completion_status: CompletionStatus,
    /// Parse metadata and warnings
    pub parsing_metadata: ParsingMetadata,
}

impl ParsedReport {
    /// Serialize the report to a JSON value
    ///
    /// # Errors
    /// Returns an error if a value cannot be represented in JSON (e.g., a non-finite float)
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Validation warnings produced by the parse
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.parsing_metadata.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_credits() {
        let credits = DegreeCredits {
            total_earned: 90.0,
            total_in_progress: 15.0,
            ..DegreeCredits::default()
        };
        assert!((credits.total_credits() - 105.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sub_category_skips_absent_fields() {
        let sub = BreadthSubCategory {
            courses: Vec::new(),
            status: "complete".to_string(),
            credits: Some(3.0),
            credits_added: None,
            credits_needed: None,
            notes: None,
        };
        let json = serde_json::to_value(&sub).unwrap();
        assert!(json.get("credits").is_some());
        assert!(json.get("credits_added").is_none());
        assert!(json.get("notes").is_none());
    }
}
