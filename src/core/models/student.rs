//! Student, preparation and GPA models

use serde::{Deserialize, Serialize};

/// Largest gap between the printed GPA and points / credits before the GPA is recomputed
pub const GPA_TOLERANCE: f64 = 0.001;

/// Name used when the report carries no recognizable student name
pub const UNKNOWN_STUDENT: &str = "Unknown";

/// Identity and catalog information for the audited student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInfo {
    /// Display name ("First Last", first name only, or "Unknown")
    pub name: String,
    /// Ten-digit student identifier (empty when not found)
    pub student_id: String,
    /// Catalog year code (e.g., "1234")
    pub catalog_year: String,
    /// Program code (e.g., "L&S 123")
    pub program_code: String,
    /// Alternate catalog year code
    pub alternate_catalog_year: String,
    /// Admission type (e.g., "FR", "TR")
    pub admit_type: String,
}

impl Default for StudentInfo {
    fn default() -> Self {
        Self {
            name: UNKNOWN_STUDENT.to_string(),
            student_id: String::new(),
            catalog_year: String::new(),
            program_code: String::new(),
            alternate_catalog_year: String::new(),
            admit_type: String::new(),
        }
    }
}

impl StudentInfo {
    /// Whether no usable name was recovered
    #[must_use]
    pub fn is_name_unknown(&self) -> bool {
        self.name.is_empty() || self.name == UNKNOWN_STUDENT
    }
}

/// When the report was prepared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparationInfo {
    /// Date with a four-digit year ("MM/DD/YYYY")
    pub date: String,
    /// Time of day ("HH:MM")
    pub time: String,
    /// Date and time joined by a space
    pub full_timestamp: String,
}

impl PreparationInfo {
    /// Build preparation info from a `MM/DD/YY` date and a `HH:MM` time
    ///
    /// Two-digit years are read as 20YY.
    #[must_use]
    pub fn from_short_date(short_date: &str, time: &str) -> Self {
        let date = match short_date.rsplit_once('/') {
            Some((month_day, year)) if year.len() == 2 => format!("{month_day}/20{year}"),
            _ => short_date.to_string(),
        };
        let full_timestamp = format!("{date} {time}");
        Self {
            date,
            time: time.to_string(),
            full_timestamp,
        }
    }
}

/// University GPA block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpaInfo {
    /// Credits earned toward the GPA
    pub credits_earned: f64,
    /// Credits that carry grade points
    pub gpa_credits: f64,
    /// Total grade points
    pub total_points: f64,
    /// Grade point average, recomputed when it disagrees with points / credits
    pub gpa: f64,
    /// The printed GPA when it had to be recomputed
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reported_gpa: Option<f64>,
}

impl GpaInfo {
    /// Build GPA info, correcting the GPA when it disagrees with `total_points / gpa_credits`
    ///
    /// The corrected value is rounded to three decimals and the printed value is kept in
    /// `reported_gpa` so callers can tell a correction happened.
    #[must_use]
    pub fn new(credits_earned: f64, gpa_credits: f64, total_points: f64, gpa: f64) -> Self {
        let mut info = Self {
            credits_earned,
            gpa_credits,
            total_points,
            gpa,
            reported_gpa: None,
        };
        if gpa_credits > 0.0 {
            let computed = total_points / gpa_credits;
            if (gpa - computed).abs() > GPA_TOLERANCE {
                info.reported_gpa = Some(gpa);
                info.gpa = (computed * 1000.0).round() / 1000.0;
            }
        }
        info
    }

    /// GPA info with every field zero (no GPA block in the report)
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            credits_earned: 0.0,
            gpa_credits: 0.0,
            total_points: 0.0,
            gpa: 0.0,
            reported_gpa: None,
        }
    }

    /// Whether the printed GPA was replaced by the computed one
    #[must_use]
    pub const fn was_corrected(&self) -> bool {
        self.reported_gpa.is_some()
    }
}

impl Default for GpaInfo {
    fn default() -> Self {
        Self::empty()
    }
}
