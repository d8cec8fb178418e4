//! Requirement model

use super::Course;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Satisfaction state of a requirement or sub-requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementStatus {
    /// Requirement is satisfied (`OK` / `+`)
    Complete,
    /// Requirement still has unmet needs (`NO` / `-`)
    Incomplete,
    /// Requirement is satisfied only once in-progress work finishes (`IP`)
    InProgress,
    /// Requirement is covered by planned coursework
    Planned,
}

impl RequirementStatus {
    /// Status for a top-level header token (`OK`, `NO`, `IP`)
    #[must_use]
    pub fn from_header_token(token: &str) -> Self {
        match token {
            "OK" => Self::Complete,
            "IP" => Self::InProgress,
            _ => Self::Incomplete,
        }
    }

    /// Status for a sub-requirement marker (`+`, `-`, `IP`, `IP+`, `IP-`)
    #[must_use]
    pub fn from_marker(marker: &str) -> Self {
        if marker == "+" {
            Self::Complete
        } else if marker.starts_with("IP") {
            Self::InProgress
        } else {
            Self::Incomplete
        }
    }
}

impl fmt::Display for RequirementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Complete => "complete",
            Self::Incomplete => "incomplete",
            Self::InProgress => "in_progress",
            Self::Planned => "planned",
        };
        write!(f, "{label}")
    }
}

/// A named degree rule, optionally broken into numbered sub-requirements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    /// Requirement name as printed after the status token
    pub name: String,

    /// Satisfaction state
    pub status: RequirementStatus,

    /// Total credits the requirement asks for
    pub credits_needed: f64,

    /// Credits already earned toward it
    pub credits_earned: f64,

    /// Credits currently in progress toward it
    pub credits_in_progress: f64,

    /// Courses listed under the requirement
    pub courses: Vec<Course>,

    /// Numbered sub-requirements (empty for leaves)
    pub sub_requirements: Vec<Requirement>,

    /// Free-text remarks; only set on requirements without sub-requirements
    pub notes: String,

    /// Course codes the student may choose among; only set on requirements without sub-requirements
    pub select_from: Vec<String>,
}

impl Requirement {
    /// Create a requirement shell with no courses, notes or options
    #[must_use]
    pub const fn new(
        name: String,
        status: RequirementStatus,
        credits_needed: f64,
        credits_earned: f64,
        credits_in_progress: f64,
    ) -> Self {
        Self {
            name,
            status,
            credits_needed,
            credits_earned,
            credits_in_progress,
            courses: Vec::new(),
            sub_requirements: Vec::new(),
            notes: String::new(),
            select_from: Vec::new(),
        }
    }

    /// Credits still missing once earned and in-progress credits are counted
    #[must_use]
    pub fn credits_remaining(&self) -> f64 {
        (self.credits_needed - self.credits_earned - self.credits_in_progress).max(0.0)
    }

    /// Share of the requirement covered so far, clamped to `[0, 100]`
    ///
    /// Requirements that ask for no credits are reported as fully covered.
    #[must_use]
    pub fn completion_percentage(&self) -> f64 {
        if self.credits_needed <= 0.0 {
            return 100.0;
        }
        ((self.credits_earned + self.credits_in_progress) / self.credits_needed * 100.0)
            .clamp(0.0, 100.0)
    }

    /// Whether the requirement is broken into sub-requirements
    #[must_use]
    pub fn has_sub_requirements(&self) -> bool {
        !self.sub_requirements.is_empty()
    }
}
