//! Data models for `dars-audit`

pub mod course;
pub mod program;
pub mod report;
pub mod requirement;
pub mod student;

pub use course::{Course, IN_PROGRESS_GRADE, TRANSFER_GRADE};
pub use program::{DegreeProgram, ProgramDeclaration, ProgramKind};
pub use report::{
    AdvancedStandingEntry, BreadthRequirement, BreadthSubCategory, CompletionStatus,
    DegreeCredits, ParsedReport, ParsingMetadata,
};
pub use requirement::{Requirement, RequirementStatus};
pub use student::{GpaInfo, PreparationInfo, StudentInfo, GPA_TOLERANCE, UNKNOWN_STUDENT};
