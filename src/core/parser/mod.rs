//! Degree audit report parser
//!
//! The parser recovers a [`ParsedReport`](crate::core::models::ParsedReport) from the
//! plain text extracted out of a DARS PDF. The stages, leaves first:
//!
//! - [`patterns`]: line classifiers (course lines, headers, credit tokens, rules)
//! - [`courses`]: course extraction and deduplication
//! - [`segmenter`]: requirement and sub-requirement blocks
//! - [`analyzer`]: credit arithmetic, status, select-from options and notes
//! - [`breadth`] and [`sections`]: breadth blocks and report-level metadata
//! - [`assembler`]: format check, orchestration and validation warnings
//!
//! Extraction is best effort throughout. Only the format check can fail a parse.

pub mod analyzer;
pub mod assembler;
pub mod breadth;
pub mod courses;
pub mod error;
pub mod patterns;
pub mod sections;
pub mod segmenter;

pub use assembler::{parse_dars_text, DarsParser, ParserOptions, DEFAULT_CREDIT_WARNING_THRESHOLD};
pub use error::{AnalysisError, FormatError};
