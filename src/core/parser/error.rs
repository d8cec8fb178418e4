//! Error types for the audit parser

use thiserror::Error;

/// Errors returned by [`super::DarsParser::parse`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Input is empty or whitespace only
    #[error("Empty DARS text provided")]
    Empty,

    /// A required structural marker was not found
    #[error("Required pattern not found: {0}")]
    MissingPattern(String),

    /// Assembly failed after the format check passed
    #[error("Failed to parse DARS report: {0}")]
    Malformed(String),
}

/// Errors raised while analyzing a single requirement block
///
/// These never reach callers of the parser; the affected requirement is dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// A numeric token could not be converted
    #[error("Invalid {field} value: {value:?}")]
    InvalidNumber {
        /// Which token was being read
        field: &'static str,
        /// Raw text of the token
        value: String,
    },

    /// Computed credit totals are not finite
    #[error("Credit totals out of range in {0}")]
    CreditOverflow(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_messages() {
        assert_eq!(FormatError::Empty.to_string(), "Empty DARS text provided");
        assert_eq!(
            FormatError::MissingPattern("DARS".to_string()).to_string(),
            "Required pattern not found: DARS"
        );
    }

    #[test]
    fn test_analysis_error_message() {
        let err = AnalysisError::InvalidNumber {
            field: "EARNED",
            value: "x.00".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid EARNED value: \"x.00\"");
    }
}
