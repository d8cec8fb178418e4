//! Validate command handler

use super::{read_input, to_json};
use dars_audit::core::parser::DarsParser;
use serde::Serialize;
use std::path::Path;

/// Outcome of the format check, printed as JSON
#[derive(Debug, Serialize)]
struct Validation {
    is_valid: bool,
    errors: Vec<String>,
}

/// Run the validate command.
///
/// Only the structural check runs; an invalid file is reported on stdout and turned
/// into an error so the process exits non-zero.
pub fn run(input_file: &Path) -> Result<(), String> {
    let text = read_input(input_file)?;
    let errors: Vec<String> = DarsParser::new()
        .validate_format(&text)
        .err()
        .map(|e| e.to_string())
        .into_iter()
        .collect();

    let validation = Validation {
        is_valid: errors.is_empty(),
        errors,
    };
    println!("{}", to_json(&validation, false)?);

    if validation.is_valid {
        Ok(())
    } else {
        Err(format!("✗ {} is not a DARS report", input_file.display()))
    }
}
