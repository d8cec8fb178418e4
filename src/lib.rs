//! Shared library for `dars-audit`
//! Contains the degree-audit parser and everything the CLI builds on top of it

pub mod config;
pub mod core;
pub mod logger;

pub use crate::core::get_version;
pub use crate::core::parser::{parse_dars_text, DarsParser, FormatError};
