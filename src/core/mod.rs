//! Core module: audit models, the report parser and everything derived from a parse

pub mod models;
pub mod parser;
pub mod prereq_graph;
pub mod report;
pub mod summary;

/// Returns the current version of the `dars-audit` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
