//! Markdown report generator
//!
//! Renders the audit as Markdown tables. The output reads well as plain text and
//! renders in GitHub, GitLab and VS Code.

use crate::core::report::{AuditView, ReportContext, ReportGenerator};
use askama::Template;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Markdown template bound to an audit view
#[derive(Template)]
#[template(path = "audit.md")]
struct MarkdownTemplate<'a> {
    view: &'a AuditView,
}

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let view = ctx.view();
        Ok(MarkdownTemplate { view: &view }.render()?)
    }
}
