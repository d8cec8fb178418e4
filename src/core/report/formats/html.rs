//! HTML report generator
//!
//! Generates a self-contained HTML page with embedded CSS. Text from the report is
//! HTML-escaped by the template engine.

use crate::core::report::{AuditView, ReportContext, ReportGenerator};
use askama::Template;
use std::error::Error;
use std::fs;
use std::path::Path;

/// HTML template bound to an audit view
#[derive(Template)]
#[template(path = "audit.html")]
struct HtmlTemplate<'a> {
    view: &'a AuditView,
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let html = self.render(ctx)?;
        fs::write(output_path, html)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let view = ctx.view();
        Ok(HtmlTemplate { view: &view }.render()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::test_support::sample_report;

    #[test]
    fn test_render_escapes_report_text() {
        let report = sample_report();
        let html = HtmlReporter::new()
            .render(&ReportContext::new(&report))
            .unwrap();
        assert!(html.contains("<title>Degree Audit: Bucky Badger</title>"));
        assert!(html.contains("Communications A &lt;B&gt;"));
        assert!(!html.contains("Communications A <B>"));
    }

    #[test]
    fn test_sub_requirement_rows_marked() {
        let report = sample_report();
        let html = HtmlReporter::new()
            .render(&ReportContext::new(&report))
            .unwrap();
        assert!(html.contains(r#"<tr class="sub">"#));
    }
}
