//! Line classifiers for raw audit text
//!
//! Every structural pattern the parser relies on lives here behind a named
//! function, so a layout change in the report only has to be handled in one place.
//! Classifiers never fail: a missing pattern is reported as `None` or `false`.

use regex::Regex;
use std::sync::LazyLock;

/// Phrases that look like requirement headers but are report boilerplate
const BOILERPLATE_PHRASES: [&str; 7] = [
    "courses currently",
    "information for advising",
    "legend",
    "student please note",
    "notes to student",
    "end of analysis",
    "symbol key",
];

static COURSE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"([A-Z]{2}\d{2})\s+([A-Z\s&]+?)(X?\d{3,4}[A-Z]*)\s+(\d+\.\d+)\s+([A-Z]+|INP)\s*(.*)$")
});
static IN_PROGRESS_COURSE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^([A-Z]{2}\d{2})\s+([A-Z\s&]+?)(X?\d{3,4}[A-Z]*)\s+(\d+\.\d+)\s+INP\s*(.*)$")
});
static REQUIREMENT_HEADER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(OK|NO|IP)\s+(.+)$"));
static CREDIT_SUMMARY_NAME: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(?:\d+\.\d+\s+CREDITS|IN-PROGRESS\b|EARNED:|NEEDS:)"));
static SUB_ITEM_LINE: LazyLock<Regex> = LazyLock::new(|| compile(r"^(?:IP[+-]?|\+|-)\s*\d+\)"));
static SUB_ITEM_MARKER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?m)(?:^|\s)(IP[+-]?|\+|-)\s*(\d+)\)[ \t]*"));
static SECTION_RULE: LazyLock<Regex> = LazyLock::new(|| compile(r"^(?:-{5,}|\*{5,})"));
static EARNED: LazyLock<Regex> = LazyLock::new(|| compile(r"EARNED:\s*(\d+\.\d+)\s+CREDITS"));
static IN_PROGRESS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"IN-PROGRESS\s+(\d+\.\d+)\s+CREDITS"));
static NEEDS_CREDITS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"NEEDS:\s*(\d+\.\d+)\s+CREDITS"));
static NEEDS_COURSES: LazyLock<Regex> = LazyLock::new(|| compile(r"NEEDS:\s*(\d+)\s+COURSE"));

/// Compile a built-in pattern; these are constants, so failure is a programming error
pub(super) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern}: {e}"))
}

/// Fields captured from a course line, still as raw text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseLine<'a> {
    /// Term code (e.g., "FA22")
    pub term: &'a str,
    /// Subject before whitespace normalization
    pub subject: &'a str,
    /// Course number
    pub number: &'a str,
    /// Credit value as printed
    pub credits: &'a str,
    /// Grade token
    pub grade: &'a str,
    /// Title with markers still present
    pub title: &'a str,
}

/// A requirement header split into its status token and name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequirementHeader<'a> {
    /// `OK`, `NO` or `IP`
    pub status_token: &'a str,
    /// Requirement name
    pub name: &'a str,
}

/// Position of a numbered sub-item marker such as `+ 1)` or `IP- 6)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubItemMarker {
    /// Status marker (`+`, `-`, `IP`, `IP+`, `IP-`)
    pub marker: String,
    /// Counter including the closing parenthesis (e.g., "1)")
    pub section_number: String,
    /// Byte offset where the marker starts
    pub start: usize,
    /// Byte offset just past the marker and trailing blanks
    pub end: usize,
}

/// Credit-summary tokens found in a span; each is the last occurrence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreditTokens<'a> {
    /// `EARNED: <n> CREDITS`
    pub earned: Option<&'a str>,
    /// `IN-PROGRESS <n> CREDITS`
    pub in_progress: Option<&'a str>,
    /// `NEEDS: <n> CREDITS`
    pub needs_credits: Option<&'a str>,
    /// `NEEDS: <n> COURSE(S)`
    pub needs_courses: Option<&'a str>,
}

impl CreditTokens<'_> {
    /// Whether no token was present at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.earned.is_none()
            && self.in_progress.is_none()
            && self.needs_credits.is_none()
            && self.needs_courses.is_none()
    }
}

/// Match a course line anywhere in `line`
#[must_use]
pub fn match_course_line(line: &str) -> Option<CourseLine<'_>> {
    let caps = COURSE_LINE.captures(line)?;
    Some(CourseLine {
        term: caps.get(1)?.as_str(),
        subject: caps.get(2)?.as_str(),
        number: caps.get(3)?.as_str(),
        credits: caps.get(4)?.as_str(),
        grade: caps.get(5)?.as_str(),
        title: caps.get(6).map_or("", |m| m.as_str()),
    })
}

/// Match a trimmed line as an in-progress (`INP`) course line
#[must_use]
pub fn match_in_progress_course_line(line: &str) -> Option<CourseLine<'_>> {
    let caps = IN_PROGRESS_COURSE_LINE.captures(line.trim())?;
    Some(CourseLine {
        term: caps.get(1)?.as_str(),
        subject: caps.get(2)?.as_str(),
        number: caps.get(3)?.as_str(),
        credits: caps.get(4)?.as_str(),
        grade: "INP",
        title: caps.get(5).map_or("", |m| m.as_str()),
    })
}

/// Match a requirement header (`OK|NO|IP <name>`) on a trimmed line
///
/// Status-prefixed credit lines such as `IP 6.00 CREDITS ADDED` are not headers.
#[must_use]
pub fn match_requirement_header(line: &str) -> Option<RequirementHeader<'_>> {
    let caps = REQUIREMENT_HEADER.captures(line.trim())?;
    let name = caps.get(2)?.as_str().trim();
    if CREDIT_SUMMARY_NAME.is_match(name) {
        return None;
    }
    Some(RequirementHeader {
        status_token: caps.get(1)?.as_str(),
        name,
    })
}

/// Whether the line opens a numbered sub-item of the current requirement
#[must_use]
pub fn is_sub_item_line(line: &str) -> bool {
    SUB_ITEM_LINE.is_match(line.trim())
}

/// Whether the line starts a new top-level requirement block
///
/// Sub-item lines such as `IP 6) ...` share the header shape but stay inside their parent.
#[must_use]
pub fn is_top_level_header(line: &str) -> bool {
    match_requirement_header(line).is_some() && !is_sub_item_line(line)
}

/// Whether a header name is a legend, banner or advising note rather than a requirement
#[must_use]
pub fn is_boilerplate(name: &str) -> bool {
    let lowered = name.to_lowercase();
    BOILERPLATE_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase))
}

/// Whether the line is a horizontal rule of five or more `-` or `*`
#[must_use]
pub fn is_section_rule(line: &str) -> bool {
    SECTION_RULE.is_match(line.trim())
}

/// Find every numbered sub-item marker in `content`, in order
///
/// A marker must start a line or follow whitespace, so ranges such as `(1-3)`
/// inside titles are not mistaken for sub-items.
#[must_use]
pub fn find_sub_item_markers(content: &str) -> Vec<SubItemMarker> {
    SUB_ITEM_MARKER
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let marker = caps.get(1)?;
            let number = caps.get(2)?;
            Some(SubItemMarker {
                marker: marker.as_str().to_string(),
                section_number: format!("{})", number.as_str()),
                start: marker.start(),
                end: whole.end(),
            })
        })
        .collect()
}

/// Extract credit-summary tokens from a span; later statements override earlier ones
#[must_use]
pub fn credit_tokens(span: &str) -> CreditTokens<'_> {
    CreditTokens {
        earned: last_capture(&EARNED, span),
        in_progress: last_capture(&IN_PROGRESS, span),
        needs_credits: last_capture(&NEEDS_CREDITS, span),
        needs_courses: last_capture(&NEEDS_COURSES, span),
    }
}

/// First capture group of the last match of `re` in `span`
fn last_capture<'a>(re: &Regex, span: &'a str) -> Option<&'a str> {
    re.captures_iter(span)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_line() {
        let line = match_course_line("   FA22 COMP SCI300 3.00 A  Programming I").unwrap();
        assert_eq!(line.term, "FA22");
        assert_eq!(line.subject.trim(), "COMP SCI");
        assert_eq!(line.number, "300");
        assert_eq!(line.credits, "3.00");
        assert_eq!(line.grade, "A");
        assert_eq!(line.title, "Programming I");
    }

    #[test]
    fn test_course_line_with_spaced_subject() {
        let line = match_course_line("SP24 ACCT I S300 3.00 AB Intro Financial Acct").unwrap();
        assert_eq!(line.subject.trim(), "ACCT I S");
        assert_eq!(line.number, "300");
        assert_eq!(line.grade, "AB");
    }

    #[test]
    fn test_course_line_leading_x_and_suffix() {
        let line = match_course_line("FA23 MATH X234 4.00 T Transfer Calc").unwrap();
        assert_eq!(line.number, "X234");

        let line = match_course_line("FA23 CHEM 104A 5.00 B General Chem").unwrap();
        assert_eq!(line.number, "104A");
    }

    #[test]
    fn test_non_course_lines() {
        assert!(match_course_line("EARNED: 12.00 CREDITS").is_none());
        assert!(match_course_line("OK Communications A").is_none());
        assert!(match_course_line("").is_none());
    }

    #[test]
    fn test_in_progress_course_line() {
        let line = match_in_progress_course_line("  FA25 COMP SCI544 3.00 INP Intro Big Data").unwrap();
        assert_eq!(line.grade, "INP");
        assert_eq!(line.number, "544");
        assert_eq!(line.title, "Intro Big Data");
        assert!(match_in_progress_course_line("FA22 COMP SCI300 3.00 A Prog").is_none());
    }

    #[test]
    fn test_requirement_header() {
        let header = match_requirement_header("  OK  Communications A ").unwrap();
        assert_eq!(header.status_token, "OK");
        assert_eq!(header.name, "Communications A");

        assert!(match_requirement_header("OKAY then").is_none());
        assert!(match_requirement_header("NOTE: something").is_none());
        assert!(match_requirement_header("IP     6.00 CREDITS ADDED").is_none());
        assert!(match_requirement_header("IP  IN-PROGRESS 3.00 CREDITS").is_none());
    }

    #[test]
    fn test_sub_item_lines_are_not_top_level() {
        assert!(is_sub_item_line("IP 6) Electives"));
        assert!(is_sub_item_line("+ 1) Basic Computer Science"));
        assert!(is_sub_item_line("IP- 3) Theory"));
        assert!(!is_top_level_header("IP 6) Electives"));
        assert!(is_top_level_header("IP Computer Sciences Major"));
    }

    #[test]
    fn test_boilerplate() {
        assert!(is_boilerplate("Courses currently in-progress"));
        assert!(is_boilerplate("LEGEND"));
        assert!(is_boilerplate("Information for Advising"));
        assert!(!is_boilerplate("Communications A"));
    }

    #[test]
    fn test_section_rule() {
        assert!(is_section_rule("-----"));
        assert!(is_section_rule("   ********************"));
        assert!(!is_section_rule("----"));
        assert!(!is_section_rule("**TOTALS**"));
    }

    #[test]
    fn test_sub_item_markers() {
        let content = "+ 1) Basic\n  FA22 COMP SCI300 3.00 A Prog\nIP- 2) Theory\n- 3) Topics (1-3)\n";
        let markers = find_sub_item_markers(content);
        assert_eq!(markers.len(), 3);
        assert_eq!(markers[0].marker, "+");
        assert_eq!(markers[0].section_number, "1)");
        assert_eq!(markers[1].marker, "IP-");
        assert_eq!(markers[2].marker, "-");
        assert_eq!(&content[markers[0].end..markers[0].end + 5], "Basic");
    }

    #[test]
    fn test_credit_tokens_take_last_match() {
        let span = "EARNED: 3.00 CREDITS\nEARNED: 6.00 CREDITS\nIN-PROGRESS 3.00 CREDITS\n--> NEEDS: 2 COURSES";
        let tokens = credit_tokens(span);
        assert_eq!(tokens.earned, Some("6.00"));
        assert_eq!(tokens.in_progress, Some("3.00"));
        assert_eq!(tokens.needs_credits, None);
        assert_eq!(tokens.needs_courses, Some("2"));
    }

    #[test]
    fn test_credit_tokens_absent() {
        assert!(credit_tokens("nothing here").is_empty());
        let tokens = credit_tokens("NEEDS: 3.00 CREDITS");
        assert_eq!(tokens.needs_credits, Some("3.00"));
        assert_eq!(tokens.needs_courses, None);
    }
}
