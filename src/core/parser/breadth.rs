//! Breadth requirement extraction

use super::courses;
use super::patterns;
use super::segmenter;
use crate::core::models::{BreadthRequirement, BreadthSubCategory, Course};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Header text (after the status token) and display name of each breadth block
const BREADTH_BLOCKS: [(&str, &str); 4] = [
    ("Breadth in the Degree: Natural Sciences", "Natural Sciences"),
    ("Breadth in the Degree: Humanities", "Humanities"),
    ("Breadth in the Degree: Social Sciences", "Social Sciences"),
    ("University General Education: Breadth", "General Education Breadth"),
];

const COMPLETE: &str = "complete";
const INCOMPLETE: &str = "incomplete";

static CREDITS_SUFFIX: LazyLock<Regex> = LazyLock::new(|| patterns::compile(r"\d+\.\d+\s+CREDITS"));
static CATEGORY_NOTE: LazyLock<Regex> = LazyLock::new(|| {
    patterns::compile(r"(?i)(SELECT FROM:.*|COURSES W/.*|Must have.*|Available courses:.*)")
});

/// Extract every breadth block present in the report, keyed by snake-cased name
///
/// Each block runs from its header to the next requirement header or horizontal rule.
/// Block-level credits are read from the text before the first numbered category.
#[must_use]
pub fn extract_breadth_requirements(text: &str) -> BTreeMap<String, BreadthRequirement> {
    let lines: Vec<&str> = text.lines().collect();
    let mut found = BTreeMap::new();

    for (header_text, display_name) in BREADTH_BLOCKS {
        let Some((idx, status_token)) = find_header(&lines, header_text) else {
            continue;
        };
        let content = lines[idx + 1..]
            .iter()
            .take_while(|line| !patterns::is_section_rule(line) && !patterns::is_top_level_header(line))
            .copied()
            .collect::<Vec<_>>()
            .join("\n");

        let breadth = build_breadth(display_name, status_token, &content);
        found.insert(display_name.to_lowercase().replace(' ', "_"), breadth);
    }

    found
}

/// Locate the first header line for a breadth block, returning its index and status token
fn find_header<'a>(lines: &[&'a str], header_text: &str) -> Option<(usize, &'a str)> {
    lines.iter().enumerate().find_map(|(idx, line)| {
        let header = patterns::match_requirement_header(line)?;
        (header.status_token != "IP" && header.name.starts_with(header_text))
            .then_some((idx, header.status_token))
    })
}

fn build_breadth(name: &str, status_token: &str, content: &str) -> BreadthRequirement {
    let categories = segmenter::segment_subrequirements(content);
    let preamble_end = patterns::find_sub_item_markers(content)
        .first()
        .map_or(content.len(), |marker| marker.start);
    let tokens = patterns::credit_tokens(&content[..preamble_end]);

    let credits_earned = parse_or_zero(tokens.earned);
    let credits_in_progress = parse_or_zero(tokens.in_progress);
    let credits_needed = credits_earned + parse_or_zero(tokens.needs_credits);

    let sub_categories = categories
        .iter()
        .map(|category| {
            let category_name = CREDITS_SUFFIX
                .find(&category.name)
                .map_or(category.name.as_str(), |m| &category.name[..m.start()])
                .trim()
                .to_string();
            (category_name, build_category(&category.marker, &category.content))
        })
        .collect();

    BreadthRequirement {
        name: name.to_string(),
        status: if status_token == "OK" { COMPLETE } else { INCOMPLETE }.to_string(),
        credits_earned,
        credits_needed,
        credits_in_progress,
        sub_categories,
    }
}

fn build_category(marker: &str, body: &str) -> BreadthSubCategory {
    let category_courses = courses::extract_courses(body);
    let credits: f64 = category_courses.iter().map(|c: &Course| c.credits).sum();

    if marker == "+" {
        return BreadthSubCategory {
            courses: category_courses,
            status: COMPLETE.to_string(),
            credits: Some(credits),
            credits_added: None,
            credits_needed: None,
            notes: None,
        };
    }

    let tokens = patterns::credit_tokens(body);
    BreadthSubCategory {
        courses: category_courses,
        status: INCOMPLETE.to_string(),
        credits: None,
        credits_added: Some(credits),
        credits_needed: tokens.needs_credits.and_then(|raw| raw.parse().ok()),
        notes: CATEGORY_NOTE
            .find(body)
            .map(|m| m.as_str().trim().to_string()),
    }
}

fn parse_or_zero(raw: Option<&str>) -> f64 {
    raw.and_then(|value| value.parse().ok()).unwrap_or(0.0)
}
