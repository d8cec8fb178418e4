//! Requirement segmentation
//!
//! Slices the report into per-requirement content blocks, and a requirement's block
//! into its numbered sub-requirement blocks.

use super::patterns;
use crate::core::models::RequirementStatus;

/// Longest sub-requirement display name kept from the block text
pub const MAX_SECTION_NAME_CHARS: usize = 120;

/// A top-level requirement header and the lines that belong to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementBlock {
    /// Requirement name from the header
    pub name: String,
    /// `OK`, `NO` or `IP`
    pub status_token: String,
    /// Lines following the header up to the next header or rule
    pub content: String,
}

impl RequirementBlock {
    /// Status implied by the header token
    #[must_use]
    pub fn status(&self) -> RequirementStatus {
        RequirementStatus::from_header_token(&self.status_token)
    }

    /// Header token says the requirement is satisfied
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status() == RequirementStatus::Complete
    }

    /// Header token says the requirement is in progress
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.status() == RequirementStatus::InProgress
    }
}

/// A numbered sub-section inside a requirement block (e.g., `+ 1) Basic Computer Science`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubRequirementBlock {
    /// Status marker (`+`, `-`, `IP`, `IP+`, `IP-`)
    pub marker: String,
    /// Counter including the parenthesis (e.g., "1)")
    pub section_number: String,
    /// First line of the sub-section, bounded to [`MAX_SECTION_NAME_CHARS`]
    pub name: String,
    /// Text from the marker to the next marker or the end of the block
    pub content: String,
}

/// Split report text into requirement blocks, in document order
///
/// A block opens on a header line that is not boilerplate and runs until the next
/// top-level header or a horizontal rule. Numbered sub-item lines never end a block.
#[must_use]
pub fn segment(text: &str) -> Vec<RequirementBlock> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let header = match patterns::match_requirement_header(lines[i]) {
            Some(header) if !patterns::is_sub_item_line(lines[i]) => header,
            _ => {
                i += 1;
                continue;
            }
        };
        i += 1;

        if patterns::is_boilerplate(header.name) {
            continue;
        }

        let start = i;
        while i < lines.len() && !ends_block(lines[i]) {
            i += 1;
        }

        blocks.push(RequirementBlock {
            name: header.name.to_string(),
            status_token: header.status_token.to_string(),
            content: lines[start..i].join("\n"),
        });
    }

    blocks
}

/// Split a requirement's content into its numbered sub-sections
///
/// Each sub-section runs from its marker to the next marker (or the end of the
/// content). Text before the first marker belongs to the parent only.
#[must_use]
pub fn segment_subrequirements(content: &str) -> Vec<SubRequirementBlock> {
    let markers = patterns::find_sub_item_markers(content);

    markers
        .iter()
        .enumerate()
        .map(|(idx, marker)| {
            let end = markers.get(idx + 1).map_or(content.len(), |next| next.start);
            let body = &content[marker.end..end.max(marker.end)];
            SubRequirementBlock {
                marker: marker.marker.clone(),
                section_number: marker.section_number.clone(),
                name: section_name(body, &marker.section_number),
                content: body.to_string(),
            }
        })
        .collect()
}

/// Whether a line closes the current requirement block
fn ends_block(line: &str) -> bool {
    patterns::is_section_rule(line) || patterns::is_top_level_header(line)
}

/// First non-empty line of a sub-section, bounded in length
fn section_name(body: &str, section_number: &str) -> String {
    body.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map_or_else(
            || format!("Section {section_number}"),
            |line| line.chars().take(MAX_SECTION_NAME_CHARS).collect(),
        )
}
