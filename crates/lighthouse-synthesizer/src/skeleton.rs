//! Best-effort check that a generated document follows the PRD skeleton

use lighthouse_domain::InputKind;

/// Section headings every PRD should carry
pub const PRD_SECTIONS: [&str; 4] = [
    "Strategic Overview",
    "Open Questions & Action Items",
    "Non-Functional Requirements",
    "Epic & Work Breakdown Structure",
];

/// Extra section the notes analysis adds
pub const SUGGESTIONS_SECTION: &str = "Strategic Suggestions & Future Enhancements";

/// Sections expected in a document produced from the given input kind
pub fn expected_sections(kind: InputKind) -> Vec<&'static str> {
    let mut sections = PRD_SECTIONS.to_vec();
    if kind == InputKind::Notes {
        sections.push(SUGGESTIONS_SECTION);
    }
    sections
}

/// List the expected sections that do not appear in `document`
///
/// Matching is a case-insensitive search for the heading text anywhere in a
/// Markdown heading line, so numbering and `#` depth do not matter. An empty
/// result means the skeleton looks complete.
pub fn check_skeleton(document: &str, kind: InputKind) -> Vec<&'static str> {
    let headings: Vec<String> = document
        .lines()
        .map(str::trim_start)
        .filter(|line| line.starts_with('#'))
        .map(str::to_lowercase)
        .collect();

    expected_sections(kind)
        .into_iter()
        .filter(|section| {
            let needle = section.to_lowercase();
            !headings.iter().any(|h| h.contains(&needle))
        })
        .collect()
}
