// src/services/extract.rs

//! Chapter text extraction from eCFR title XML.
//!
//! Chapters are `DIV3` elements with `TYPE="CHAPTER"`; the chapter label is
//! the `N` attribute and the heading is the `HEAD` child. Label matching is
//! exact and case-sensitive. References with no matching chapter node are
//! skipped, not an error: a title snapshot may not contain every chapter an
//! agency is nominally linked to.

use roxmltree::{Document, Node};

use crate::error::{AppError, Result};
use crate::models::{ChapterFilter, ChapterSection};

/// Extract the chapter sections selected by `filter` from one title's XML.
///
/// Sections come back in reference order for [`ChapterFilter::Labels`] and
/// in document order for [`ChapterFilter::All`]. Unparseable XML surfaces as
/// [`AppError::MalformedDocument`] for this title only.
pub fn extract_chapters(
    xml: &str,
    agency: &str,
    title: u32,
    filter: &ChapterFilter,
) -> Result<Vec<ChapterSection>> {
    let doc = Document::parse(xml).map_err(|e| AppError::malformed(title, e))?;

    let chapters: Vec<Node> = doc
        .descendants()
        .filter(|n| n.has_tag_name("DIV3") && n.attribute("TYPE") == Some("CHAPTER"))
        .collect();

    let mut sections = Vec::new();
    match filter {
        ChapterFilter::All => {
            for node in &chapters {
                sections.push(section_from_node(*node, agency, title));
            }
        }
        ChapterFilter::Labels(labels) => {
            for label in labels {
                match chapters
                    .iter()
                    .find(|n| n.attribute("N") == Some(label.as_str()))
                {
                    Some(node) => sections.push(section_from_node(*node, agency, title)),
                    None => {
                        log::debug!(
                            "Title {} has no chapter {:?} in this snapshot, skipping",
                            title,
                            label
                        );
                    }
                }
            }
        }
    }

    Ok(sections)
}

fn section_from_node(node: Node, agency: &str, title: u32) -> ChapterSection {
    let label = node.attribute("N").unwrap_or_default().to_string();

    let heading = node
        .children()
        .find(|c| c.has_tag_name("HEAD"))
        .map(|head| collect_text(head))
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| format!("Chapter {}", label));

    ChapterSection {
        agency: agency.to_string(),
        title,
        chapter: label,
        heading,
        body: collect_text(node),
    }
}

/// Concatenate all descendant text nodes, whitespace-normalized.
fn collect_text(node: Node) -> String {
    let mut buf = String::new();
    for descendant in node.descendants() {
        if descendant.is_text() {
            if let Some(text) = descendant.text() {
                buf.push_str(text);
                buf.push(' ');
            }
        }
    }
    normalize_whitespace(&buf)
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TITLE_12: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ECFR>
  <DIV1 N="12" TYPE="TITLE">
    <HEAD>Title 12 - Banks and Banking</HEAD>
    <DIV3 N="I" TYPE="CHAPTER">
      <HEAD>Chapter I - Comptroller of the Currency</HEAD>
      <DIV5 N="A" TYPE="SUBCHAPTER">
        <P>The quick
            brown   fox.</P>
      </DIV5>
    </DIV3>
    <DIV3 N="II" TYPE="CHAPTER">
      <HEAD>Chapter II - Federal Reserve System</HEAD>
      <P>Reserve requirements apply.</P>
    </DIV3>
  </DIV1>
</ECFR>"#;

    fn labels(items: &[&str]) -> ChapterFilter {
        ChapterFilter::Labels(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_extract_single_chapter() {
        let sections = extract_chapters(TITLE_12, "test-agency", 12, &labels(&["I"])).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].chapter, "I");
        assert_eq!(
            sections[0].heading,
            "Chapter I - Comptroller of the Currency"
        );
        assert_eq!(
            sections[0].body,
            "Chapter I - Comptroller of the Currency The quick brown fox."
        );
    }

    #[test]
    fn test_missing_chapter_is_skipped() {
        let sections =
            extract_chapters(TITLE_12, "test-agency", 12, &labels(&["I", "IX"])).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].chapter, "I");
    }

    #[test]
    fn test_label_match_is_case_sensitive() {
        let sections = extract_chapters(TITLE_12, "test-agency", 12, &labels(&["i"])).unwrap();
        assert!(sections.is_empty());
    }

    #[test]
    fn test_sections_follow_reference_order() {
        let sections =
            extract_chapters(TITLE_12, "test-agency", 12, &labels(&["II", "I"])).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].chapter, "II");
        assert_eq!(sections[1].chapter, "I");
    }

    #[test]
    fn test_all_filter_takes_document_order() {
        let sections = extract_chapters(TITLE_12, "test-agency", 12, &ChapterFilter::All).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].chapter, "I");
        assert_eq!(sections[1].chapter, "II");
    }

    #[test]
    fn test_malformed_xml() {
        let result = extract_chapters("<ECFR><DIV3", "test-agency", 12, &ChapterFilter::All);
        match result {
            Err(AppError::MalformedDocument { title, .. }) => assert_eq!(title, 12),
            other => panic!("expected MalformedDocument, got {other:?}"),
        }
    }

    #[test]
    fn test_heading_fallback_without_head_element() {
        let xml = r#"<ECFR><DIV3 N="III" TYPE="CHAPTER"><P>Body only.</P></DIV3></ECFR>"#;
        let sections = extract_chapters(xml, "test-agency", 5, &ChapterFilter::All).unwrap();
        assert_eq!(sections[0].heading, "Chapter III");
        assert_eq!(sections[0].body, "Body only.");
    }

    #[test]
    fn test_whitespace_is_normalized() {
        let xml = "<ECFR><DIV3 N=\"I\" TYPE=\"CHAPTER\"><P>  spaced \t out\n\n text </P></DIV3></ECFR>";
        let sections = extract_chapters(xml, "test-agency", 1, &ChapterFilter::All).unwrap();
        assert_eq!(sections[0].body, "spaced out text");
    }

    #[test]
    fn test_non_chapter_divs_are_ignored() {
        let xml = r#"<ECFR>
            <DIV3 N="I" TYPE="SUBTITLE"><P>Not a chapter.</P></DIV3>
            <DIV3 N="I" TYPE="CHAPTER"><P>A chapter.</P></DIV3>
        </ECFR>"#;
        let sections = extract_chapters(xml, "test-agency", 2, &ChapterFilter::All).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].body, "A chapter.");
    }
}
