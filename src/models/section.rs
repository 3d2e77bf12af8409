//! Extracted chapter section data structure.

use serde::{Deserialize, Serialize};

/// Plain text of one chapter, extracted from a cached title document.
///
/// Derived on each request; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChapterSection {
    /// Agency slug this section was extracted for
    pub agency: String,

    /// CFR title number
    pub title: u32,

    /// Chapter label (the `N` attribute, e.g. "I", "XVIII")
    pub chapter: String,

    /// Chapter heading text
    pub heading: String,

    /// Whitespace-normalized body text
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip() {
        let section = ChapterSection {
            agency: "archives-board".to_string(),
            title: 36,
            chapter: "XII".to_string(),
            heading: "Chapter XII - National Archives".to_string(),
            body: "Records shall be preserved.".to_string(),
        };
        let json = serde_json::to_string(&section).unwrap();
        let parsed: ChapterSection = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, section);
    }
}
