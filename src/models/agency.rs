//! Agency reference table.
//!
//! Parsed from the eCFR admin API's `agencies.json`. Each agency carries an
//! ordered list of CFR references (title, chapter) naming the regulation
//! text it is responsible for. The table is loaded once at startup into an
//! immutable [`AgencyIndex`] and passed by reference; there is no write path.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// A (title, chapter) reference governed by an agency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CfrReference {
    /// CFR title number (1-50)
    pub title: u32,

    /// Chapter label within the title. `None` covers the whole title.
    #[serde(default)]
    pub chapter: Option<String>,
}

/// A single agency entry from the reference table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agency {
    /// Full agency name
    pub name: String,

    /// Abbreviated name, when the source provides one
    #[serde(default)]
    pub short_name: Option<String>,

    /// Preferred display name
    #[serde(default)]
    pub display_name: Option<String>,

    /// Stable URL-safe identifier
    pub slug: String,

    /// Child agencies (flattened into the index alongside their parent)
    #[serde(default)]
    pub children: Vec<Agency>,

    /// Ordered CFR references this agency governs
    #[serde(default)]
    pub cfr_references: Vec<CfrReference>,
}

impl Agency {
    /// Human-readable label, preferring the display name.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Distinct referenced titles in first-appearance order.
    pub fn titles(&self) -> Vec<u32> {
        let mut seen = HashSet::new();
        self.cfr_references
            .iter()
            .map(|r| r.title)
            .filter(|t| seen.insert(*t))
            .collect()
    }

    /// Which chapters of a title this agency's references select.
    ///
    /// A reference without a chapter label widens the selection to the
    /// whole title.
    pub fn chapter_filter(&self, title: u32) -> ChapterFilter {
        let mut labels = Vec::new();
        let mut seen = HashSet::new();
        for reference in self.cfr_references.iter().filter(|r| r.title == title) {
            match &reference.chapter {
                None => return ChapterFilter::All,
                Some(label) => {
                    if seen.insert(label.clone()) {
                        labels.push(label.clone());
                    }
                }
            }
        }
        ChapterFilter::Labels(labels)
    }
}

/// Chapter selection derived from an agency's references to one title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterFilter {
    /// Every chapter in the title
    All,
    /// Only chapters with these labels, in reference order
    Labels(Vec<String>),
}

/// Summary entry for agency listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgencySummary {
    pub slug: String,
    pub name: String,
}

/// Wire format of the admin API response.
#[derive(Debug, Deserialize)]
struct AgencyFile {
    #[serde(default)]
    agencies: Vec<Agency>,
}

/// Immutable lookup table from agency slug to its CFR references.
#[derive(Debug)]
pub struct AgencyIndex {
    agencies: Vec<Agency>,
    by_slug: HashMap<String, usize>,
}

impl AgencyIndex {
    /// Build the index from raw `agencies.json` bytes.
    ///
    /// Child agencies are flattened into top-level entries so that they
    /// resolve by their own slug. The first entry wins on duplicate slugs.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let file: AgencyFile = serde_json::from_slice(bytes)?;

        let mut agencies = Vec::new();
        let mut stack: Vec<Agency> = file.agencies;
        stack.reverse();
        while let Some(mut agency) = stack.pop() {
            let children = std::mem::take(&mut agency.children);
            agencies.push(agency);
            for child in children.into_iter().rev() {
                stack.push(child);
            }
        }

        let mut by_slug = HashMap::with_capacity(agencies.len());
        for (i, agency) in agencies.iter().enumerate() {
            by_slug.entry(agency.slug.clone()).or_insert(i);
        }

        Ok(Self { agencies, by_slug })
    }

    /// Look up an agency by slug.
    pub fn resolve(&self, slug: &str) -> Result<&Agency> {
        self.by_slug
            .get(slug)
            .map(|&i| &self.agencies[i])
            .ok_or_else(|| AppError::UnknownAgency(slug.to_string()))
    }

    /// All agencies as (slug, name) summaries, sorted by name.
    pub fn list(&self) -> Vec<AgencySummary> {
        let mut summaries: Vec<AgencySummary> = self
            .agencies
            .iter()
            .map(|a| AgencySummary {
                slug: a.slug.clone(),
                name: a.label().to_string(),
            })
            .collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        summaries
    }

    pub fn len(&self) -> usize {
        self.agencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agencies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "agencies": [
            {
                "name": "Department of Testing",
                "short_name": "DOT",
                "display_name": "Department of Testing",
                "slug": "department-of-testing",
                "children": [
                    {
                        "name": "Testing Standards Office",
                        "slug": "testing-standards-office",
                        "cfr_references": [
                            {"title": 40, "chapter": "VI"}
                        ]
                    }
                ],
                "cfr_references": [
                    {"title": 12, "chapter": "I"},
                    {"title": 12, "chapter": "II"},
                    {"title": 40, "chapter": "I"}
                ]
            },
            {
                "name": "Archives Board",
                "slug": "archives-board",
                "cfr_references": [
                    {"title": 36}
                ]
            }
        ]
    }"#;

    fn index() -> AgencyIndex {
        AgencyIndex::from_json(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_resolve_known_agency() {
        let index = index();
        let agency = index.resolve("department-of-testing").unwrap();
        assert_eq!(agency.name, "Department of Testing");
        assert_eq!(agency.titles(), vec![12, 40]);
    }

    #[test]
    fn test_resolve_unknown_agency() {
        let index = index();
        match index.resolve("no-such-agency") {
            Err(AppError::UnknownAgency(slug)) => assert_eq!(slug, "no-such-agency"),
            other => panic!("expected UnknownAgency, got {other:?}"),
        }
    }

    #[test]
    fn test_children_are_flattened() {
        let index = index();
        assert_eq!(index.len(), 3);
        let child = index.resolve("testing-standards-office").unwrap();
        assert_eq!(child.titles(), vec![40]);
    }

    #[test]
    fn test_chapter_filter_labels_in_order() {
        let index = index();
        let agency = index.resolve("department-of-testing").unwrap();
        assert_eq!(
            agency.chapter_filter(12),
            ChapterFilter::Labels(vec!["I".to_string(), "II".to_string()])
        );
        assert_eq!(
            agency.chapter_filter(40),
            ChapterFilter::Labels(vec!["I".to_string()])
        );
    }

    #[test]
    fn test_chapterless_reference_selects_all() {
        let index = index();
        let agency = index.resolve("archives-board").unwrap();
        assert_eq!(agency.chapter_filter(36), ChapterFilter::All);
    }

    #[test]
    fn test_list_sorted_by_name() {
        let index = index();
        let list = index.list();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].name, "Archives Board");
        assert_eq!(list[0].slug, "archives-board");
    }
}
