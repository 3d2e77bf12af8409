// src/pipeline/metrics.rs

//! Descriptive metrics over extracted regulation text.
//!
//! All functions here are pure: the same sections always produce the same
//! word count, grade, and checksum, so snapshots from different runs are
//! directly comparable.

use chrono::NaiveDate;
use sha2::{Digest, Sha256};

use crate::models::{ChapterSection, Metrics};

/// Count whitespace-delimited tokens. Empty text yields 0.
pub fn word_count(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}

/// Flesch-Kincaid grade level.
///
/// `0.39 * (words/sentences) + 11.8 * (syllables/words) - 15.59`, where the
/// sentence count is the number of terminal punctuation marks with a floor
/// of 1. Text with zero words yields the sentinel grade 0.0.
pub fn readability_grade(text: &str) -> f64 {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }

    let word_total = words.len() as f64;
    let sentence_total = sentence_count(text) as f64;
    let syllable_total: u64 = words.iter().map(|w| syllables(w)).sum();

    0.39 * (word_total / sentence_total) + 11.8 * (syllable_total as f64 / word_total) - 15.59
}

/// Lowercase hex SHA-256 of the text's UTF-8 bytes.
pub fn checksum(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Join chapter bodies with a single space, in section order.
///
/// Section order is reference order, so the checksum is order-sensitive:
/// reordered chapters change it just like edited text does.
pub fn combined_text(sections: &[ChapterSection]) -> String {
    sections
        .iter()
        .map(|s| s.body.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compute the full metric snapshot for an agency/date.
pub fn compute_metrics(agency: &str, date: NaiveDate, sections: &[ChapterSection]) -> Metrics {
    let text = combined_text(sections);
    Metrics {
        agency: agency.to_string(),
        date,
        word_count: word_count(&text),
        readability: readability_grade(&text),
        checksum: checksum(&text),
    }
}

/// Number of sentence-terminal punctuation marks, floored at 1.
fn sentence_count(text: &str) -> u64 {
    let count = text.chars().filter(|c| matches!(c, '.' | '!' | '?')).count() as u64;
    count.max(1)
}

/// Vowel-group heuristic: maximal runs of vowels, floored at 1 per word.
fn syllables(word: &str) -> u64 {
    let mut runs = 0u64;
    let mut in_run = false;
    for c in word.chars() {
        let is_vowel = matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u');
        if is_vowel && !in_run {
            runs += 1;
        }
        in_run = is_vowel;
    }
    runs.max(1)
}
