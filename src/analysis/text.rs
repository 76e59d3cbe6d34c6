use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::model::PageDoc;

/// Word-boundary pattern: keeps contractions ("don't") and hyphenations
/// ("well-known") as single tokens while shedding adjacent punctuation.
static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+(?:['’-]\w+)*").unwrap());

/// Extract the ordered word tokens of a document's line text. Lines without
/// text are skipped. The returned list is owned and can be traversed any
/// number of times.
pub fn doc_words(doc: &PageDoc, use_re_word_boundaries: bool) -> Vec<String> {
    let mut words = Vec::new();
    for line in doc.get_lines() {
        let Some(text) = line.text.as_deref() else {
            continue;
        };
        if use_re_word_boundaries {
            words.extend(WORD_RE.find_iter(text).map(|m| m.as_str().to_string()));
        } else {
            words.extend(text.split_whitespace().map(str::to_string));
        }
    }
    words
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WordCatStats {
    pub num_words: usize,
    pub num_stop_words: usize,
    pub num_oversized_words: usize,
    pub mean_word_length: f64,
}

/// Classify words into counted categories. Stopword matching is a
/// case-sensitive exact match against the supplied set; without a set the
/// stopword count is zero. Oversized means strictly longer (in chars) than
/// `max_word_length`. Every occurrence counts, duplicates included.
pub fn word_cat_stats(
    words: &[String],
    stop_words: Option<&HashSet<String>>,
    max_word_length: usize,
) -> WordCatStats {
    let mut stats = WordCatStats {
        num_words: words.len(),
        ..WordCatStats::default()
    };

    let mut total_length = 0usize;
    for word in words {
        let length = word.chars().count();
        total_length += length;
        if length > max_word_length {
            stats.num_oversized_words += 1;
        }
        if stop_words.is_some_and(|set| set.contains(word)) {
            stats.num_stop_words += 1;
        }
    }

    if !words.is_empty() {
        stats.mean_word_length = total_length as f64 / words.len() as f64;
    }
    stats
}
