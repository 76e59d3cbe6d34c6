use std::collections::HashSet;

use anyhow::{ensure, Result};

use crate::analysis::layout::{line_width_stats, validate_boundary_points};
use crate::analysis::text::{doc_words, word_cat_stats};
use crate::core::model::{DocStats, PageDoc, StatValue};

pub const LINE_WIDTH_CAT_PREFIX: &str = "line_width_cat_";

#[derive(Debug, Clone)]
pub struct StatsConfig {
    pub line_width_boundaries: Vec<u32>,
    pub stop_words: Option<HashSet<String>>,
    pub max_word_length: usize,
    pub use_re_word_boundaries: bool,
}

impl StatsConfig {
    pub fn new(line_width_boundaries: Vec<u32>) -> Self {
        Self {
            line_width_boundaries,
            stop_words: None,
            max_word_length: 30,
            use_re_word_boundaries: false,
        }
    }

    pub fn with_stop_words(mut self, stop_words: HashSet<String>) -> Self {
        self.stop_words = Some(stop_words);
        self
    }

    pub fn with_max_word_length(mut self, max_word_length: usize) -> Self {
        self.max_word_length = max_word_length;
        self
    }

    pub fn with_re_word_boundaries(mut self, enabled: bool) -> Self {
        self.use_re_word_boundaries = enabled;
        self
    }
}

/// Compute the aggregate statistics record for one page document: the
/// document's own base counters extended with the sequence number, the
/// word category counts, and one `line_width_cat_<label>` count per
/// configured width category. Pure over its inputs; the document is only
/// read and the returned record is freshly built on every call.
pub fn compute_doc_stats(
    doc: &PageDoc,
    config: &StatsConfig,
    doc_num: Option<u64>,
) -> Result<DocStats> {
    validate_boundary_points(&config.line_width_boundaries)?;

    let lines: Vec<_> = doc
        .get_lines()
        .into_iter()
        .filter(|line| line.text.is_some())
        .collect();

    let words = doc_words(doc, config.use_re_word_boundaries);
    let word_stats = word_cat_stats(&words, config.stop_words.as_ref(), config.max_word_length);
    let width_stats = line_width_stats(&lines, &config.line_width_boundaries)?;

    let mut record = doc.stats();
    let doc_num = doc_num.map_or(StatValue::Null, |n| StatValue::Int(n as i64));
    insert_unique(&mut record, "doc_num".to_string(), doc_num)?;
    insert_unique(&mut record, "num_words".to_string(), word_stats.num_words.into())?;
    insert_unique(
        &mut record,
        "num_stop_words".to_string(),
        word_stats.num_stop_words.into(),
    )?;
    insert_unique(
        &mut record,
        "num_oversized_words".to_string(),
        word_stats.num_oversized_words.into(),
    )?;
    insert_unique(
        &mut record,
        "mean_word_length".to_string(),
        word_stats.mean_word_length.into(),
    )?;
    for category in width_stats {
        insert_unique(
            &mut record,
            format!("{LINE_WIDTH_CAT_PREFIX}{}", category.label),
            StatValue::Int(category.count as i64),
        )?;
    }
    Ok(record)
}

/// Base, word and width key groups must stay disjoint; a collision is an
/// error, not an overwrite.
fn insert_unique(record: &mut DocStats, key: String, value: StatValue) -> Result<()> {
    ensure!(
        !record.contains_key(&key),
        "statistics key '{key}' already present in record"
    );
    record.insert(key, value);
    Ok(())
}
