use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::geometry::BBox;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDoc {
    pub id: String,
    pub regions: Vec<TextRegion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRegion {
    pub id: String,
    #[serde(default)]
    pub regions: Vec<TextRegion>,
    #[serde(default)]
    pub lines: Vec<TextLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextLine {
    pub id: String,
    pub coords: BBox,
    /// `None` for non-text lines (rules, separators).
    pub text: Option<String>,
}

impl TextLine {
    pub fn width(&self) -> f32 {
        self.coords.width()
    }
}

impl TextRegion {
    fn collect_lines<'a>(&'a self, out: &mut Vec<&'a TextLine>) {
        out.extend(self.lines.iter());
        for region in &self.regions {
            region.collect_lines(out);
        }
    }

    fn count_regions(&self) -> usize {
        1 + self.regions.iter().map(TextRegion::count_regions).sum::<usize>()
    }

    pub fn bbox(&self) -> Option<BBox> {
        let mut lines = Vec::new();
        self.collect_lines(&mut lines);
        let mut boxes = lines.iter().map(|line| line.coords);
        let first = boxes.next()?;
        Some(boxes.fold(first, |acc, b| acc.union(&b)))
    }
}

impl PageDoc {
    /// All descendant lines in document order: a region's own lines first,
    /// then its sub-regions, depth-first. Materialized fresh on every call
    /// so independent consumers can each traverse the document.
    pub fn get_lines(&self) -> Vec<&TextLine> {
        let mut lines = Vec::new();
        for region in &self.regions {
            region.collect_lines(&mut lines);
        }
        lines
    }

    pub fn region_count(&self) -> usize {
        self.regions.iter().map(TextRegion::count_regions).sum()
    }

    pub fn bbox(&self) -> Option<BBox> {
        let mut boxes = self.regions.iter().filter_map(TextRegion::bbox);
        let first = boxes.next()?;
        Some(boxes.fold(first, |acc, b| acc.union(&b)))
    }

    /// Base structural counters. Computed fresh per call; callers extend
    /// their own copy without aliasing a shared record.
    pub fn stats(&self) -> DocStats {
        let lines = self.get_lines();
        let words = lines
            .iter()
            .filter_map(|line| line.text.as_deref())
            .map(|text| text.split_whitespace().count())
            .sum::<usize>();

        let mut stats = DocStats::new();
        stats.insert("text_regions", self.region_count());
        stats.insert("lines", lines.len());
        stats.insert("words", words);
        stats
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum StatValue {
    Int(i64),
    Float(f64),
    Null,
}

impl StatValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            StatValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StatValue::Int(v) => Some(*v as f64),
            StatValue::Float(v) => Some(*v),
            StatValue::Null => None,
        }
    }
}

impl From<i64> for StatValue {
    fn from(value: i64) -> Self {
        StatValue::Int(value)
    }
}

impl From<usize> for StatValue {
    fn from(value: usize) -> Self {
        StatValue::Int(value as i64)
    }
}

impl From<f64> for StatValue {
    fn from(value: f64) -> Self {
        StatValue::Float(value)
    }
}

/// Flat per-document statistics record: counter name to numeric value.
/// BTreeMap keeps key order deterministic for exporters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct DocStats(BTreeMap<String, StatValue>);

impl DocStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StatValue>) -> Option<StatValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<StatValue> {
        self.0.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, StatValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
