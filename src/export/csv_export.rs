use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use crate::core::model::{DocStats, StatValue};
use crate::export::Exporter;

/// Writes one corpus table: a row per document, columns being the sorted
/// union of keys across all records. Missing keys and null values become
/// empty cells.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    out_dir: PathBuf,
}

impl CsvExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }

    fn format_value(value: Option<StatValue>) -> String {
        match value {
            Some(StatValue::Int(v)) => v.to_string(),
            Some(StatValue::Float(v)) => format!("{v}"),
            Some(StatValue::Null) | None => String::new(),
        }
    }
}

impl Exporter for CsvExporter {
    fn export(&self, records: &[DocStats]) -> Result<()> {
        fs::create_dir_all(&self.out_dir)?;

        let columns: BTreeSet<&str> = records.iter().flat_map(DocStats::keys).collect();

        let mut table = String::new();
        table.push_str(&columns.iter().copied().collect::<Vec<_>>().join(","));
        table.push('\n');
        for record in records {
            let row = columns
                .iter()
                .map(|column| Self::format_value(record.get(column)))
                .collect::<Vec<_>>()
                .join(",");
            table.push_str(&row);
            table.push('\n');
        }

        let path = self.out_dir.join("stats.csv");
        fs::write(path, table)?;
        Ok(())
    }
}
