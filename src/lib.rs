pub mod analysis;
pub mod core;
pub mod export;

pub use crate::analysis::stats::{compute_doc_stats, StatsConfig};
pub use crate::core::model::{DocStats, PageDoc, StatValue, TextLine, TextRegion};
