pub mod layout;
pub mod stats;
pub mod text;

pub use stats::{compute_doc_stats, StatsConfig};
