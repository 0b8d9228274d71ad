mod aligner;
mod config;
mod export;
mod metric;

pub use aligner::{align, Aligner, Alignment, AlignmentSummary, JoinedRecord};
pub use config::AlignConfig;
pub use export::write_geojson;
pub use metric::Metric;
