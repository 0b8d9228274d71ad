use std::path::PathBuf;

/// Errors surfaced by the loaders, the aligner and the kidsroom store.
#[derive(Debug, thiserror::Error)]
pub enum DongmapError {
    /// Input could not be read, decoded, or parsed.
    #[error("[load] {source_name}: {reason}")]
    Load { source_name: String, reason: String },

    /// An expected column, property or geometry is missing.
    #[error("[schema] {source_name}: {expectation}")]
    Schema { source_name: String, expectation: String },

    /// A PROJ.4 definition could not be built or applied.
    #[error("[proj] {definition}: {reason}")]
    Projection { definition: String, reason: String },

    /// Positional mutation outside the kidsroom list.
    #[error("[kidsroom] index {index} out of range for {len} entries")]
    Index { index: usize, len: usize },

    /// A kidsroom coordinate that JSON cannot carry (NaN or infinite).
    #[error("[kidsroom] entry {index}: {field} {value} is not a finite coordinate")]
    Coordinate { index: usize, field: &'static str, value: f64 },

    /// Pre-write backup failed. Logged by the store, never returned from `save`.
    #[error("[backup] {}: {reason}", .path.display())]
    Backup { path: PathBuf, reason: String },

    #[error("[io] {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("[json] {0}")]
    Json(#[from] serde_json::Error),
}

impl DongmapError {
    pub(crate) fn load(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::Load { source_name: source_name.into(), reason: reason.to_string() }
    }

    pub(crate) fn schema(source_name: impl Into<String>, expectation: impl Into<String>) -> Self {
        Self::Schema { source_name: source_name.into(), expectation: expectation.into() }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, DongmapError>;
