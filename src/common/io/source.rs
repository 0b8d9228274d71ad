use std::{borrow::Cow, fs, path::PathBuf};

use crate::error::{DongmapError, Result};

/// Where a loader gets its raw bytes: a file on disk or an in-memory upload.
#[derive(Debug, Clone)]
pub enum Source {
    Path(PathBuf),
    Bytes { label: String, bytes: Vec<u8> },
}

impl Source {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn bytes(label: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes { label: label.into(), bytes: bytes.into() }
    }

    /// Human-readable name used in error messages.
    pub fn label(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Bytes { label, .. } => label.clone(),
        }
    }

    pub fn read_bytes(&self) -> Result<Cow<'_, [u8]>> {
        match self {
            Self::Path(path) => fs::read(path)
                .map(Cow::Owned)
                .map_err(|e| DongmapError::load(self.label(), format!("failed to read file: {e}"))),
            Self::Bytes { bytes, .. } => Ok(Cow::Borrowed(bytes)),
        }
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self { Self::Path(path) }
}

impl From<&std::path::Path> for Source {
    fn from(path: &std::path::Path) -> Self { Self::Path(path.to_path_buf()) }
}
