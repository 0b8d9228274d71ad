//! JSON-file-backed list of kidsroom locations.
//!
//! The file is the source of truth; callers hold a working copy that is reloaded
//! from or flushed to disk on every mutation. There is no cross-process locking:
//! two writers that both load, mutate and save will lose the first writer's change.
//! Compare [`KidsroomStore::content_fingerprint`] before mutating to narrow that window.

use std::{fs, path::{Path, PathBuf}};

use crate::common::{backup_file, sha256_bytes, write_atomic};
use crate::error::{DongmapError, Result};

use super::{KidsroomEntry, KidsroomPatch};

#[derive(Debug, Clone)]
pub struct KidsroomStore {
    path: PathBuf,
    backup_dir: PathBuf,
}

impl KidsroomStore {
    /// Store at `path`, with backups in a `backups` directory next to it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let backup_dir = path.parent().unwrap_or(Path::new(".")).join("backups");
        Self { path, backup_dir }
    }

    pub fn with_backup_dir(mut self, backup_dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = backup_dir.into();
        self
    }

    pub fn path(&self) -> &Path { &self.path }

    pub fn backup_dir(&self) -> &Path { &self.backup_dir }

    /// Read the persisted list. A missing or malformed file yields an empty list.
    pub fn load(&self) -> Vec<KidsroomEntry> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                log::warn!("[kidsroom] cannot read {}: {e}; starting empty", self.path.display());
                return Vec::new();
            }
        };
        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            log::warn!("[kidsroom] {} is not a valid kidsroom list: {e}; starting empty", self.path.display());
            Vec::new()
        })
    }

    /// Overwrite the file with `entries`. The previous content is copied to the backup
    /// directory first; a failed backup is logged and does not block the save.
    /// Entries with a non-finite coordinate are rejected before anything is touched.
    pub fn save(&self, entries: &[KidsroomEntry]) -> Result<()> {
        for (index, entry) in entries.iter().enumerate() {
            entry.check_coordinates(index)?;
        }

        match backup_file(&self.path, &self.backup_dir) {
            Ok(Some(backup)) => log::debug!("[kidsroom] backed up to {}", backup.display()),
            Ok(None) => {}
            Err(e) => log::warn!("{e}"),
        }

        let mut bytes = serde_json::to_vec_pretty(entries)?;
        bytes.push(b'\n');
        write_atomic(&self.path, &bytes)?;

        log::info!("[kidsroom] saved {} entries to {}", entries.len(), self.path.display());
        Ok(())
    }

    /// Append `entry` and persist. On error `entries` is left as it was.
    pub fn add(&self, entries: &mut Vec<KidsroomEntry>, entry: KidsroomEntry) -> Result<()> {
        entries.push(entry);
        if let Err(e) = self.save(entries) {
            entries.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Delete the entry at `index` and persist. Out-of-range indices fail without touching the file.
    pub fn remove(&self, entries: &mut Vec<KidsroomEntry>, index: usize) -> Result<KidsroomEntry> {
        check_index(entries, index)?;
        let mut next = entries.clone();
        let removed = next.remove(index);
        self.save(&next)?;
        *entries = next;
        Ok(removed)
    }

    /// Overwrite the provided fields of the entry at `index` and persist. Coordinates
    /// that fail to parse are skipped; the other fields are still saved.
    pub fn update(&self, entries: &mut [KidsroomEntry], index: usize, patch: &KidsroomPatch) -> Result<()> {
        check_index(entries, index)?;
        let previous = entries[index].clone();
        for field in patch.apply(&mut entries[index]) {
            log::warn!("[kidsroom] ignoring unparsable {field} for entry {index}");
        }
        if let Err(e) = self.save(entries) {
            entries[index] = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Hex SHA-256 of the persisted bytes, `None` when the file cannot be read.
    pub fn content_fingerprint(&self) -> Option<String> {
        fs::read(&self.path).ok().map(|bytes| sha256_bytes(&bytes))
    }
}

fn check_index(entries: &[KidsroomEntry], index: usize) -> Result<()> {
    if index >= entries.len() {
        return Err(DongmapError::Index { index, len: entries.len() });
    }
    Ok(())
}
