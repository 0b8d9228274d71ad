use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::error::{DongmapError, Result};

/// Create the directory if it doesn’t exist; error if a non-directory exists there.
pub(crate) fn ensure_dir_exists(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            return Err(DongmapError::io(path, std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "path exists but is not a directory",
            )));
        }
    } else {
        fs::create_dir_all(path).map_err(|e| DongmapError::io(path, e))?;
    }
    Ok(())
}

/// Write `bytes` next to `target` and rename over it, so readers see either the
/// old content or the new content, never a truncated file.
pub(crate) fn write_atomic(target: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir_exists(dir)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| DongmapError::io(dir, e))?;
    tmp.write_all(bytes).map_err(|e| DongmapError::io(tmp.path(), e))?;
    tmp.as_file().sync_all().ok(); // best-effort fsync file
    tmp.persist(target).map_err(|e| DongmapError::io(target, e.error))?;

    let _ = File::open(dir).and_then(|f| f.sync_all());
    Ok(())
}

/// Copy the current content of `path` into `backup_dir` under a timestamped name.
/// Returns `Ok(None)` when there is nothing to back up.
pub(crate) fn backup_file(path: &Path, backup_dir: &Path) -> Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }
    let failed = |reason: String| DongmapError::Backup { path: path.to_path_buf(), reason };

    fs::create_dir_all(backup_dir).map_err(|e| failed(format!("create {}: {e}", backup_dir.display())))?;

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("backup");
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("json");
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S_%6f");
    let dest = backup_dir.join(format!("{stem}_{stamp}.{ext}"));

    fs::copy(path, &dest).map_err(|e| failed(format!("copy to {}: {e}", dest.display())))?;
    Ok(Some(dest))
}

/// Hex-encoded SHA-256 digest of `bytes`.
pub(crate) fn sha256_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_write_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
        // Only the target remains; the temp file was renamed.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn atomic_write_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/data.json");
        write_atomic(&path, b"[]").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn backup_of_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let out = backup_file(&dir.path().join("absent.json"), &dir.path().join("backups")).unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn backup_copies_content_with_stem_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kidsroom_data.json");
        fs::write(&path, b"[1]").unwrap();

        let dest = backup_file(&path, &dir.path().join("backups")).unwrap().unwrap();
        let name = dest.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("kidsroom_data_") && name.ends_with(".json"));
        assert_eq!(fs::read(dest).unwrap(), b"[1]");
    }

    #[test]
    fn sha256_is_stable() {
        assert_eq!(
            sha256_bytes(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
