use std::{fs, path::{Path, PathBuf}};

use anyhow::{Context, Result};
use dongmap::AlignConfig;
use serde::{Deserialize, Serialize};

/// File locations and pipeline settings. Every field is optional in the JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub demographics: PathBuf,
    pub boundaries: PathBuf,
    pub kidsroom_store: PathBuf,
    pub align: AlignConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            demographics: "data/202510_202510_연령별인구현황_월간.csv".into(),
            boundaries: "data/HangJeongDong_ver20250401.geojson".into(),
            kidsroom_store: "data/kidsroom_data.json".into(),
            align: AlignConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Read `path` if given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else { return Ok(Self::default()) };
        let bytes = fs::read(path)
            .with_context(|| format!("[config] Failed to read config file: {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("[config] Failed to parse config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_gives_defaults() {
        let config = DashboardConfig::load(None).unwrap();
        assert_eq!(config.kidsroom_store, PathBuf::from("data/kidsroom_data.json"));
    }

    #[test]
    fn partial_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dongmap.json");
        fs::write(&path, r#"{"boundaries": "b.geojson", "align": {"region": "분당구"}}"#).unwrap();

        let config = DashboardConfig::load(Some(&path)).unwrap();
        assert_eq!(config.boundaries, PathBuf::from("b.geojson"));
        assert_eq!(config.align.region, "분당구");
        assert_eq!(config.demographics, DashboardConfig::default().demographics);
    }

    #[test]
    fn malformed_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{").unwrap();
        let err = DashboardConfig::load(Some(&path)).unwrap_err();
        assert!(format!("{err}").contains("bad.json"));
    }
}
