use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{read_features, RawFeature, Source};
use crate::error::{DongmapError, Result};
use crate::names::NameNormalizer;

use super::BoundaryRecord;

/// Which feature properties carry the admin name and the containing region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundarySchema {
    pub admin_name_property: String,
    /// Falls back to the admin name when a feature lacks it.
    pub region_property: String,
}

impl Default for BoundarySchema {
    fn default() -> Self {
        Self {
            admin_name_property: "adm_nm".to_string(),
            region_property: "sggnm".to_string(),
        }
    }
}

/// A parsed GeoJSON feature collection of district boundaries.
#[derive(Debug, Clone)]
pub struct BoundaryCollection {
    label: String,
    features: Vec<RawFeature>,
}

impl BoundaryCollection {
    pub fn load(source: &Source) -> Result<Self> {
        let label = source.label();
        let bytes = source.read_bytes()?;
        let features = read_features(&label, &bytes)?;

        log::info!("[boundary] loaded {} features from {label}", features.len());
        Ok(Self { label, features })
    }

    pub fn from_bytes(label: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let label = label.into();
        let features = read_features(&label, bytes)?;
        Ok(Self { label, features })
    }

    pub fn label(&self) -> &str { &self.label }

    pub fn len(&self) -> usize { self.features.len() }

    pub fn is_empty(&self) -> bool { self.features.is_empty() }

    /// Features whose region name contains `region` (case-sensitive substring), with keys
    /// derived. Fails if a feature has no admin name or a surviving feature has no geometry.
    pub fn records(&self, schema: &BoundarySchema, region: &str, normalizer: &NameNormalizer) -> Result<Vec<BoundaryRecord>> {
        let mut records = Vec::new();

        for (idx, feature) in self.features.iter().enumerate() {
            let admin_name = feature.properties.get(&schema.admin_name_property).and_then(property_text)
                .ok_or_else(|| DongmapError::schema(
                    &self.label,
                    format!("feature {idx} has no {:?} property", schema.admin_name_property),
                ))?;
            let region_name = feature.properties.get(&schema.region_property).and_then(property_text)
                .unwrap_or_else(|| admin_name.clone());

            if !region_name.contains(region) {
                continue;
            }

            let geometry = feature.geometry.clone().ok_or_else(|| DongmapError::schema(
                &self.label,
                format!("feature {idx} ({admin_name}) has no geometry"),
            ))?;

            let mut properties = feature.properties.clone();
            properties.remove(&schema.admin_name_property);
            properties.remove(&schema.region_property);

            records.push(BoundaryRecord {
                normalized_key: normalizer.normalize_boundary_name(&admin_name),
                admin_name,
                region_name,
                geometry,
                properties,
            });
        }

        log::debug!("[boundary] {} of {} features in region {region:?}", records.len(), self.features.len());
        let keyless = records.iter().filter(|r| r.normalized_key.is_none()).count();
        if keyless > 0 {
            log::warn!("[boundary] {keyless} features in {} have no district key and will stay unmatched", self.label);
        }
        Ok(records)
    }
}

fn property_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
