use serde::{Deserialize, Serialize};

use crate::error::{DongmapError, Result};

/// A user-managed point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KidsroomEntry {
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lon: f64,
}

impl KidsroomEntry {
    pub fn new(name: impl Into<String>, address: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self { name: name.into(), address: address.into(), lat, lon }
    }

    /// Fallback display name when only an address is known: its last word.
    pub fn name_from_address(address: &str) -> String {
        address.split_whitespace().last().unwrap_or("키즈룸").to_string()
    }

    /// Fails on NaN or infinite coordinates, which serialize as `null` and make the
    /// whole file unreadable.
    pub(crate) fn check_coordinates(&self, index: usize) -> Result<()> {
        for (field, value) in [("lat", self.lat), ("lon", self.lon)] {
            if !value.is_finite() {
                return Err(DongmapError::Coordinate { index, field, value });
            }
        }
        Ok(())
    }
}

/// Field overwrites for [`KidsroomStore::update`](super::KidsroomStore::update).
/// Coordinates arrive as text; values that do not parse leave the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KidsroomPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
}

impl KidsroomPatch {
    /// Apply to `entry`, returning the names of coordinate fields that were skipped.
    pub(crate) fn apply(&self, entry: &mut KidsroomEntry) -> Vec<&'static str> {
        let mut skipped = Vec::new();
        if let Some(name) = &self.name { entry.name = name.clone(); }
        if let Some(address) = &self.address { entry.address = address.clone(); }

        for (field, text, slot) in [("lat", &self.lat, &mut entry.lat), ("lon", &self.lon, &mut entry.lon)] {
            let Some(text) = text else { continue };
            match text.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => *slot = value,
                _ => skipped.push(field),
            }
        }
        skipped
    }
}
