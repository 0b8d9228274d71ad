use geo::{Centroid, MultiPolygon, Point};
use serde_json::{Map, Value};

/// One administrative-district polygon that survived the region filter.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryRecord {
    pub admin_name: String,
    pub region_name: String,
    /// Join key, `None` when the admin name does not identify a district.
    pub normalized_key: Option<String>,
    /// Lon/lat shape.
    pub geometry: MultiPolygon<f64>,
    /// Remaining feature properties, untouched.
    pub properties: Map<String, Value>,
}

impl BoundaryRecord {
    /// Lon/lat centroid, `None` for an empty geometry.
    pub fn centroid(&self) -> Option<Point<f64>> {
        self.geometry.centroid()
    }
}
