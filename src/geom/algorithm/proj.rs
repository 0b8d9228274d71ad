use geo::{Area, Coord, MapCoords, MultiPolygon};
use proj4rs::{proj::Proj as Proj4, transform::transform};
use serde::{Deserialize, Serialize};

use crate::error::{DongmapError, Result};

/// Korea 2000 / Unified CS (EPSG:5179). Scale error stays under 0.1% across the peninsula.
pub const KOREA_2000_UNIFIED: &str =
    "+proj=tmerc +lat_0=38 +lon_0=127.5 +k=0.9996 +x_0=1000000 +y_0=2000000 +ellps=GRS80 +units=m +no_defs";

/// Source CRS of boundary files: geographic WGS84 (degrees → radians handled in code).
const SOURCE_GEOG_PROJ4: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Metric reference system used for area computation, chosen per deployment region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AreaProjection {
    /// An explicit PROJ.4 definition of a projected (meter-based) CRS.
    Proj4 { definition: String },
    /// UTM zone picked from the center of the data's bounds.
    Utm,
}

impl Default for AreaProjection {
    fn default() -> Self {
        Self::Proj4 { definition: KOREA_2000_UNIFIED.to_string() }
    }
}

impl AreaProjection {
    /// Resolve to a concrete PROJ.4 string. `center` is a lon/lat point inside the data.
    pub fn definition(&self, center: Option<Coord<f64>>) -> String {
        match self {
            Self::Proj4 { definition } => definition.clone(),
            Self::Utm => utm_proj4(center),
        }
    }
}

/// Build PROJ.4 string for the target UTM CRS, chosen from a lon/lat center.
/// WGS84: 326zz (north) / 327zz (south)
fn utm_proj4(center: Option<Coord<f64>>) -> String {
    let center = center.unwrap_or(Coord { x: 127.5, y: 38.0 });

    let zone = (((center.x + 180.0) / 6.0).floor() as i32 + 1).clamp(1, 60) as u32;
    let south = if center.y >= 0.0 { "" } else { " +south" };

    format!("+proj=utm +zone={zone}{south} +datum=WGS84 +units=m +no_defs")
}

/// Reprojects lon/lat shapes into a metric CRS.
pub(crate) struct Projector {
    from: Proj4,
    to: Proj4,
    definition: String,
}

impl Projector {
    pub(crate) fn new(projection: &AreaProjection, center: Option<Coord<f64>>) -> Result<Self> {
        let definition = projection.definition(center);
        let build = |proj_string: &str| Proj4::from_proj_string(proj_string)
            .map_err(|e| DongmapError::Projection { definition: proj_string.to_string(), reason: e.to_string() });

        let from = build(SOURCE_GEOG_PROJ4)?;
        let to = build(&definition)?;
        let geographic = definition.split_whitespace()
            .any(|token| matches!(token, "+proj=longlat" | "+proj=latlong" | "+proj=lonlat" | "+proj=latlon"));
        if geographic {
            return Err(DongmapError::Projection {
                definition,
                reason: "target CRS is geographic; area needs a projected CRS in meters".to_string(),
            });
        }

        Ok(Self { from, to, definition })
    }

    pub(crate) fn definition(&self) -> &str { &self.definition }

    /// Map coords → radians in, meters out.
    pub(crate) fn project(&self, shape: &MultiPolygon<f64>) -> Result<MultiPolygon<f64>> {
        shape.try_map_coords(|coord: Coord<f64>| {
            let mut point = (coord.x.to_radians(), coord.y.to_radians(), 0.0);
            transform(&self.from, &self.to, &mut point)
                .map_err(|e| DongmapError::Projection { definition: self.definition.clone(), reason: e.to_string() })?;
            Ok(Coord { x: point.0, y: point.1 })
        })
    }

    /// Planar area in square meters after projection.
    pub(crate) fn area_m2(&self, shape: &MultiPolygon<f64>) -> Result<f64> {
        Ok(self.project(shape)?.unsigned_area())
    }
}
