use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::{json, Map, Value};

use crate::error::{DongmapError, Result};

/// A GeoJSON feature reduced to what the boundary loader needs.
#[derive(Debug, Clone)]
pub(crate) struct RawFeature {
    pub properties: Map<String, Value>,
    /// `None` when the feature's geometry is `null` or missing.
    pub geometry: Option<MultiPolygon<f64>>,
}

/// Read the features of a GeoJSON `FeatureCollection`.
pub(crate) fn read_features(label: &str, bytes: &[u8]) -> Result<Vec<RawFeature>> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| DongmapError::load(label, format!("[io::geojson] failed to parse GeoJSON: {e}")))?;

    let features = value["features"].as_array()
        .ok_or_else(|| DongmapError::load(label, "[io::geojson] expected a FeatureCollection with a features array"))?;

    features.iter().enumerate()
        .map(|(idx, feature)| {
            let properties = feature["properties"].as_object().cloned().unwrap_or_default();
            let geometry = match &feature["geometry"] {
                Value::Null => None,
                geometry => Some(parse_geometry(geometry)
                    .map_err(|reason| DongmapError::load(label, format!("[io::geojson] feature {idx}: {reason}")))?),
            };
            Ok(RawFeature { properties, geometry })
        })
        .collect()
}

/// Write (geometry, properties) pairs as a GeoJSON `FeatureCollection`.
pub(crate) fn write_features<'a>(
    features: impl IntoIterator<Item = (&'a MultiPolygon<f64>, Map<String, Value>)>,
) -> Result<Vec<u8>> {
    let features: Vec<Value> = features.into_iter().map(|(mp, properties)| {
        let polygons: Vec<Value> = mp.0.iter()
            .map(|polygon| {
                let rings: Vec<Vec<[f64; 2]>> = std::iter::once(polygon.exterior())
                    .chain(polygon.interiors())
                    .map(|ring| ring.coords().map(|c| [c.x, c.y]).collect())
                    .collect();
                json!(rings)
            })
            .collect();

        json!({
            "type": "Feature",
            "geometry": {
                "type": "MultiPolygon",
                "coordinates": polygons
            },
            "properties": properties
        })
    }).collect();

    let feature_collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });

    Ok(serde_json::to_vec(&feature_collection)?)
}

/// Parse a `Polygon` or `MultiPolygon` geometry object.
fn parse_geometry(geometry: &Value) -> std::result::Result<MultiPolygon<f64>, String> {
    let coords = geometry["coordinates"].as_array()
        .ok_or("geometry has no coordinates array")?;

    match geometry["type"].as_str() {
        Some("Polygon") => Ok(MultiPolygon(vec![parse_polygon_coords(coords)?])),
        Some("MultiPolygon") => coords.iter()
            .map(|polygon| polygon.as_array()
                .ok_or_else(|| "MultiPolygon member is not an array".to_string())
                .and_then(|rings| parse_polygon_coords(rings)))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(MultiPolygon),
        Some(other) => Err(format!("unsupported geometry type {other:?}, expected Polygon or MultiPolygon")),
        None => Err("geometry has no type".to_string()),
    }
}

/// Parse polygon rings: the first ring is the exterior, the rest are holes.
fn parse_polygon_coords(rings: &[Value]) -> std::result::Result<Polygon<f64>, String> {
    let mut rings = rings.iter().map(|ring| {
        ring.as_array()
            .ok_or_else(|| "polygon ring is not an array".to_string())
            .and_then(|coords| parse_ring_coords(coords))
    });

    let exterior = rings.next().ok_or("polygon has no exterior ring")??;
    let interiors = rings.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

/// Parse a ring from `[[x, y], [x, y], ...]`.
fn parse_ring_coords(coords: &[Value]) -> std::result::Result<LineString<f64>, String> {
    let mut points = Vec::with_capacity(coords.len());

    for coord_pair in coords {
        let pair = coord_pair.as_array().ok_or("coordinate is not an array")?;
        if pair.len() < 2 {
            return Err("coordinate has fewer than two values".to_string());
        }
        let x = pair[0].as_f64().ok_or("coordinate x must be a number")?;
        let y = pair[1].as_f64().ok_or("coordinate y must be a number")?;
        points.push(Coord { x, y });
    }

    // Ensure ring is closed (first point == last point)
    if !points.is_empty() && points[0] != points[points.len() - 1] {
        points.push(points[0]);
    }

    Ok(LineString(points))
}
