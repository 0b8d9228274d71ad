use serde_json::json;

use crate::common::write_features;
use crate::error::Result;

use super::JoinedRecord;

/// Serialize joined records as a GeoJSON `FeatureCollection` for a map front end.
/// Unmatched districts carry `null` population.
pub fn write_geojson(records: &[JoinedRecord]) -> Result<Vec<u8>> {
    write_features(records.iter().map(|record| {
        let mut properties = record.properties.clone();
        properties.insert("adm_nm".into(), json!(record.admin_name));
        properties.insert("region".into(), json!(record.region_name));
        properties.insert("key".into(), json!(record.normalized_key));
        properties.insert("label".into(), json!(record.label()));
        properties.insert("total_population".into(), json!(record.total_population));
        properties.insert("area_m2".into(), json!(record.area_m2));
        properties.insert("population_density".into(), json!(record.population_density));
        if let Some(centroid) = record.centroid() {
            properties.insert("centroid".into(), json!([centroid.x(), centroid.y()]));
        }
        (&record.geometry, properties)
    }))
}

#[cfg(test)]
mod tests {
    use geo::{polygon, MultiPolygon};
    use serde_json::{Map, Value};

    use super::*;

    #[test]
    fn unmatched_population_is_null() {
        let record = JoinedRecord {
            admin_name: "경기도 성남시중원구 도촌동".into(),
            region_name: "성남시중원구".into(),
            normalized_key: Some("도촌동".into()),
            geometry: MultiPolygon(vec![polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)]]),
            properties: Map::new(),
            total_population: None,
            area_m2: 10.0,
            population_density: 0.0,
        };
        let bytes = write_geojson(&[record]).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        let props = &value["features"][0]["properties"];

        assert_eq!(props["total_population"], Value::Null);
        assert_eq!(props["label"], "도촌동");
        assert_eq!(props["area_m2"], 10.0);
        assert_eq!(value["features"][0]["geometry"]["type"], "MultiPolygon");
    }
}
