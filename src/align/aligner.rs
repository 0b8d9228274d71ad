use std::collections::{hash_map::Entry, HashMap};

use geo::{MultiPolygon, Point};
use serde_json::{Map, Value};

use crate::boundary::{BoundaryCollection, BoundaryRecord};
use crate::demographic::{DemographicRecord, DemographicTable};
use crate::error::Result;
use crate::geom::{combined_center, Projector};
use crate::names::NameNormalizer;

use super::AlignConfig;

/// A boundary row with its matched population and derived metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRecord {
    pub admin_name: String,
    pub region_name: String,
    pub normalized_key: Option<String>,
    pub geometry: MultiPolygon<f64>,
    pub properties: Map<String, Value>,
    /// `None` when no demographic row matched; distinct from a population of zero.
    pub total_population: Option<f64>,
    pub area_m2: f64,
    /// People per km²; 0 when the area is 0 or the population is absent.
    pub population_density: f64,
}

impl JoinedRecord {
    fn new(boundary: BoundaryRecord, total_population: Option<f64>, area_m2: f64) -> Self {
        Self {
            admin_name: boundary.admin_name,
            region_name: boundary.region_name,
            normalized_key: boundary.normalized_key,
            geometry: boundary.geometry,
            properties: boundary.properties,
            population_density: population_density(total_population, area_m2),
            total_population,
            area_m2,
        }
    }

    /// Short display name: the district key, or the full admin name without one.
    pub fn label(&self) -> &str {
        self.normalized_key.as_deref().unwrap_or(&self.admin_name)
    }

    pub fn is_matched(&self) -> bool { self.total_population.is_some() }

    pub fn area_km2(&self) -> f64 { self.area_m2 / 1_000_000.0 }

    /// Lon/lat centroid, e.g. for label placement.
    pub fn centroid(&self) -> Option<Point<f64>> {
        geo::Centroid::centroid(&self.geometry)
    }
}

/// People per km², guarded against empty areas and unmatched rows.
pub(crate) fn population_density(total_population: Option<f64>, area_m2: f64) -> f64 {
    match total_population {
        Some(population) if area_m2 > 0.0 => population / (area_m2 / 1_000_000.0),
        _ => 0.0,
    }
}

/// How many boundary rows found a population.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentSummary {
    pub total: usize,
    pub matched: usize,
    /// Admin names of the rows left without a population.
    pub unmatched: Vec<String>,
}

impl AlignmentSummary {
    fn from_records(records: &[JoinedRecord]) -> Self {
        let unmatched: Vec<String> = records.iter()
            .filter(|r| !r.is_matched())
            .map(|r| r.admin_name.clone())
            .collect();
        Self { total: records.len(), matched: records.len() - unmatched.len(), unmatched }
    }
}

/// Output of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pub records: Vec<JoinedRecord>,
    pub summary: AlignmentSummary,
}

/// Joins district boundaries to demographic rows and derives area and density.
#[derive(Debug, Clone)]
pub struct Aligner {
    config: AlignConfig,
    normalizer: NameNormalizer,
}

impl Aligner {
    pub fn new(config: AlignConfig) -> Self {
        let normalizer = NameNormalizer::new(config.normalizer.clone());
        Self { config, normalizer }
    }

    pub fn config(&self) -> &AlignConfig { &self.config }

    pub fn normalizer(&self) -> &NameNormalizer { &self.normalizer }

    /// Run the full pipeline: column discovery, region filter, key derivation, join, derive.
    pub fn align(&self, boundaries: &BoundaryCollection, table: &DemographicTable) -> Result<Alignment> {
        let demographics = self.config.table.records(table, &self.normalizer)?;
        let filtered = boundaries.records(&self.config.boundary, &self.config.region, &self.normalizer)?;
        self.join(filtered, &demographics)
    }

    /// Left outer join of boundary rows onto demographic rows by key. Every boundary row
    /// yields exactly one output row, in input order; the first demographic row with a
    /// given key wins.
    pub fn join(&self, boundaries: Vec<BoundaryRecord>, demographics: &[DemographicRecord]) -> Result<Alignment> {
        let mut populations: HashMap<&str, f64> = HashMap::with_capacity(demographics.len());
        let mut duplicates = 0usize;
        for record in demographics {
            let Some(key) = record.normalized_key.as_deref() else { continue };
            match populations.entry(key) {
                Entry::Occupied(_) => duplicates += 1,
                Entry::Vacant(slot) => { slot.insert(record.total_population); }
            }
        }
        if duplicates > 0 {
            log::debug!("[align] {duplicates} demographic rows shadowed by an earlier row with the same key");
        }

        let projector = Projector::new(&self.config.projection, combined_center(boundaries.iter().map(|b| &b.geometry)))?;
        log::debug!("[align] computing areas in {}", projector.definition());

        let records = boundaries.into_iter()
            .map(|boundary| {
                let total_population = boundary.normalized_key.as_deref()
                    .and_then(|key| populations.get(key).copied());
                let area_m2 = projector.area_m2(&boundary.geometry)?;
                Ok(JoinedRecord::new(boundary, total_population, area_m2))
            })
            .collect::<Result<Vec<_>>>()?;

        let summary = AlignmentSummary::from_records(&records);
        if summary.total > 0 && summary.matched == 0 {
            log::warn!("[align] none of {} districts matched a demographic row; check the name columns", summary.total);
        } else {
            log::info!("[align] matched {} / {} districts", summary.matched, summary.total);
        }

        Ok(Alignment { records, summary })
    }
}

/// Align with default configuration and the given region filter.
pub fn align(boundaries: &BoundaryCollection, table: &DemographicTable, region: &str) -> Result<Alignment> {
    Aligner::new(AlignConfig::default().with_region(region)).align(boundaries, table)
}

#[cfg(test)]
mod tests {
    use geo::polygon;

    use super::*;

    fn square(lon: f64, lat: f64, size: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: lon, y: lat),
            (x: lon + size, y: lat),
            (x: lon + size, y: lat + size),
            (x: lon, y: lat + size),
            (x: lon, y: lat),
        ]])
    }

    fn boundary(admin_name: &str, key: Option<&str>, geometry: MultiPolygon<f64>) -> BoundaryRecord {
        BoundaryRecord {
            admin_name: admin_name.to_string(),
            region_name: "Seongnam".to_string(),
            normalized_key: key.map(String::from),
            geometry,
            properties: Map::new(),
        }
    }

    fn demographic(key: Option<&str>, total_population: f64) -> DemographicRecord {
        DemographicRecord {
            raw_district_name: key.unwrap_or("total").to_string(),
            normalized_key: key.map(String::from),
            total_population,
        }
    }

    #[test]
    fn matched_row_gets_population_and_density() {
        let aligner = Aligner::new(AlignConfig::default());
        let out = aligner.join(
            vec![boundary("Gyeonggi Seongnamsi Jungwon-gu Dochon-dong", Some("Dochon-dong"), square(127.13, 37.42, 0.01))],
            &[demographic(Some("Dochon-dong"), 1234.0)],
        ).unwrap();

        let record = &out.records[0];
        assert_eq!(record.total_population, Some(1234.0));
        assert!(record.area_m2 > 900_000.0 && record.area_m2 < 1_100_000.0, "area = {}", record.area_m2);
        assert_eq!(record.population_density, 1234.0 / (record.area_m2 / 1_000_000.0));
        assert_eq!(record.label(), "Dochon-dong");
        assert_eq!(out.summary, AlignmentSummary { total: 1, matched: 1, unmatched: vec![] });
    }

    #[test]
    fn unmatched_row_has_absent_population() {
        let aligner = Aligner::new(AlignConfig::default());
        let out = aligner.join(
            vec![
                boundary("A Sinheung1-dong", Some("Sinheung1-dong"), square(127.14, 37.44, 0.01)),
                boundary("A B", None, square(127.15, 37.44, 0.01)),
            ],
            &[demographic(Some("Dochon-dong"), 1234.0), demographic(None, 99.0)],
        ).unwrap();

        assert!(out.records.iter().all(|r| r.total_population.is_none() && r.population_density == 0.0));
        assert!(out.records.iter().all(|r| r.area_m2 > 0.0));
        assert_eq!(out.summary.matched, 0);
        assert_eq!(out.summary.unmatched, vec!["A Sinheung1-dong", "A B"]);
        assert_eq!(out.records[1].label(), "A B");
    }

    #[test]
    fn cardinality_and_first_match_wins() {
        let aligner = Aligner::new(AlignConfig::default());
        let boundaries = vec![
            boundary("x Dochon-dong", Some("Dochon-dong"), square(127.13, 37.42, 0.01)),
            boundary("y Dochon-dong", Some("Dochon-dong"), square(127.14, 37.42, 0.01)),
            boundary("z Yatap1-dong", Some("Yatap1-dong"), square(127.15, 37.42, 0.01)),
        ];
        let demographics = [
            demographic(Some("Dochon-dong"), 10.0),
            demographic(Some("Dochon-dong"), 20.0),
        ];
        let out = aligner.join(boundaries, &demographics).unwrap();

        assert_eq!(out.records.len(), 3);
        assert_eq!(out.records[0].total_population, Some(10.0));
        assert_eq!(out.records[1].total_population, Some(10.0));
        assert_eq!(out.records[2].total_population, None);
        assert_eq!(out.records[0].admin_name, "x Dochon-dong");
    }

    #[test]
    fn zero_area_means_zero_density() {
        let aligner = Aligner::new(AlignConfig::default());
        let degenerate = MultiPolygon(vec![polygon![
            (x: 127.13, y: 37.42), (x: 127.14, y: 37.42), (x: 127.13, y: 37.42),
        ]]);
        let out = aligner.join(
            vec![boundary("x Dochon-dong", Some("Dochon-dong"), degenerate)],
            &[demographic(Some("Dochon-dong"), 500.0)],
        ).unwrap();

        assert_eq!(out.records[0].area_m2, 0.0);
        assert_eq!(out.records[0].total_population, Some(500.0));
        assert_eq!(out.records[0].population_density, 0.0);
    }

    #[test]
    fn density_guard() {
        assert_eq!(population_density(Some(100.0), 0.0), 0.0);
        assert_eq!(population_density(None, 2_000_000.0), 0.0);
        assert_eq!(population_density(Some(100.0), 2_000_000.0), 50.0);
    }

    #[test]
    fn empty_boundaries_give_empty_alignment() {
        let out = Aligner::new(AlignConfig::default()).join(vec![], &[demographic(Some("a-dong"), 1.0)]).unwrap();
        assert!(out.records.is_empty());
        assert_eq!(out.summary, AlignmentSummary::default());
    }
}
