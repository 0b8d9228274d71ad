use serde::{Deserialize, Serialize};

use crate::error::{DongmapError, Result};
use crate::names::NameNormalizer;

use super::{record::parse_population, DemographicRecord, DemographicTable};

/// Substrings that must all occur in a header for it to match. ASCII letters
/// compare case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderPattern(pub Vec<String>);

impl HeaderPattern {
    pub fn new<S: Into<String>>(parts: impl IntoIterator<Item = S>) -> Self {
        Self(parts.into_iter().map(Into::into).collect())
    }

    pub fn matches(&self, header: &str) -> bool {
        let header = header.to_ascii_lowercase();
        !self.0.is_empty() && self.0.iter().all(|part| header.contains(&part.to_ascii_lowercase()))
    }
}

/// How to find the district-name and total-population columns of a demographic table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSchema {
    /// Acceptable headers for the district-name column, tried in order.
    pub name_columns: Vec<String>,
    /// Patterns for the total-population column, tried in order. Within a pattern
    /// the leftmost matching header wins.
    pub population_patterns: Vec<HeaderPattern>,
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            name_columns: vec!["행정구역".to_string(), "district".to_string()],
            population_patterns: vec![
                HeaderPattern::new(["총인구", "계_"]),
                HeaderPattern::new(["total", "population"]),
            ],
        }
    }
}

impl TableSchema {
    /// Header of the district-name column.
    pub fn name_column(&self, headers: &[String]) -> Option<String> {
        self.name_columns.iter()
            .find_map(|wanted| headers.iter().find(|h| h.trim() == wanted.trim()))
            .cloned()
    }

    /// Header of the total-population column: first header matching the first pattern
    /// that matches anything.
    pub fn population_column(&self, headers: &[String]) -> Option<String> {
        self.population_patterns.iter()
            .find_map(|pattern| headers.iter().find(|h| pattern.matches(h)))
            .cloned()
    }

    /// Interpret every row of `table` as a [`DemographicRecord`].
    pub fn records(&self, table: &DemographicTable, normalizer: &NameNormalizer) -> Result<Vec<DemographicRecord>> {
        let headers = table.headers();

        let name_column = self.name_column(&headers).ok_or_else(|| DongmapError::schema(
            table.label(),
            format!("no district-name column; expected one of {:?}, found {headers:?}", self.name_columns),
        ))?;
        let population_column = self.population_column(&headers).ok_or_else(|| DongmapError::schema(
            table.label(),
            format!("no total-population column matching {:?}, found {headers:?}", self.population_patterns),
        ))?;
        log::debug!("[demographic] name column {name_column:?}, population column {population_column:?}");

        let names = table.column(&name_column)?;
        let populations = table.column(&population_column)?;

        let records = names.into_iter().zip(populations).enumerate()
            .map(|(row, (name, population))| {
                let raw_district_name = name.unwrap_or_default();
                let cell = population.unwrap_or_default();
                let total_population = parse_population(&cell).ok_or_else(|| DongmapError::load(
                    table.label(),
                    format!("row {}: {population_column:?} value {cell:?} is not a non-negative number", row + 1),
                ))?;

                Ok(DemographicRecord {
                    normalized_key: normalizer.normalize_demographic_name(&raw_district_name),
                    raw_district_name,
                    total_population,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let keyless = records.iter().filter(|r| r.normalized_key.is_none()).count();
        if keyless > 0 {
            log::warn!("[demographic] {keyless} rows in {} have no district key and cannot be joined", table.label());
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn korean_population_header() {
        let schema = TableSchema::default();
        let h = headers(&["행정구역", "2025년10월_계_총인구수", "2025년10월_계_연령구간인구수", "2025년10월_남_총인구수"]);
        assert_eq!(schema.population_column(&h).as_deref(), Some("2025년10월_계_총인구수"));
        assert_eq!(schema.name_column(&h).as_deref(), Some("행정구역"));
    }

    #[test]
    fn male_only_total_does_not_match() {
        let schema = TableSchema::default();
        let h = headers(&["행정구역", "2025년10월_남_총인구수"]);
        assert_eq!(schema.population_column(&h), None);
    }

    #[test]
    fn earlier_pattern_is_authoritative() {
        let schema = TableSchema::default();
        let h = headers(&["Total Population", "2025_계_총인구수"]);
        assert_eq!(schema.population_column(&h).as_deref(), Some("2025_계_총인구수"));
    }

    #[test]
    fn first_matching_header_wins() {
        let schema = TableSchema::default();
        let h = headers(&["A_계_총인구수", "B_계_총인구수"]);
        assert_eq!(schema.population_column(&h).as_deref(), Some("A_계_총인구수"));
    }

    #[test]
    fn records_parse_and_normalize() {
        let table = DemographicTable::from_text(
            "pop.csv",
            "행정구역,2025년10월_계_총인구수\n\
             \"경기도 성남시 중원구  (4113300000)\",\"200,000\"\n\
             \"Gyeonggi Seongnam Jungwon Dochon-dong(4113101000)\",\"1,234\"\n",
        ).unwrap();
        let records = TableSchema::default().records(&table, &NameNormalizer::default()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].normalized_key, None);
        assert_eq!(records[0].total_population, 200_000.0);
        assert_eq!(records[1].normalized_key.as_deref(), Some("Dochon-dong"));
        assert_eq!(records[1].total_population, 1234.0);
    }

    #[test]
    fn missing_population_column_is_schema_error() {
        let table = DemographicTable::from_text("pop.csv", "행정구역,남자\n도촌동,1\n").unwrap();
        let err = TableSchema::default().records(&table, &NameNormalizer::default()).unwrap_err();
        assert!(matches!(err, DongmapError::Schema { ref source_name, .. } if source_name == "pop.csv"));
        assert!(err.to_string().contains("total-population"));
    }

    #[test]
    fn unparsable_population_is_load_error() {
        let table = DemographicTable::from_text("pop.csv", "행정구역,계_총인구수\n도촌동,many\n").unwrap();
        let err = TableSchema::default().records(&table, &NameNormalizer::default()).unwrap_err();
        assert!(matches!(err, DongmapError::Load { .. }));
        assert!(err.to_string().contains("row 1"));
    }
}
