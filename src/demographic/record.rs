/// One district row of the demographic table.
#[derive(Debug, Clone, PartialEq)]
pub struct DemographicRecord {
    pub raw_district_name: String,
    /// Join key, `None` when the name does not identify a district (e.g. city totals).
    pub normalized_key: Option<String>,
    pub total_population: f64,
}

/// Parse a population cell such as `"1,234"`. Thousands separators and surrounding
/// whitespace are ignored.
pub(crate) fn parse_population(cell: &str) -> Option<f64> {
    let cleaned: String = cell.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite() && *value >= 0.0)
}
