use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::JoinedRecord;

/// The value a choropleth colors districts by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    #[default]
    TotalPopulation,
    PopulationDensity,
}

impl Metric {
    /// `None` for districts without a matched population, which render as "N/A".
    pub fn value(self, record: &JoinedRecord) -> Option<f64> {
        match self {
            Self::TotalPopulation => record.total_population,
            Self::PopulationDensity => record.total_population.map(|_| record.population_density),
        }
    }

    /// Min and max over the records that have a value.
    pub fn range(self, records: &[JoinedRecord]) -> Option<(f64, f64)> {
        records.iter()
            .filter_map(|record| self.value(record))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::TotalPopulation => "people",
            Self::PopulationDensity => "people/km²",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TotalPopulation => "population",
            Self::PopulationDensity => "density",
        })
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "population" | "total_population" | "총인구" => Ok(Self::TotalPopulation),
            "density" | "population_density" | "인구밀도" => Ok(Self::PopulationDensity),
            other => Err(format!("unknown metric {other:?}, expected population or density")),
        }
    }
}
