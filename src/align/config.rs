use serde::{Deserialize, Serialize};

use crate::boundary::BoundarySchema;
use crate::demographic::TableSchema;
use crate::geom::AreaProjection;
use crate::names::NormalizerConfig;

/// Everything the aligner needs besides the two data sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    /// Boundary rows are kept when their region name contains this.
    pub region: String,
    pub table: TableSchema,
    pub boundary: BoundarySchema,
    pub normalizer: NormalizerConfig,
    pub projection: AreaProjection,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            region: "성남시".to_string(),
            table: TableSchema::default(),
            boundary: BoundarySchema::default(),
            normalizer: NormalizerConfig::default(),
            projection: AreaProjection::default(),
        }
    }
}

impl AlignConfig {
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }
}
