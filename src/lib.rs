#![doc = "Dongmap public API"]
mod align;
mod boundary;
mod common;
mod demographic;
mod error;
mod geom;
mod kidsroom;
mod names;
mod state;

#[doc(inline)]
pub use align::{align, Aligner, AlignConfig, Alignment, AlignmentSummary, JoinedRecord, Metric, write_geojson};

#[doc(inline)]
pub use boundary::{BoundaryCollection, BoundaryRecord, BoundarySchema};

#[doc(inline)]
pub use common::{Source, TextEncoding};

#[doc(inline)]
pub use demographic::{DemographicRecord, DemographicTable, HeaderPattern, TableSchema};

#[doc(inline)]
pub use error::{DongmapError, Result};

#[doc(inline)]
pub use geom::{AreaProjection, KOREA_2000_UNIFIED};

#[doc(inline)]
pub use kidsroom::{KidsroomEntry, KidsroomPatch, KidsroomStore};

#[doc(inline)]
pub use names::{NameNormalizer, NormalizerConfig};

#[doc(inline)]
pub use state::AppState;
