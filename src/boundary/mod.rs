mod collection;
mod record;

pub use collection::{BoundaryCollection, BoundarySchema};
pub use record::BoundaryRecord;
