mod record;
mod schema;
mod table;

pub use record::DemographicRecord;
pub use schema::{HeaderPattern, TableSchema};
pub use table::DemographicTable;
