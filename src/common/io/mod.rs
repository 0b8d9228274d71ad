mod csv;
mod geojson;
mod source;

pub(crate) use csv::*;
pub(crate) use geojson::*;
pub use source::Source;
pub use csv::TextEncoding;
