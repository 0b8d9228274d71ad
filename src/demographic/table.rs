use std::fmt;

use polars::frame::DataFrame;

use crate::common::{column_names, decode_text, read_csv_text, string_column, Source, TextEncoding};
use crate::error::Result;

/// A decoded demographic table: header row plus string cells, nothing interpreted yet.
#[derive(Clone)]
pub struct DemographicTable {
    label: String,
    encoding: TextEncoding,
    df: DataFrame,
}

impl fmt::Debug for DemographicTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DemographicTable")
            .field("label", &self.label)
            .field("encoding", &self.encoding)
            .field("shape", &self.df.shape())
            .finish()
    }
}

impl DemographicTable {
    /// Read and decode a delimited table, UTF-8 first and EUC-KR/CP949 second.
    pub fn load(source: &Source) -> Result<Self> {
        let label = source.label();
        let bytes = source.read_bytes()?;
        let (text, encoding) = decode_text(&label, &bytes)?;
        let df = read_csv_text(&label, &text)?;

        log::info!("[demographic] loaded {} rows x {} columns from {label} ({encoding:?})", df.height(), df.width());
        Ok(Self { label, encoding, df })
    }

    /// Parse CSV text that is already decoded.
    pub fn from_text(label: impl Into<String>, text: &str) -> Result<Self> {
        let label = label.into();
        let df = read_csv_text(&label, text)?;
        Ok(Self { label, encoding: TextEncoding::Utf8, df })
    }

    pub fn label(&self) -> &str { &self.label }

    pub fn encoding(&self) -> TextEncoding { self.encoding }

    pub fn len(&self) -> usize { self.df.height() }

    pub fn is_empty(&self) -> bool { self.df.height() == 0 }

    pub fn headers(&self) -> Vec<String> { column_names(&self.df) }

    /// Cells of the named column, `None` for empty cells.
    pub fn column(&self, name: &str) -> Result<Vec<Option<String>>> {
        string_column(&self.label, &self.df, name)
    }
}
