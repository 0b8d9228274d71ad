//! Delimited-text reading for demographic tables.

use std::io::Cursor;

use polars::{frame::DataFrame, io::SerReader, prelude::CsvReadOptions};

use crate::error::{DongmapError, Result};

/// Text encoding a table was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    /// EUC-KR as extended by Windows code page 949.
    EucKr,
}

/// Decode raw bytes as UTF-8, falling back to EUC-KR/CP949. No other encodings are tried.
pub(crate) fn decode_text(label: &str, bytes: &[u8]) -> Result<(String, TextEncoding)> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok((text.to_owned(), TextEncoding::Utf8));
    }

    log::debug!("[io::csv::read] {label} is not UTF-8, retrying as EUC-KR");
    encoding_rs::EUC_KR
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| (text.into_owned(), TextEncoding::EucKr))
        .ok_or_else(|| DongmapError::load(label, "[io::csv::read] input is neither UTF-8 nor EUC-KR/CP949"))
}

/// Parse decoded CSV text into a DataFrame with every column read as a string.
pub(crate) fn read_csv_text(label: &str, text: &str) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(text.as_bytes()))
        .finish()
        .map_err(|e| DongmapError::load(label, format!("[io::csv::read] failed to parse CSV: {e}")))
}

/// Header names of `df`, in column order.
pub(crate) fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|name| name.to_string()).collect()
}

/// Cells of a string column, `None` for nulls.
pub(crate) fn string_column(label: &str, df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df.column(name)
        .map_err(|e| DongmapError::schema(label, format!("missing column {name:?}: {e}")))?;
    let values = column.str()
        .map_err(|e| DongmapError::schema(label, format!("column {name:?} is not textual: {e}")))?;
    Ok(values.into_iter().map(|cell| cell.map(str::to_owned)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_is_tried_first() {
        let (text, encoding) = decode_text("t", "행정구역,총인구".as_bytes()).unwrap();
        assert_eq!(encoding, TextEncoding::Utf8);
        assert_eq!(text, "행정구역,총인구");
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let (text, _) = decode_text("t", b"\xEF\xBB\xBFa,b").unwrap();
        assert_eq!(text, "a,b");
    }

    #[test]
    fn euc_kr_fallback() {
        let (bytes, _, _) = encoding_rs::EUC_KR.encode("도촌동,1");
        let (text, encoding) = decode_text("t", &bytes).unwrap();
        assert_eq!(encoding, TextEncoding::EucKr);
        assert_eq!(text, "도촌동,1");
    }

    #[test]
    fn undecodable_bytes_are_a_load_error() {
        // 0xFF is invalid as a lead byte in both encodings.
        let err = decode_text("bad.csv", &[0xFF, 0xFF, 0xFF]).unwrap_err();
        assert!(matches!(err, DongmapError::Load { ref source_name, .. } if source_name == "bad.csv"));
    }

    #[test]
    fn all_columns_are_strings() {
        let df = read_csv_text("t", "name,pop\n\"a\",\"1,234\"\nb,5\n").unwrap();
        assert_eq!(column_names(&df), vec!["name", "pop"]);
        let pops = string_column("t", &df, "pop").unwrap();
        assert_eq!(pops, vec![Some("1,234".to_string()), Some("5".to_string())]);
    }
}
