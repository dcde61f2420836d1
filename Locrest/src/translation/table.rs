//! Lookup table built from a translated CSV

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use super::row::ColumnMode;
use super::text::TextTransform;
use crate::error::{Error, Result};

/// Matching key -> replacement translation
///
/// Later rows overwrite earlier ones with the same key.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    entries: HashMap<String, String>,
    /// Records dropped for missing or empty cells
    skipped: usize,
}

impl TranslationTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a translated CSV from disk
    ///
    /// # Errors
    /// Returns [`Error::TableRead`] if the file cannot be opened or is not
    /// valid CSV/UTF-8. Short or empty rows are skipped, not reported.
    pub fn from_path<P: AsRef<Path>>(path: P, mode: ColumnMode, transform: TextTransform) -> Result<Self> {
        let path = path.as_ref();
        let table_err = |message: String| Error::TableRead {
            path: path.to_path_buf(),
            message,
        };

        let file = std::fs::File::open(path).map_err(|e| table_err(e.to_string()))?;
        Self::from_reader(file, mode, transform).map_err(|e| match e {
            Error::Csv(err) => table_err(err.to_string()),
            other => other,
        })
    }

    /// Read translated rows from any reader
    ///
    /// The first record is the header and is ignored. If `transform.escape`
    /// is set, `\n` sequences in the translation cell become line feeds.
    ///
    /// # Errors
    /// Returns [`Error::Csv`] on I/O failure or invalid UTF-8.
    pub fn from_reader<R: Read>(reader: R, mode: ColumnMode, transform: TextTransform) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut table = Self::new();
        for record in csv_reader.records() {
            let record = record?;
            match mode.decode_record(&record) {
                Some((key, translation)) => {
                    let translation = transform.restore_translation(translation);
                    table.insert(key, translation.into_owned());
                }
                None => table.skipped += 1,
            }
        }

        tracing::debug!(
            "Built translation table: {} keys, {} rows skipped",
            table.len(),
            table.skipped
        );
        Ok(table)
    }

    /// Insert a translation, returning the value it replaced
    pub fn insert(&mut self, key: impl Into<String>, translation: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), translation.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of records skipped while reading
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let csv = "Original,Translation\nHello,Bonjour\nHello,Salut\n";
        let table =
            TranslationTable::from_reader(csv.as_bytes(), ColumnMode::Content, TextTransform::default()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("Hello"), Some("Salut"));
    }

    #[test]
    fn test_header_is_skipped() {
        let csv = "Hello,Bonjour\nBye,Salut\n";
        let table =
            TranslationTable::from_reader(csv.as_bytes(), ColumnMode::Content, TextTransform::default()).unwrap();
        assert_eq!(table.get("Hello"), None);
        assert_eq!(table.get("Bye"), Some("Salut"));
    }

    #[test]
    fn test_empty_and_short_rows_skipped() {
        let csv = "Variable,Original,Translation\n\
                   <NS|a>,Hello,\n\
                   ,Hello,Bonjour\n\
                   <NS|b>,Hello\n\
                   <NS|c>,Hello,Hola\n";
        let table =
            TranslationTable::from_reader(csv.as_bytes(), ColumnMode::Variable, TextTransform::default()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("<NS|c>"), Some("Hola"));
        assert_eq!(table.skipped(), 3);
    }

    #[test]
    fn test_unescape_only_when_escaping() {
        let csv = "Original,Translation\nA,Line1\\nLine2\n";

        let escaped =
            TranslationTable::from_reader(csv.as_bytes(), ColumnMode::Content, TextTransform::new(false, true))
                .unwrap();
        assert_eq!(escaped.get("A"), Some("Line1\nLine2"));

        let raw = TranslationTable::from_reader(csv.as_bytes(), ColumnMode::Content, TextTransform::default())
            .unwrap();
        assert_eq!(raw.get("A"), Some("Line1\\nLine2"));
    }

    #[test]
    fn test_quoted_multiline_cell() {
        let csv = "Original,Translation\n\"a\nb\",\"c, \"\"d\"\"\"\n";
        let table =
            TranslationTable::from_reader(csv.as_bytes(), ColumnMode::Content, TextTransform::default()).unwrap();
        assert_eq!(table.get("a\nb"), Some("c, \"d\""));
    }

    #[test]
    fn test_missing_file_is_table_error() {
        let err = TranslationTable::from_path(
            "/definitely/not/here.csv",
            ColumnMode::Content,
            TextTransform::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::TableRead { .. }));
    }
}
