//! Mapping between resource entries and CSV rows

/// Column layout of the translation CSV
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnMode {
    /// `Original,Translation`; rows match entries by their text
    #[default]
    Content,
    /// `Variable,Original,Translation`; rows match by `<namespace|key>`
    Variable,
}

impl ColumnMode {
    /// Pick the layout from the `--variables` flag
    #[must_use]
    pub fn from_variables(variables: bool) -> Self {
        if variables { Self::Variable } else { Self::Content }
    }

    /// Header record written first and skipped on read
    #[must_use]
    pub fn header(self) -> &'static [&'static str] {
        match self {
            Self::Content => &["Original", "Translation"],
            Self::Variable => &["Variable", "Original", "Translation"],
        }
    }

    /// Key used to match an entry against the table
    ///
    /// `text` must already have gone through the source transforms.
    #[must_use]
    pub fn matching_key(self, namespace: &str, key: &str, text: &str) -> String {
        match self {
            Self::Content => text.to_string(),
            Self::Variable => variable_identity(namespace, key),
        }
    }

    /// Build the row emitted for one entry; the translation cell is blank
    #[must_use]
    pub fn encode_row(self, namespace: &str, key: &str, text: &str) -> Row {
        match self {
            Self::Content => Row {
                variable: None,
                original: text.to_string(),
                translation: String::new(),
            },
            Self::Variable => Row {
                variable: Some(variable_identity(namespace, key)),
                original: text.to_string(),
                translation: String::new(),
            },
        }
    }

    /// Pull `(matching key, translation)` out of a parsed record
    ///
    /// Returns `None` for rows that are too short or whose key or translation
    /// cell is empty. Such rows are skipped, not reported.
    #[must_use]
    pub fn decode_record<'r>(self, record: &'r csv::StringRecord) -> Option<(&'r str, &'r str)> {
        let (key, translation) = match self {
            Self::Content => (record.get(0)?, record.get(1)?),
            Self::Variable => (record.get(0)?, record.get(2)?),
        };
        if key.is_empty() || translation.is_empty() {
            return None;
        }
        Some((key, translation))
    }
}

/// Stable identity of an entry: `<namespace|key>`
#[must_use]
pub fn variable_identity(namespace: &str, key: &str) -> String {
    format!("<{namespace}|{key}>")
}

/// One CSV row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// `<namespace|key>`, present only in variable mode
    pub variable: Option<String>,
    /// Text of the entry at extraction time
    pub original: String,
    /// Filled in by the translator
    pub translation: String,
}

impl Row {
    /// Fields in column order
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(3);
        if let Some(variable) = &self.variable {
            fields.push(variable.as_str());
        }
        fields.push(self.original.as_str());
        fields.push(self.translation.as_str());
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::StringRecord;

    #[test]
    fn test_variable_identity() {
        assert_eq!(variable_identity("Game", "Greeting"), "<Game|Greeting>");
        assert_eq!(variable_identity("", "Key"), "<|Key>");
    }

    #[test]
    fn test_encode_row() {
        let row = ColumnMode::Content.encode_row("NS", "K", "Hello");
        assert_eq!(row.fields(), ["Hello", ""]);

        let row = ColumnMode::Variable.encode_row("NS", "K", "Hello");
        assert_eq!(row.fields(), ["<NS|K>", "Hello", ""]);
    }

    #[test]
    fn test_decode_content_record() {
        let mode = ColumnMode::Content;
        let record = StringRecord::from(vec!["Hello", "Bonjour"]);
        assert_eq!(mode.decode_record(&record), Some(("Hello", "Bonjour")));

        assert_eq!(mode.decode_record(&StringRecord::from(vec!["", "Bonjour"])), None);
        assert_eq!(mode.decode_record(&StringRecord::from(vec!["Hello", ""])), None);
        assert_eq!(mode.decode_record(&StringRecord::from(vec!["Hello"])), None);
    }

    #[test]
    fn test_decode_variable_record() {
        let mode = ColumnMode::Variable;
        let record = StringRecord::from(vec!["<NS|K>", "Hello", "Bonjour"]);
        assert_eq!(mode.decode_record(&record), Some(("<NS|K>", "Bonjour")));

        // Original may be empty, Variable and Translation may not
        let record = StringRecord::from(vec!["<NS|K>", "", "Bonjour"]);
        assert_eq!(mode.decode_record(&record), Some(("<NS|K>", "Bonjour")));
        assert_eq!(mode.decode_record(&StringRecord::from(vec!["<NS|K>", "Hello", ""])), None);
        assert_eq!(mode.decode_record(&StringRecord::from(vec!["", "Hello", "Bonjour"])), None);
        assert_eq!(mode.decode_record(&StringRecord::from(vec!["<NS|K>", "Hello"])), None);
    }

    #[test]
    fn test_matching_key() {
        assert_eq!(ColumnMode::Content.matching_key("NS", "K", "Hi"), "Hi");
        assert_eq!(ColumnMode::Variable.matching_key("NS", "K", "Hi"), "<NS|K>");
    }
}
