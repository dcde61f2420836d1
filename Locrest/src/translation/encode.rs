//! Translated CSV → `.locres` import

use std::borrow::Cow;
use std::path::Path;

use super::row::{ColumnMode, variable_identity};
use super::store::ResourceStore;
use super::table::TranslationTable;
use super::{ProgressCallback, TranslationOptions, TranslationPhase, TranslationProgress};
use crate::error::{Error, Result};
use crate::formats::locres::LocresResource;

/// Counts from an encode run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeSummary {
    /// Distinct keys in the translation table
    pub table_rows: usize,
    /// CSV records ignored for missing or empty cells
    pub rows_skipped: usize,
    /// Entries visited in the resource
    pub entries_total: usize,
    /// Entries whose translation was replaced
    pub entries_updated: usize,
}

/// Apply a translated CSV to a `.locres` file and write the result
///
/// The CSV is read first, then the resource; `output_path` is only touched
/// once both have loaded. Parent directories of `output_path` are created.
///
/// # Errors
/// Returns [`Error::TableRead`], [`Error::ResourceRead`] or
/// [`Error::ResourceWrite`] depending on which step failed.
pub fn encode_file<P: AsRef<Path>, Q: AsRef<Path>, R: AsRef<Path>>(
    locres_path: P,
    csv_path: Q,
    output_path: R,
    options: &TranslationOptions,
) -> Result<EncodeSummary> {
    encode_file_with_progress(locres_path, csv_path, output_path, options, &|_| {})
}

/// Apply a translated CSV to a `.locres` file with progress callback
///
/// # Errors
/// See [`encode_file`].
pub fn encode_file_with_progress<P: AsRef<Path>, Q: AsRef<Path>, R: AsRef<Path>>(
    locres_path: P,
    csv_path: Q,
    output_path: R,
    options: &TranslationOptions,
    progress: ProgressCallback,
) -> Result<EncodeSummary> {
    let locres_path = locres_path.as_ref();
    let csv_path = csv_path.as_ref();
    let output_path = output_path.as_ref();

    tracing::info!(
        "Encoding CSV→locres: {:?} + {:?} → {:?}",
        locres_path,
        csv_path,
        output_path
    );

    progress(&TranslationProgress::new(TranslationPhase::ReadingTable, 0, 1));
    let table = TranslationTable::from_path(csv_path, options.mode, options.transform)?;

    progress(&TranslationProgress::new(TranslationPhase::ReadingResource, 0, 1));
    let mut resource = LocresResource::open(locres_path)?;

    let entries_updated = apply_table_with_progress(&mut resource, &table, options, progress);

    progress(&TranslationProgress::new(TranslationPhase::WritingOutput, 0, 1));
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| Error::resource_write(output_path, e.into()))?;
        }
    }
    resource.save(output_path)?;

    let summary = EncodeSummary {
        table_rows: table.len(),
        rows_skipped: table.skipped(),
        entries_total: resource.entry_count(),
        entries_updated,
    };
    progress(&TranslationProgress::new(
        TranslationPhase::Complete,
        summary.entries_total,
        summary.entries_total,
    ));
    tracing::info!(
        "Updated {} of {} entries from {} translations",
        summary.entries_updated,
        summary.entries_total,
        summary.table_rows
    );
    Ok(summary)
}

/// Replace the translation of every entry whose matching key is in `table`
///
/// Returns the number of entries updated. Entries without a match are left
/// untouched.
pub fn apply_table<S: ResourceStore>(store: &mut S, table: &TranslationTable, options: &TranslationOptions) -> usize {
    apply_table_with_progress(store, table, options, &|_| {})
}

/// Replace matching translations with progress callback
pub fn apply_table_with_progress<S: ResourceStore>(
    store: &mut S,
    table: &TranslationTable,
    options: &TranslationOptions,
    progress: ProgressCallback,
) -> usize {
    let mode = options.mode;
    let transform = options.transform;
    let total = store.entry_count();
    let mut current = 0;
    let mut updated = 0;

    store.for_each_entry_mut(&mut |namespace, key, translation| {
        current += 1;
        progress(&TranslationProgress::new(
            TranslationPhase::ApplyingTranslations,
            current,
            total,
        ));

        // Content keys are derived from the entry as it is now
        let replacement = {
            let matching_key = match mode {
                ColumnMode::Variable => Cow::Owned(variable_identity(namespace, key)),
                ColumnMode::Content => transform.prepare_source(translation),
            };
            table.get(&matching_key).map(str::to_string)
        };

        if let Some(replacement) = replacement {
            *translation = replacement;
            updated += 1;
        }
    });

    tracing::debug!("Applied translations to {updated} of {total} entries");
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::locres::{LocresVersion, Namespace};
    use crate::translation::TextTransform;
    use pretty_assertions::assert_eq;

    fn table_from(csv: &str, options: &TranslationOptions) -> TranslationTable {
        TranslationTable::from_reader(csv.as_bytes(), options.mode, options.transform).unwrap()
    }

    fn resource() -> LocresResource {
        LocresResource::new(LocresVersion::Optimized)
            .with_namespace(Namespace::new("A").with_entry("k1", "Hello").with_entry("k2", "World"))
            .with_namespace(Namespace::new("B").with_entry("k3", "Hello"))
    }

    fn text(resource: &LocresResource, ns: &str, key: &str) -> String {
        resource.get(ns, key).unwrap().translation.clone()
    }

    #[test]
    fn test_content_mode_updates_every_match() {
        let options = TranslationOptions::new();
        let table = table_from("Original,Translation\nHello,Bonjour\n", &options);

        let mut resource = resource();
        assert_eq!(apply_table(&mut resource, &table, &options), 2);
        assert_eq!(text(&resource, "A", "k1"), "Bonjour");
        assert_eq!(text(&resource, "B", "k3"), "Bonjour");
        assert_eq!(text(&resource, "A", "k2"), "World");
    }

    #[test]
    fn test_variable_mode_targets_one_entry() {
        let options = TranslationOptions::new().with_variables(true);
        let table = table_from("Variable,Original,Translation\n<B|k3>,Hello,Hallo\n", &options);

        let mut resource = resource();
        assert_eq!(apply_table(&mut resource, &table, &options), 1);
        assert_eq!(text(&resource, "A", "k1"), "Hello");
        assert_eq!(text(&resource, "B", "k3"), "Hallo");
    }

    #[test]
    fn test_last_write_wins() {
        let options = TranslationOptions::new().with_variables(true);
        let table = table_from(
            "Variable,Original,Translation\n<A|k1>,Hello,First\n<A|k1>,Hello,Second\n",
            &options,
        );
        let mut resource = resource();
        apply_table(&mut resource, &table, &options);
        assert_eq!(text(&resource, "A", "k1"), "Second");
    }

    #[test]
    fn test_empty_translation_is_not_applied() {
        let options = TranslationOptions::new().with_variables(true);
        let table = table_from("Variable,Original,Translation\n<A|k1>,Hello,\n", &options);
        assert!(table.is_empty());

        let mut resource = resource();
        let before = resource.clone();
        assert_eq!(apply_table(&mut resource, &table, &options), 0);
        assert_eq!(resource, before);
    }

    #[test]
    fn test_escaped_newlines_are_restored() {
        let options = TranslationOptions::new().with_escape_newlines(true);
        let table = table_from("Original,Translation\nLine1\\nLine2,Ligne1\\nLigne2\n", &options);

        let mut resource = LocresResource::new(LocresVersion::Compact)
            .with_namespace(Namespace::new("NS").with_entry("k", "Line1\nLine2"));
        assert_eq!(apply_table(&mut resource, &table, &options), 1);
        assert_eq!(text(&resource, "NS", "k"), "Ligne1\nLigne2");
    }

    #[test]
    fn test_normalized_key_matches_crlf_entry() {
        let options = TranslationOptions {
            mode: ColumnMode::Content,
            transform: TextTransform::new(true, true),
        };
        let table = table_from("Original,Translation\nLine1\\nLine2,\"Un\r\nDeux\"\n", &options);

        let mut resource = LocresResource::new(LocresVersion::Compact)
            .with_namespace(Namespace::new("NS").with_entry("k", "Line1\r\nLine2"));
        assert_eq!(apply_table(&mut resource, &table, &options), 1);
        // Stored values are unescaped but never normalized
        assert_eq!(text(&resource, "NS", "k"), "Un\r\nDeux");
    }
}
