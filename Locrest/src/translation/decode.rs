//! `.locres` → CSV export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::dedup::DedupIndex;
use super::store::ResourceStore;
use super::{ProgressCallback, TranslationOptions, TranslationPhase, TranslationProgress};
use crate::error::{Error, Result};
use crate::formats::locres::LocresResource;

/// Counts from a decode run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Entries visited in the resource
    pub total_entries: usize,
    /// Data rows written (header excluded)
    pub rows_written: usize,
    /// Entries dropped as duplicates of an earlier row
    pub duplicates_skipped: usize,
}

/// Export a `.locres` file to a translation CSV
///
/// # Errors
/// Returns [`Error::ResourceRead`] if the resource cannot be loaded (the CSV
/// is not created in that case) and [`Error::TableWrite`] if the CSV cannot
/// be created or written.
pub fn decode_file<P: AsRef<Path>, Q: AsRef<Path>>(
    locres_path: P,
    csv_path: Q,
    options: &TranslationOptions,
) -> Result<DecodeSummary> {
    decode_file_with_progress(locres_path, csv_path, options, &|_| {})
}

/// Export a `.locres` file to a translation CSV with progress callback
///
/// # Errors
/// See [`decode_file`].
pub fn decode_file_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    locres_path: P,
    csv_path: Q,
    options: &TranslationOptions,
    progress: ProgressCallback,
) -> Result<DecodeSummary> {
    let locres_path = locres_path.as_ref();
    let csv_path = csv_path.as_ref();

    tracing::info!("Decoding locres→CSV: {:?} → {:?}", locres_path, csv_path);

    progress(&TranslationProgress::new(TranslationPhase::ReadingResource, 0, 1));
    let resource = LocresResource::open(locres_path)?;

    let table_err = |message: String| Error::TableWrite {
        path: csv_path.to_path_buf(),
        message,
    };
    let file = File::create(csv_path).map_err(|e| table_err(e.to_string()))?;

    let summary = decode_to_writer_with_progress(&resource, BufWriter::new(file), options, progress)
        .map_err(|e| match e {
            Error::Csv(err) => table_err(err.to_string()),
            Error::Io(err) => table_err(err.to_string()),
            other => other,
        })?;

    progress(&TranslationProgress::new(
        TranslationPhase::Complete,
        summary.total_entries,
        summary.total_entries,
    ));
    tracing::info!(
        "Exported {} rows ({} duplicates skipped)",
        summary.rows_written,
        summary.duplicates_skipped
    );
    Ok(summary)
}

/// Write the translation CSV for `store` into `writer`
///
/// # Errors
/// Returns [`Error::Csv`] or [`Error::Io`] if writing fails.
pub fn decode_to_writer<S: ResourceStore, W: Write>(
    store: &S,
    writer: W,
    options: &TranslationOptions,
) -> Result<DecodeSummary> {
    decode_to_writer_with_progress(store, writer, options, &|_| {})
}

/// Write the translation CSV for `store` into `writer` with progress callback
///
/// # Errors
/// See [`decode_to_writer`].
pub fn decode_to_writer_with_progress<S: ResourceStore, W: Write>(
    store: &S,
    writer: W,
    options: &TranslationOptions,
    progress: ProgressCallback,
) -> Result<DecodeSummary> {
    let mode = options.mode;
    let transform = options.transform;

    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    csv_writer.write_record(mode.header())?;

    let total = store.entry_count();
    let mut summary = DecodeSummary {
        total_entries: total,
        ..DecodeSummary::default()
    };
    let mut dedup = DedupIndex::new();
    let mut current = 0;
    let mut write_result = Ok(());

    store.for_each_entry(&mut |namespace, key, translation| {
        if write_result.is_err() {
            return;
        }
        current += 1;
        progress(&TranslationProgress::new(TranslationPhase::ExportingRows, current, total));

        let text = transform.prepare_source(translation);
        let matching_key = mode.matching_key(namespace, key, &text);
        if !dedup.observe(&matching_key, &text) {
            summary.duplicates_skipped += 1;
            return;
        }

        let row = mode.encode_row(namespace, key, &text);
        write_result = csv_writer.write_record(row.fields());
        if write_result.is_ok() {
            summary.rows_written += 1;
        }
    });
    write_result?;

    csv_writer.flush()?;
    Ok(summary)
}
