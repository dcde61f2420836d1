//! CLI commands for locres↔CSV conversion

use std::path::Path;
use std::time::Instant;

use anyhow::Context;

use crate::cli::progress::{DISK, DOCUMENT, LOOKING_GLASS, print_done, print_step, translation_bar, update_translation_bar};
use crate::translation::{TranslationOptions, decode_file_with_progress, encode_file_with_progress};

/// Decode a `.locres` file into a translation CSV
pub fn decode(locres: &Path, output: &Path, options: &TranslationOptions, quiet: bool) -> anyhow::Result<()> {
    let started = Instant::now();
    if !quiet {
        print_step(1, 1, LOOKING_GLASS, &format!("Decoding {}", locres.display()));
    }

    let pb = translation_bar(quiet);
    let summary = decode_file_with_progress(locres, output, options, &|update| {
        update_translation_bar(&pb, update);
    })
    .with_context(|| format!("Failed to decode {}", locres.display()))?;
    pb.finish_and_clear();

    if !quiet {
        println!(
            "  {} rows written to {} ({} entries, {} duplicates skipped)",
            summary.rows_written,
            output.display(),
            summary.total_entries,
            summary.duplicates_skipped
        );
        print_done(started.elapsed());
    }
    Ok(())
}

/// Encode a translated CSV back into a `.locres` file
pub fn encode(
    locres: &Path,
    csv: &Path,
    output: &Path,
    options: &TranslationOptions,
    quiet: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();
    if !quiet {
        print_step(1, 2, DOCUMENT, &format!("Reading {}", csv.display()));
    }

    let pb = translation_bar(quiet);
    let summary = encode_file_with_progress(locres, csv, output, options, &|update| {
        update_translation_bar(&pb, update);
    })
    .with_context(|| format!("Failed to encode {}", csv.display()))?;
    pb.finish_and_clear();

    if !quiet {
        print_step(2, 2, DISK, &format!("Wrote {}", output.display()));
        println!(
            "  {}/{} entries updated from {} translations ({} rows skipped)",
            summary.entries_updated, summary.entries_total, summary.table_rows, summary.rows_skipped
        );
        print_done(started.elapsed());
    }
    Ok(())
}
