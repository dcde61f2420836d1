//! Translation workflow support
//!
//! Export `.locres` text to CSV for translators, apply the translated CSV back.
//!
//! # CSV Format
//!
//! Comma-separated, UTF-8, with a mandatory header row. Two layouts:
//!
//! Content mode (default) matches rows to entries by their current text, so
//! every distinct string is translated once:
//!
//! ```csv
//! Original,Translation
//! Hello world,
//! Goodbye,
//! ```
//!
//! Variable mode (`--variables`) matches by a `<namespace|key>` identity, so
//! identical strings in different places can be translated differently:
//!
//! ```csv
//! Variable,Original,Translation
//! <Game|Greeting>,Hello world,
//! <Menu|Greeting>,Hello world,
//! ```
//!
//! The translation column is empty on export and filled in by the
//! translator. Rows with an empty key or translation are ignored on import,
//! and when a key appears more than once the last row wins.

mod decode;
mod dedup;
mod encode;
mod row;
mod store;
mod table;
pub mod text;

pub use decode::{DecodeSummary, decode_file, decode_file_with_progress, decode_to_writer, decode_to_writer_with_progress};
pub use dedup::DedupIndex;
pub use encode::{EncodeSummary, apply_table, apply_table_with_progress, encode_file, encode_file_with_progress};
pub use row::{ColumnMode, Row, variable_identity};
pub use store::ResourceStore;
pub use table::TranslationTable;
pub use text::{TextTransform, escape_newlines, normalize_newlines, unescape_newlines};

/// Options shared by decode and encode
///
/// Both directions must use the same options for a CSV to line up with the
/// resource it came from.
///
/// # Example
///
/// ```
/// use locrest::translation::{ColumnMode, TranslationOptions};
///
/// let options = TranslationOptions::new()
///     .with_variables(true)
///     .with_normalize_newlines(true)
///     .with_escape_newlines(true);
/// assert_eq!(options.mode, ColumnMode::Variable);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationOptions {
    /// CSV layout and matching strategy
    pub mode: ColumnMode,
    /// Newline handling
    pub transform: TextTransform,
}

impl TranslationOptions {
    /// Content mode, no newline handling
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Match on `<namespace|key>` instead of text
    #[must_use]
    pub fn with_variables(mut self, variables: bool) -> Self {
        self.mode = ColumnMode::from_variables(variables);
        self
    }

    /// Collapse `\r\n` to `\n` in source text
    #[must_use]
    pub fn with_normalize_newlines(mut self, normalize: bool) -> Self {
        self.transform.normalize = normalize;
        self
    }

    /// Escape line feeds as `\n` on export and unescape on import
    #[must_use]
    pub fn with_escape_newlines(mut self, escape: bool) -> Self {
        self.transform.escape = escape;
        self
    }
}

/// Progress information during decode/encode
#[derive(Debug, Clone)]
pub struct TranslationProgress {
    /// Current operation phase
    pub phase: TranslationPhase,
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of items
    pub total: usize,
}

impl TranslationProgress {
    /// Create a new progress update
    #[must_use]
    pub fn new(phase: TranslationPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
        }
    }
}

/// Phase of a decode or encode run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationPhase {
    /// Parsing the `.locres` file
    ReadingResource,
    /// Reading the translated CSV
    ReadingTable,
    /// Writing CSV rows (decode)
    ExportingRows,
    /// Matching entries against the table (encode)
    ApplyingTranslations,
    /// Writing the output file
    WritingOutput,
    /// Operation complete
    Complete,
}

impl TranslationPhase {
    /// Get a human-readable description of this phase
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadingResource => "Reading locres",
            Self::ReadingTable => "Reading CSV",
            Self::ExportingRows => "Exporting translations",
            Self::ApplyingTranslations => "Applying translations",
            Self::WritingOutput => "Writing output",
            Self::Complete => "Complete",
        }
    }
}

/// Progress callback type for decode/encode operations.
pub type ProgressCallback<'a> = &'a dyn Fn(&TranslationProgress);
