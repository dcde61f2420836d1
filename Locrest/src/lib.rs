//! # Locrest
//!
//! Community tooling for translating Unreal Engine games through their
//! `.locres` localization files.
//!
//! ## Workflow
//!
//! 1. Pull the `Localization` folder out of the game's `.pak` with u4pak.
//! 2. **Decode** a `.locres` file into a CSV with an empty translation column.
//! 3. Translate the CSV in any spreadsheet tool.
//! 4. **Encode** the CSV back into a new `.locres` file.
//!
//! ## Quick Start
//!
//! ```no_run
//! use locrest::translation::{TranslationOptions, decode_file, encode_file};
//!
//! let options = TranslationOptions::new()
//!     .with_normalize_newlines(true)
//!     .with_escape_newlines(true);
//!
//! decode_file("Game.locres", "Game.csv", &options)?;
//! // ... translate Game.csv ...
//! encode_file("Game.locres", "Game.csv", "out/Game.locres", &options)?;
//! # Ok::<(), locrest::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `locrest` command-line binary

pub mod archive;
pub mod config;
pub mod error;
pub mod formats;
pub mod translation;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::locres::{Entry, LocresResource, LocresVersion, Namespace, read_locres, write_locres};
    pub use crate::translation::{
        ColumnMode, DecodeSummary, EncodeSummary, ResourceStore, TextTransform, TranslationOptions,
        TranslationTable, decode_file, encode_file,
    };
    pub use crate::archive::{U4pak, U4pakSource};
    pub use crate::config::Config;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
