//! Error types for `Locrest`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `Locrest` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Resource Errors ====================
    /// The input `.locres` file could not be opened or parsed.
    #[error("error reading locres file {path}")]
    ResourceRead {
        /// The resource that failed to load.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: Box<Error>,
    },

    /// The output `.locres` file could not be written.
    #[error("error writing updated locres file {path}")]
    ResourceWrite {
        /// The output path.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: Box<Error>,
    },

    // ==================== LOCRES Format Errors ====================
    /// The `.locres` version byte is not one we know how to read.
    #[error("unsupported locres version: {0} (supported: 0-3)")]
    UnsupportedLocresVersion(u8),

    /// Structurally invalid `.locres` data (bad offset, index, or length).
    #[error("invalid locres data: {0}")]
    InvalidLocres(String),

    /// Unexpected end of file.
    #[error("unexpected end of file")]
    UnexpectedEof,

    // ==================== Table (CSV) Errors ====================
    /// The CSV input could not be opened or read.
    ///
    /// Individual malformed rows are skipped and never produce this error.
    #[error("error reading CSV file {path}: {message}")]
    TableRead {
        /// The CSV path.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },

    /// The CSV output could not be created or written.
    #[error("error writing CSV file {path}: {message}")]
    TableWrite {
        /// The CSV path.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },

    /// CSV encoding or decoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ==================== Archive Tool Errors ====================
    /// The u4pak subprocess exited with a non-zero status.
    #[error("u4pak exited with {status}: {stderr}")]
    ArchiveTool {
        /// Exit status description (code or signal).
        status: String,
        /// Captured standard error.
        stderr: String,
    },

    /// The u4pak executable was not found where expected.
    #[error("u4pak executable not found: {path}")]
    ArchiveToolNotFound {
        /// The expected executable path.
        path: PathBuf,
    },

    /// Downloading the u4pak release failed.
    #[error("failed to download {url}: {message}")]
    Download {
        /// The release URL.
        url: String,
        /// The transport or HTTP error message.
        message: String,
    },

    /// ZIP archive error while unpacking the u4pak release.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // ==================== Configuration Errors ====================
    /// The configuration file exists but could not be read or parsed.
    #[error("invalid config file {path}: {message}")]
    Config {
        /// The config file path.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),
}

impl Error {
    /// Wrap an error as a failure to read the resource at `path`.
    pub(crate) fn resource_read(path: impl Into<PathBuf>, err: Error) -> Self {
        Error::ResourceRead {
            path: path.into(),
            source: Box::new(err),
        }
    }

    /// Wrap an error as a failure to write the resource at `path`.
    pub(crate) fn resource_write(path: impl Into<PathBuf>, err: Error) -> Self {
        Error::ResourceWrite {
            path: path.into(),
            source: Box::new(err),
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Download {
            url: err.url().map(ToString::to_string).unwrap_or_default(),
            message: err.to_string(),
        }
    }
}

/// A specialized Result type for `Locrest` operations.
pub type Result<T> = std::result::Result<T, Error>;
