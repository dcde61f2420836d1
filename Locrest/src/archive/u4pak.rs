//! u4pak subprocess wrapper
//!
//! u4pak is an external tool that reads Unreal `.pak` archives. We never parse
//! the archive ourselves: we obtain the executable (a local path, or the
//! published release zip) and run it with captured output.

use std::ffi::OsString;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use zip::ZipArchive;

use crate::error::{Error, Result};

/// Release archive containing prebuilt u4pak binaries
pub const U4PAK_RELEASE_URL: &str =
    "https://github.com/panzi/rust-u4pak/releases/download/v1.4.0/release-v1.4.0.zip";

/// Directory inside the release zip holding the binary for this platform
#[cfg(windows)]
const RELEASE_TARGET_DIR: &str = "x86_64-pc-windows-gnu";
#[cfg(not(windows))]
const RELEASE_TARGET_DIR: &str = "x86_64-unknown-linux-gnu";

#[cfg(windows)]
const EXECUTABLE_NAME: &str = "u4pak.exe";
#[cfg(not(windows))]
const EXECUTABLE_NAME: &str = "u4pak";

/// Where to get the u4pak executable from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum U4pakSource {
    /// An executable already on disk
    Path(PathBuf),
    /// Download and unpack a release zip
    Download {
        /// Release zip URL
        url: String,
    },
}

impl Default for U4pakSource {
    fn default() -> Self {
        Self::Download {
            url: U4PAK_RELEASE_URL.to_string(),
        }
    }
}

impl U4pakSource {
    /// Whether obtaining the tool needs network access
    #[must_use]
    pub fn needs_download(&self) -> bool {
        matches!(self, Self::Download { .. })
    }
}

/// A u4pak invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum U4pakCommand {
    /// `unpack <pak> <folder> --outdir <outdir>`
    Unpack {
        pak: PathBuf,
        /// Folder inside the pak, e.g. `Game/Content/Localization`
        folder: String,
        outdir: PathBuf,
    },
    /// `list <pak>`
    List { pak: PathBuf },
}

impl U4pakCommand {
    /// Argument list passed to the executable
    #[must_use]
    pub fn args(&self) -> Vec<OsString> {
        match self {
            Self::Unpack {
                pak,
                folder,
                outdir,
            } => vec![
                "unpack".into(),
                pak.into(),
                folder.into(),
                "--outdir".into(),
                outdir.into(),
            ],
            Self::List { pak } => vec!["list".into(), pak.into()],
        }
    }

    /// Human-readable command line for status output
    #[must_use]
    pub fn display(&self, executable: &Path) -> String {
        std::iter::once(executable.as_os_str().to_owned())
            .chain(self.args())
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured output of a successful run
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// A ready-to-run u4pak executable
///
/// When downloaded, the executable lives in a temporary directory that is
/// removed when this value is dropped.
#[derive(Debug)]
pub struct U4pak {
    executable: PathBuf,
    _workdir: Option<TempDir>,
}

impl U4pak {
    /// Obtain the executable from `source`
    ///
    /// # Errors
    /// See [`U4pak::from_path`] and [`U4pak::download`].
    pub fn locate(source: &U4pakSource) -> Result<Self> {
        match source {
            U4pakSource::Path(path) => Self::from_path(path),
            U4pakSource::Download { url } => Self::download(url),
        }
    }

    /// Use an executable already on disk
    ///
    /// # Errors
    /// Returns [`Error::ArchiveToolNotFound`] if `path` is not a file.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let executable = path.into();
        if !executable.is_file() {
            return Err(Error::ArchiveToolNotFound { path: executable });
        }
        Ok(Self {
            executable,
            _workdir: None,
        })
    }

    /// Download the release zip and unpack it into a temporary directory
    ///
    /// # Errors
    /// Returns [`Error::Download`] for network/HTTP failures, [`Error::Zip`]
    /// for a broken archive and [`Error::ArchiveToolNotFound`] if the zip has
    /// no binary for this platform.
    pub fn download(url: &str) -> Result<Self> {
        let workdir = tempfile::tempdir()?;

        tracing::info!("Downloading u4pak from {url}");
        let bytes = reqwest::blocking::get(url)?.error_for_status()?.bytes()?;
        tracing::debug!("Downloaded {} bytes", bytes.len());

        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        archive.extract(workdir.path())?;

        let executable = workdir.path().join(RELEASE_TARGET_DIR).join(EXECUTABLE_NAME);
        if !executable.is_file() {
            return Err(Error::ArchiveToolNotFound { path: executable });
        }
        make_executable(&executable)?;

        Ok(Self {
            executable,
            _workdir: Some(workdir),
        })
    }

    /// Path of the executable
    #[must_use]
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Extract `folder` from `pak` into `outdir`
    ///
    /// # Errors
    /// Returns [`Error::ArchiveTool`] if u4pak exits with a failure status.
    pub fn unpack(&self, pak: &Path, folder: &str, outdir: &Path) -> Result<ToolOutput> {
        self.run(&U4pakCommand::Unpack {
            pak: pak.to_path_buf(),
            folder: folder.to_string(),
            outdir: outdir.to_path_buf(),
        })
    }

    /// List the files in `pak`
    ///
    /// # Errors
    /// Returns [`Error::ArchiveTool`] if u4pak exits with a failure status.
    pub fn list(&self, pak: &Path) -> Result<String> {
        self.run(&U4pakCommand::List {
            pak: pak.to_path_buf(),
        })
        .map(|output| output.stdout)
    }

    /// Run a command with captured output
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the process cannot be spawned and
    /// [`Error::ArchiveTool`] on a non-zero exit.
    pub fn run(&self, command: &U4pakCommand) -> Result<ToolOutput> {
        tracing::info!("Running command: {}", command.display(&self.executable));

        let output = Command::new(&self.executable).args(command.args()).output()?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(Error::ArchiveTool {
                status: output.status.to_string(),
                stderr: stderr.trim_end().to_string(),
            });
        }
        if !stderr.trim().is_empty() {
            tracing::warn!("u4pak reported: {}", stderr.trim_end());
        }

        Ok(ToolOutput { stdout, stderr })
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unpack_args() {
        let command = U4pakCommand::Unpack {
            pak: PathBuf::from("Game.pak"),
            folder: "Game/Content/Localization".to_string(),
            outdir: PathBuf::from("out"),
        };
        let args: Vec<_> = command
            .args()
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            ["unpack", "Game.pak", "Game/Content/Localization", "--outdir", "out"]
        );
        assert_eq!(
            command.display(Path::new("u4pak")),
            "u4pak unpack Game.pak Game/Content/Localization --outdir out"
        );
    }

    #[test]
    fn test_list_args() {
        let command = U4pakCommand::List {
            pak: PathBuf::from("Game.pak"),
        };
        assert_eq!(command.display(Path::new("/bin/u4pak")), "/bin/u4pak list Game.pak");
    }

    #[test]
    fn test_missing_executable() {
        let err = U4pak::from_path("/no/such/u4pak").unwrap_err();
        assert!(matches!(err, Error::ArchiveToolNotFound { .. }));
    }

    #[test]
    fn test_default_source_downloads() {
        assert!(U4pakSource::default().needs_download());
        assert!(!U4pakSource::Path(PathBuf::from("u4pak")).needs_download());
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_archive_tool_error() {
        // `false` ignores its arguments and exits 1
        let Ok(tool) = U4pak::from_path("/bin/false") else {
            return;
        };
        let err = tool.list(Path::new("Game.pak")).unwrap_err();
        assert!(matches!(err, Error::ArchiveTool { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_is_captured() {
        // `echo` prints its arguments, standing in for `u4pak list`
        let Ok(tool) = U4pak::from_path("/bin/echo") else {
            return;
        };
        let listing = tool.list(Path::new("Game.pak")).unwrap();
        assert_eq!(listing.trim_end(), "list Game.pak");
    }
}
