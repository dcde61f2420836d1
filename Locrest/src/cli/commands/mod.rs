use clap::{Args, Subcommand};
use std::path::PathBuf;

use super::CliContext;
use crate::config::Config;
use crate::translation::TranslationOptions;

pub mod info;
pub mod translate;
pub mod u4pak;

#[derive(Subcommand)]
pub enum Commands {
    /// Export a .locres file to a CSV ready for translation
    Decode {
        /// Source .locres file
        locres_file: PathBuf,

        /// CSV file to create
        output_csv: PathBuf,

        #[command(flatten)]
        flags: TranslationFlags,
    },

    /// Apply a translated CSV to a .locres file
    Encode {
        /// Source .locres file the CSV was decoded from
        locres_file: PathBuf,

        /// Translated CSV file
        csv_file: PathBuf,

        /// .locres file to write
        output_locres: PathBuf,

        #[command(flatten)]
        flags: TranslationFlags,
    },

    /// Extract a folder from a .pak archive with u4pak
    U4pakUnpack {
        /// Source .pak file
        pak_file: PathBuf,

        /// Folder inside the archive (e.g. "Game/Content/Localization")
        folder: String,

        /// Output directory
        outdir: PathBuf,

        /// Download u4pak without asking
        #[arg(short, long)]
        yes: bool,

        /// Use this u4pak executable instead of downloading a release
        #[arg(long)]
        u4pak: Option<PathBuf>,
    },

    /// List the contents of a .pak archive with u4pak
    U4pakList {
        /// Source .pak file
        pak_file: PathBuf,

        /// Save the listing to a text file instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Download u4pak without asking
        #[arg(short, long)]
        yes: bool,

        /// Use this u4pak executable instead of downloading a release
        #[arg(long)]
        u4pak: Option<PathBuf>,
    },

    /// Show version, namespace and entry counts of .locres files
    Info {
        /// A .locres file, or a directory to scan recursively
        path: PathBuf,
    },
}

/// Decode/encode flags; each `--no-*` switch overrides a config default
///
/// Decode and encode must be run with the same flags.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct TranslationFlags {
    /// Use a Variable column holding each entry's <namespace|key> identity
    #[arg(short, long, overrides_with = "no_variables")]
    variables: bool,

    /// Use the two-column layout even if the config enables variables
    #[arg(long, overrides_with = "variables")]
    no_variables: bool,

    /// Convert CRLF line breaks to LF
    #[arg(short, long, overrides_with = "no_normalize_newlines")]
    normalize_newlines: bool,

    /// Keep CRLF line breaks even if the config enables normalizing
    #[arg(long, overrides_with = "normalize_newlines")]
    no_normalize_newlines: bool,

    /// Write line breaks as literal \n in the CSV (and read them back)
    #[arg(short, long, overrides_with = "no_escape_newlines")]
    escape_newlines: bool,

    /// Keep real line breaks even if the config enables escaping
    #[arg(long, overrides_with = "escape_newlines")]
    no_escape_newlines: bool,
}

impl TranslationFlags {
    /// Resolve against the config defaults
    #[must_use]
    pub fn options(&self, config: &Config) -> TranslationOptions {
        config.translation_options(
            switch(self.variables, self.no_variables),
            switch(self.normalize_newlines, self.no_normalize_newlines),
            switch(self.escape_newlines, self.no_escape_newlines),
        )
    }
}

fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl Commands {
    pub fn execute(&self, ctx: &CliContext) -> anyhow::Result<()> {
        match self {
            Commands::Decode {
                locres_file,
                output_csv,
                flags,
            } => translate::decode(locres_file, output_csv, &flags.options(&ctx.config), ctx.quiet),
            Commands::Encode {
                locres_file,
                csv_file,
                output_locres,
                flags,
            } => translate::encode(
                locres_file,
                csv_file,
                output_locres,
                &flags.options(&ctx.config),
                ctx.quiet,
            ),
            Commands::U4pakUnpack {
                pak_file,
                folder,
                outdir,
                yes,
                u4pak: executable,
            } => u4pak::unpack(ctx, pak_file, folder, outdir, *yes, executable.as_deref()),
            Commands::U4pakList {
                pak_file,
                output,
                yes,
                u4pak: executable,
            } => u4pak::list(ctx, pak_file, output.as_deref(), *yes, executable.as_deref()),
            Commands::Info { path } => info::execute(path, ctx.quiet),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::translation::ColumnMode;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn decode_flags(args: &[&str]) -> TranslationFlags {
        let argv = ["locrest", "decode", "Game.locres", "Game.csv"].iter().chain(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Decode { flags, .. } => flags,
            _ => unreachable!(),
        }
    }

    fn config_with_everything_on() -> Config {
        toml::from_str("[defaults]\nvariables = true\nnormalize_newlines = true\nescape_newlines = true\n").unwrap()
    }

    #[test]
    fn test_no_flags_follow_config() {
        let options = decode_flags(&[]).options(&config_with_everything_on());
        assert_eq!(options.mode, ColumnMode::Variable);
        assert!(options.transform.normalize);
        assert!(options.transform.escape);
    }

    #[test]
    fn test_negating_flags_override_config() {
        let flags = decode_flags(&["--no-variables", "--no-normalize-newlines", "--no-escape-newlines"]);
        let options = flags.options(&config_with_everything_on());
        assert_eq!(options.mode, ColumnMode::Content);
        assert!(!options.transform.normalize);
        assert!(!options.transform.escape);
    }

    #[test]
    fn test_last_switch_wins() {
        let options = decode_flags(&["--no-variables", "-v"]).options(&Config::default());
        assert_eq!(options.mode, ColumnMode::Variable);

        let options = decode_flags(&["-e", "--no-escape-newlines"]).options(&config_with_everything_on());
        assert!(!options.transform.escape);
    }
}
