//! CLI commands wrapping the u4pak archive tool

use std::path::Path;

use anyhow::Context;
use console::style;

use crate::archive::{U4pak, U4pakCommand, U4pakSource};
use crate::cli::CliContext;
use crate::cli::progress::{GLOBE, PACKAGE, print_step, simple_spinner};
use crate::cli::prompt::confirm;

/// Unpack `folder` from `pak` into `outdir`
pub fn unpack(
    ctx: &CliContext,
    pak: &Path,
    folder: &str,
    outdir: &Path,
    yes: bool,
    explicit: Option<&Path>,
) -> anyhow::Result<()> {
    let tool = obtain(ctx, yes, explicit)?;

    let command = U4pakCommand::Unpack {
        pak: pak.to_path_buf(),
        folder: folder.to_string(),
        outdir: outdir.to_path_buf(),
    };
    announce(ctx, &tool, &command);

    let output = tool
        .run(&command)
        .with_context(|| format!("Failed to unpack {}", pak.display()))?;
    if !ctx.quiet && !output.stdout.trim().is_empty() {
        print!("{}", output.stdout);
    }
    if !ctx.quiet {
        println!("{} Unpacked into {}", style("✓").green(), outdir.display());
    }
    Ok(())
}

/// List the files in `pak`, to `output` or stdout
pub fn list(
    ctx: &CliContext,
    pak: &Path,
    output: Option<&Path>,
    yes: bool,
    explicit: Option<&Path>,
) -> anyhow::Result<()> {
    let tool = obtain(ctx, yes, explicit)?;

    let command = U4pakCommand::List { pak: pak.to_path_buf() };
    announce(ctx, &tool, &command);

    let listing = tool
        .run(&command)
        .with_context(|| format!("Failed to list {}", pak.display()))?
        .stdout;

    match output {
        Some(path) => {
            std::fs::write(path, &listing).with_context(|| format!("Failed to write {}", path.display()))?;
            if !ctx.quiet {
                println!("{} Listing saved to {}", style("✓").green(), path.display());
            }
        }
        None => print!("{listing}"),
    }
    Ok(())
}

/// Resolve the executable, asking before a download
///
/// Declining the download is an error so the command exits non-zero.
fn obtain(ctx: &CliContext, yes: bool, explicit: Option<&Path>) -> anyhow::Result<U4pak> {
    let source = ctx.config.u4pak_source(explicit);

    if let U4pakSource::Download { url } = &source {
        approve_download(yes || ctx.config.u4pak.assume_yes, || {
            confirm(&format!("u4pak is required and will be downloaded from {url}. Continue?"))
        })?;

        if !ctx.quiet {
            print_step(1, 2, GLOBE, "Downloading u4pak...");
        }
        let spinner = if ctx.quiet {
            indicatif::ProgressBar::hidden()
        } else {
            simple_spinner("Fetching release")
        };
        let tool = U4pak::locate(&source);
        spinner.finish_and_clear();
        return tool.context("Failed to obtain u4pak");
    }

    U4pak::locate(&source).context("Failed to obtain u4pak")
}

/// Ask unless `assume_yes`; a "no" (or no terminal to ask on) is an error
fn approve_download(assume_yes: bool, ask: impl FnOnce() -> std::io::Result<bool>) -> anyhow::Result<()> {
    if assume_yes || ask()? {
        Ok(())
    } else {
        anyhow::bail!("u4pak download declined (pass --yes to download without asking)")
    }
}

fn announce(ctx: &CliContext, tool: &U4pak, command: &U4pakCommand) {
    if !ctx.quiet {
        print_step(2, 2, PACKAGE, &format!("Running command: {}", command.display(tool.executable())));
    }
}
