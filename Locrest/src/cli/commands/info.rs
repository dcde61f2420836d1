//! CLI command summarizing `.locres` files

use std::path::Path;

use anyhow::Context;
use console::style;
use walkdir::WalkDir;

use crate::formats::locres::read_locres;

/// Print version and counts for a file, or every `.locres` under a directory
pub fn execute(path: &Path, quiet: bool) -> anyhow::Result<()> {
    if !path.is_dir() {
        return print_one(path, quiet);
    }

    let mut found = 0usize;
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        let is_locres = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("locres"));
        if entry.file_type().is_file() && is_locres {
            print_one(entry.path(), quiet)?;
            found += 1;
        }
    }

    if found == 0 && !quiet {
        println!("No .locres files found in {}", path.display());
    }
    Ok(())
}

fn print_one(path: &Path, quiet: bool) -> anyhow::Result<()> {
    let resource = read_locres(path).with_context(|| format!("Failed to read {}", path.display()))?;

    if quiet {
        println!("{}\t{}\t{}\t{}", path.display(), resource.version.as_str(), resource.namespaces.len(), resource.len());
        return Ok(());
    }

    println!("{}", style(path.display()).bold());
    println!("  Version:    {}", resource.version.as_str());
    println!("  Namespaces: {}", resource.namespaces.len());
    println!("  Entries:    {}", resource.len());
    Ok(())
}
