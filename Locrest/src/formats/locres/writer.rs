//! `.locres` file writing

use super::{LOCRES_MAGIC, LocresResource};
use crate::error::{Error, Result};
use byteorder::{LittleEndian, WriteBytesExt};
use indexmap::IndexMap;
use std::io::Write;
use std::path::Path;

/// Write a .locres file to disk
///
/// The whole file is serialized in memory first, so a failure never leaves a
/// half-written resource behind.
///
/// # Errors
/// Returns an error if serialization or file writing fails.
pub fn write_locres<P: AsRef<Path>>(path: P, resource: &LocresResource) -> Result<()> {
    let bytes = to_locres_bytes(resource)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Serialize a resource using its own [`LocresVersion`](super::LocresVersion)
///
/// Namespace, key and source hashes are written exactly as read. For versions
/// with a string array, identical translations share one slot.
///
/// # Errors
/// Returns [`Error::InvalidLocres`] if a count does not fit the format.
pub fn to_locres_bytes(resource: &LocresResource) -> Result<Vec<u8>> {
    let version = resource.version;
    let mut out = Vec::new();

    if version.has_magic() {
        out.write_all(&LOCRES_MAGIC)?;
        out.write_u8(version as u8)?;
    }

    // Placeholder for the string array offset, patched once it is known
    let offset_pos = out.len();
    if version.has_string_table() {
        out.write_i64::<LittleEndian>(0)?;
    }

    if version.has_hashes() {
        out.write_u32::<LittleEndian>(count_u32(resource.len())?)?;
    }

    out.write_u32::<LittleEndian>(count_u32(resource.namespaces.len())?)?;

    // Translation -> reference count, in first-use order
    let mut strings: IndexMap<&str, i32> = IndexMap::new();

    for namespace in &resource.namespaces {
        if version.has_hashes() {
            out.write_u32::<LittleEndian>(namespace.hash)?;
        }
        write_fstring(&mut out, &namespace.name)?;
        out.write_u32::<LittleEndian>(count_u32(namespace.entries.len())?)?;

        for entry in &namespace.entries {
            if version.has_hashes() {
                out.write_u32::<LittleEndian>(entry.key_hash)?;
            }
            write_fstring(&mut out, &entry.key)?;
            out.write_u32::<LittleEndian>(entry.source_hash)?;

            if version.has_string_table() {
                let slot = strings.entry(entry.translation.as_str());
                let index = slot.index();
                *slot.or_insert(0) += 1;
                out.write_i32::<LittleEndian>(count_i32(index)?)?;
            } else {
                write_fstring(&mut out, &entry.translation)?;
            }
        }
    }

    if version.has_string_table() {
        let offset = out.len() as i64;
        out[offset_pos..offset_pos + 8].copy_from_slice(&offset.to_le_bytes());

        out.write_u32::<LittleEndian>(count_u32(strings.len())?)?;
        for (text, ref_count) in &strings {
            write_fstring(&mut out, text)?;
            if version.has_hashes() {
                out.write_i32::<LittleEndian>(*ref_count)?;
            }
        }
    }

    tracing::debug!(
        "Serialized {} locres: {} entries, {} bytes",
        version.as_str(),
        resource.len(),
        out.len()
    );

    Ok(out)
}

/// Write a length-prefixed engine string.
///
/// ASCII text is stored narrow; anything else as UTF-16 with a negative
/// length. Empty strings are a bare zero length.
fn write_fstring<W: Write>(writer: &mut W, text: &str) -> Result<()> {
    if text.is_empty() {
        writer.write_i32::<LittleEndian>(0)?;
    } else if text.is_ascii() {
        writer.write_i32::<LittleEndian>(count_i32(text.len() + 1)?)?;
        writer.write_all(text.as_bytes())?;
        writer.write_u8(0)?;
    } else {
        let units: Vec<u16> = text.encode_utf16().collect();
        writer.write_i32::<LittleEndian>(-count_i32(units.len() + 1)?)?;
        for unit in units {
            writer.write_u16::<LittleEndian>(unit)?;
        }
        writer.write_u16::<LittleEndian>(0)?;
    }
    Ok(())
}

fn count_u32(count: usize) -> Result<u32> {
    u32::try_from(count).map_err(|_| Error::InvalidLocres(format!("count {count} exceeds u32")))
}

fn count_i32(count: usize) -> Result<i32> {
    i32::try_from(count).map_err(|_| Error::InvalidLocres(format!("length {count} exceeds i32")))
}
