//! `.locres` file reading and parsing

use super::{Entry, LOCRES_MAGIC, LocresResource, LocresVersion, Namespace};
use crate::error::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use std::cmp::Ordering;
use std::io::{Cursor, ErrorKind, Read};
use std::path::Path;

/// Upper bound for preallocation driven by counts read from the file
const MAX_PREALLOC: usize = 4096;

/// String array offset written when the file has no string array
const INDEX_NONE: i64 = -1;

/// Read a .locres file from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read.
/// Returns [`Error::UnsupportedLocresVersion`] or [`Error::InvalidLocres`] if
/// the contents are not a readable `.locres` file.
///
/// [`Error::Io`]: crate::Error::Io
/// [`Error::UnsupportedLocresVersion`]: crate::Error::UnsupportedLocresVersion
/// [`Error::InvalidLocres`]: crate::Error::InvalidLocres
pub fn read_locres<P: AsRef<Path>>(path: P) -> Result<LocresResource> {
    let buffer = std::fs::read(path)?;
    parse_locres_bytes(&buffer)
}

/// Parse .locres data from bytes
///
/// # Errors
///
/// Returns [`Error::UnsupportedLocresVersion`] for an unknown version byte,
/// [`Error::InvalidLocres`] for out-of-range offsets or string indices, and
/// [`Error::UnexpectedEof`] for truncated data.
///
/// [`Error::UnsupportedLocresVersion`]: crate::Error::UnsupportedLocresVersion
/// [`Error::InvalidLocres`]: crate::Error::InvalidLocres
/// [`Error::UnexpectedEof`]: crate::Error::UnexpectedEof
pub fn parse_locres_bytes(data: &[u8]) -> Result<LocresResource> {
    parse_resource(data).map_err(|e| match e {
        Error::Io(io) if io.kind() == ErrorKind::UnexpectedEof => Error::UnexpectedEof,
        other => other,
    })
}

fn parse_resource(data: &[u8]) -> Result<LocresResource> {
    let mut cursor = Cursor::new(data);

    let version = if data.len() > LOCRES_MAGIC.len() && data[..LOCRES_MAGIC.len()] == LOCRES_MAGIC {
        cursor.set_position(LOCRES_MAGIC.len() as u64);
        let raw = cursor.read_u8()?;
        LocresVersion::from_u8(raw).ok_or(Error::UnsupportedLocresVersion(raw))?
    } else {
        LocresVersion::Legacy
    };

    // The string array sits at the end of the file; read it up front so entries
    // can resolve their indices as they are parsed.
    let strings = if version.has_string_table() {
        let offset = cursor.read_i64::<LittleEndian>()?;
        let resume = cursor.position();
        let strings = read_string_array_at(&mut cursor, offset, version)?;
        cursor.set_position(resume);
        strings
    } else {
        Vec::new()
    };

    if version.has_hashes() {
        // Total entry count, informational only
        let _entry_count = cursor.read_u32::<LittleEndian>()?;
    }

    let namespace_count = cursor.read_u32::<LittleEndian>()? as usize;
    let mut namespaces = Vec::with_capacity(namespace_count.min(MAX_PREALLOC));

    for _ in 0..namespace_count {
        let hash = if version.has_hashes() {
            cursor.read_u32::<LittleEndian>()?
        } else {
            0
        };
        let name = read_fstring(&mut cursor)?;

        let key_count = cursor.read_u32::<LittleEndian>()? as usize;
        let mut entries = Vec::with_capacity(key_count.min(MAX_PREALLOC));

        for _ in 0..key_count {
            let key_hash = if version.has_hashes() {
                cursor.read_u32::<LittleEndian>()?
            } else {
                0
            };
            let key = read_fstring(&mut cursor)?;
            let source_hash = cursor.read_u32::<LittleEndian>()?;

            let translation = if version.has_string_table() {
                let index = cursor.read_i32::<LittleEndian>()?;
                usize::try_from(index)
                    .ok()
                    .and_then(|i| strings.get(i))
                    .cloned()
                    .ok_or_else(|| {
                        Error::InvalidLocres(format!(
                            "string index {index} out of range ({} strings) for key '{key}'",
                            strings.len()
                        ))
                    })?
            } else {
                read_fstring(&mut cursor)?
            };

            entries.push(Entry {
                key,
                key_hash,
                source_hash,
                translation,
            });
        }

        namespaces.push(Namespace {
            name,
            hash,
            entries,
        });
    }

    tracing::debug!(
        "Parsed {} locres: {} namespaces, {} strings",
        version.as_str(),
        namespaces.len(),
        strings.len()
    );

    Ok(LocresResource {
        version,
        namespaces,
    })
}

/// Read the string array stored at `offset`; `INDEX_NONE` means there is none
fn read_string_array_at(cursor: &mut Cursor<&[u8]>, offset: i64, version: LocresVersion) -> Result<Vec<String>> {
    if offset == INDEX_NONE {
        return Ok(Vec::new());
    }
    let position = u64::try_from(offset)
        .ok()
        .filter(|&o| o < cursor.get_ref().len() as u64)
        .ok_or_else(|| Error::InvalidLocres(format!("string array offset {offset} out of range")))?;

    cursor.set_position(position);
    read_string_array(cursor, version)
}

fn read_string_array(cursor: &mut Cursor<&[u8]>, version: LocresVersion) -> Result<Vec<String>> {
    let count = cursor.read_u32::<LittleEndian>()? as usize;
    let mut strings = Vec::with_capacity(count.min(MAX_PREALLOC));

    for _ in 0..count {
        strings.push(read_fstring(cursor)?);
        if version.has_hashes() {
            let _ref_count = cursor.read_i32::<LittleEndian>()?;
        }
    }

    Ok(strings)
}

/// Read a length-prefixed engine string.
///
/// Positive lengths are Latin-1 bytes, negative lengths are UTF-16 code
/// units; both include the trailing NUL.
fn read_fstring(cursor: &mut Cursor<&[u8]>) -> Result<String> {
    let len = cursor.read_i32::<LittleEndian>()?;
    let remaining = (cursor.get_ref().len() as u64).saturating_sub(cursor.position());

    match len.cmp(&0) {
        Ordering::Equal => Ok(String::new()),
        Ordering::Greater => {
            let len = len as usize;
            if len as u64 > remaining {
                return Err(Error::UnexpectedEof);
            }
            let mut bytes = vec![0u8; len];
            cursor.read_exact(&mut bytes)?;
            if bytes.last() == Some(&0) {
                bytes.pop();
            }
            Ok(bytes.into_iter().map(char::from).collect())
        }
        Ordering::Less => {
            let units = len.unsigned_abs() as usize;
            if (units as u64) * 2 > remaining {
                return Err(Error::UnexpectedEof);
            }
            let mut buf = vec![0u16; units];
            cursor.read_u16_into::<LittleEndian>(&mut buf)?;
            if buf.last() == Some(&0) {
                buf.pop();
            }
            Ok(String::from_utf16_lossy(&buf))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_narrow_fstring() {
        let data = [4u8, 0, 0, 0, b'a', b'b', b'c', 0];
        let mut cursor = Cursor::new(&data[..]);
        assert_eq!(read_fstring(&mut cursor).unwrap(), "abc");
    }

    #[test]
    fn test_read_latin1_fstring() {
        // "café" as Latin-1
        let data = [5u8, 0, 0, 0, b'c', b'a', b'f', 0xE9, 0];
        let mut cursor = Cursor::new(&data[..]);
        assert_eq!(read_fstring(&mut cursor).unwrap(), "café");
    }

    #[test]
    fn test_read_wide_fstring() {
        // -3 => two UTF-16 units plus NUL
        let data = [0xFDu8, 0xFF, 0xFF, 0xFF, 0x2B, 0x52, 0x0A, 0x00, 0, 0];
        let mut cursor = Cursor::new(&data[..]);
        assert_eq!(read_fstring(&mut cursor).unwrap(), "别\n");
    }

    #[test]
    fn test_read_truncated_fstring() {
        let data = [10u8, 0, 0, 0, b'a'];
        let mut cursor = Cursor::new(&data[..]);
        assert!(matches!(read_fstring(&mut cursor), Err(Error::UnexpectedEof)));
    }

    #[test]
    fn test_unsupported_version() {
        let mut data = LOCRES_MAGIC.to_vec();
        data.push(9);
        assert!(matches!(
            parse_locres_bytes(&data),
            Err(Error::UnsupportedLocresVersion(9))
        ));
    }

    #[test]
    fn test_bad_string_offset() {
        let mut data = LOCRES_MAGIC.to_vec();
        data.push(1);
        data.extend_from_slice(&1000i64.to_le_bytes());
        assert!(matches!(parse_locres_bytes(&data), Err(Error::InvalidLocres(_))));
    }

    #[test]
    fn test_missing_string_array() {
        let mut data = LOCRES_MAGIC.to_vec();
        data.push(1);
        data.extend_from_slice(&(-1i64).to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes()); // namespaces

        let resource = parse_locres_bytes(&data).unwrap();
        assert_eq!(resource.version, LocresVersion::Compact);
        assert!(resource.is_empty());
    }

    #[test]
    fn test_truncated_counts_are_eof() {
        // Namespace count cut short
        let mut data = LOCRES_MAGIC.to_vec();
        data.push(1);
        data.extend_from_slice(&(-1i64).to_le_bytes());
        data.extend_from_slice(&[1, 0]);
        assert!(matches!(parse_locres_bytes(&data), Err(Error::UnexpectedEof)));

        // Source hash cut short in a legacy file
        let mut data = Vec::new();
        data.extend_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&0i32.to_le_bytes());
        data.extend_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&2i32.to_le_bytes());
        data.extend_from_slice(b"K\0");
        data.extend_from_slice(&[0xEF, 0xBE]);
        assert!(matches!(parse_locres_bytes(&data), Err(Error::UnexpectedEof)));
    }

    #[test]
    fn test_read_legacy() {
        let mut data = Vec::new();
        data.extend_from_slice(&1u32.to_le_bytes()); // namespaces
        data.extend_from_slice(&3i32.to_le_bytes());
        data.extend_from_slice(b"NS\0");
        data.extend_from_slice(&1u32.to_le_bytes()); // keys
        data.extend_from_slice(&2i32.to_le_bytes());
        data.extend_from_slice(b"K\0");
        data.extend_from_slice(&0xDEAD_BEEFu32.to_le_bytes());
        data.extend_from_slice(&6i32.to_le_bytes());
        data.extend_from_slice(b"Hello\0");

        let resource = parse_locres_bytes(&data).unwrap();
        assert_eq!(resource.version, LocresVersion::Legacy);
        let entry = resource.get("NS", "K").unwrap();
        assert_eq!(entry.translation, "Hello");
        assert_eq!(entry.source_hash, 0xDEAD_BEEF);
    }
}
