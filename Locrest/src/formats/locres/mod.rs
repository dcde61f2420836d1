//! .locres localization file format
//!
//! Binary string tables produced by Unreal Engine's localization pipeline.
//! A resource is an ordered list of namespaces, each holding keyed entries
//! whose translated text is what ships in game.

mod reader;
mod writer;

pub use reader::{parse_locres_bytes, read_locres};
pub use writer::{to_locres_bytes, write_locres};

/// Magic GUID at the start of every versioned `.locres` file.
///
/// Files without it are the legacy (version 0) layout.
pub const LOCRES_MAGIC: [u8; 16] = [
    0x0E, 0x14, 0x74, 0x75, 0x67, 0x4A, 0x03, 0xFC, 0x4A, 0x15, 0x90, 0x9D, 0xC3, 0x37, 0x7F, 0x1B,
];

/// Layout revision of a `.locres` file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LocresVersion {
    /// No magic, translations stored inline
    Legacy = 0,
    /// Translations deduplicated into a trailing string array
    Compact = 1,
    /// Adds namespace/key hashes and string ref counts
    Optimized = 2,
    /// Same layout as `Optimized`, hashes computed with `CityHash64` over UTF-16
    #[default]
    OptimizedCityHash64Utf16 = 3,
}

impl LocresVersion {
    /// Map the on-disk version byte to a version
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Legacy),
            1 => Some(Self::Compact),
            2 => Some(Self::Optimized),
            3 => Some(Self::OptimizedCityHash64Utf16),
            _ => None,
        }
    }

    /// Get a human-readable name for this version
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "Legacy",
            Self::Compact => "Compact",
            Self::Optimized => "Optimized",
            Self::OptimizedCityHash64Utf16 => "Optimized (CityHash64, UTF-16)",
        }
    }

    /// Whether the file starts with [`LOCRES_MAGIC`] and a version byte
    #[must_use]
    pub fn has_magic(self) -> bool {
        self >= Self::Compact
    }

    /// Whether translations live in a shared string array
    #[must_use]
    pub fn has_string_table(self) -> bool {
        self >= Self::Compact
    }

    /// Whether namespaces and keys carry precomputed hashes
    #[must_use]
    pub fn has_hashes(self) -> bool {
        self >= Self::Optimized
    }
}

/// A single localized entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Key, unique within its namespace
    pub key: String,
    /// Precomputed key hash (optimized versions only, kept as read)
    pub key_hash: u32,
    /// Hash of the source string this translation was made from
    pub source_hash: u32,
    /// The translated text
    pub translation: String,
}

impl Entry {
    /// Create an entry with zeroed hashes
    pub fn new(key: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            key_hash: 0,
            source_hash: 0,
            translation: translation.into(),
        }
    }
}

/// A named group of entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Namespace name (may be empty, which is common in shipped games)
    pub name: String,
    /// Precomputed name hash (optimized versions only, kept as read)
    pub hash: u32,
    pub entries: Vec<Entry>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hash: 0,
            entries: Vec::new(),
        }
    }

    /// Builder-style helper that appends an entry
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, translation: impl Into<String>) -> Self {
        self.entries.push(Entry::new(key, translation));
        self
    }

    /// Look up an entry by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key == key)
    }
}

/// A parsed `.locres` file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocresResource {
    /// Version the resource was read with; writing keeps it
    pub version: LocresVersion,
    pub namespaces: Vec<Namespace>,
}

impl LocresResource {
    pub fn new(version: LocresVersion) -> Self {
        Self {
            version,
            namespaces: Vec::new(),
        }
    }

    /// Builder-style helper that appends a namespace
    #[must_use]
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespaces.push(namespace);
        self
    }

    /// Total number of entries across all namespaces
    #[must_use]
    pub fn len(&self) -> usize {
        self.namespaces.iter().map(|ns| ns.entries.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a namespace by name
    #[must_use]
    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.iter().find(|ns| ns.name == name)
    }

    /// Look up an entry by namespace and key
    #[must_use]
    pub fn get(&self, namespace: &str, key: &str) -> Option<&Entry> {
        self.namespace(namespace).and_then(|ns| ns.get(key))
    }

    /// Iterate over `(namespace, entry)` pairs in file order
    pub fn iter(&self) -> impl Iterator<Item = (&Namespace, &Entry)> {
        self.namespaces
            .iter()
            .flat_map(|ns| ns.entries.iter().map(move |e| (ns, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_from_u8() {
        assert_eq!(LocresVersion::from_u8(0), Some(LocresVersion::Legacy));
        assert_eq!(
            LocresVersion::from_u8(3),
            Some(LocresVersion::OptimizedCityHash64Utf16)
        );
        assert_eq!(LocresVersion::from_u8(4), None);
        assert!(!LocresVersion::Legacy.has_magic());
        assert!(LocresVersion::Compact.has_string_table());
        assert!(!LocresVersion::Compact.has_hashes());
    }

    #[test]
    fn test_iter_order_and_len() {
        let resource = LocresResource::new(LocresVersion::Compact)
            .with_namespace(Namespace::new("A").with_entry("k1", "one").with_entry("k2", "two"))
            .with_namespace(Namespace::new("B").with_entry("k1", "three"));

        assert_eq!(resource.len(), 3);
        let keys: Vec<_> = resource
            .iter()
            .map(|(ns, e)| format!("{}/{}", ns.name, e.key))
            .collect();
        assert_eq!(keys, ["A/k1", "A/k2", "B/k1"]);
        assert_eq!(resource.get("B", "k1").map(|e| e.translation.as_str()), Some("three"));
        assert!(resource.get("C", "k1").is_none());
    }
}
