//! Boundary between the translation workflow and a resource format
//!
//! Decode and encode only ever need to open a resource, walk its entries in
//! order, replace translations and save it again. Any format that can do that
//! implements [`ResourceStore`].

use std::path::Path;

use crate::error::{Error, Result};
use crate::formats::locres::{self, LocresResource};

/// A namespaced collection of translatable entries
pub trait ResourceStore: Sized {
    /// Open and parse the resource at `path`
    ///
    /// # Errors
    /// Returns [`Error::ResourceRead`] if the resource cannot be loaded.
    fn open(path: &Path) -> Result<Self>;

    /// Number of entries across all namespaces
    fn entry_count(&self) -> usize;

    /// Visit `(namespace, key, translation)` in natural order
    fn for_each_entry(&self, visit: &mut dyn FnMut(&str, &str, &str));

    /// Visit entries in natural order with a mutable translation
    fn for_each_entry_mut(&mut self, visit: &mut dyn FnMut(&str, &str, &mut String));

    /// Serialize the resource to `path`
    ///
    /// # Errors
    /// Returns [`Error::ResourceWrite`] if the resource cannot be written.
    fn save(&self, path: &Path) -> Result<()>;
}

impl ResourceStore for LocresResource {
    fn open(path: &Path) -> Result<Self> {
        locres::read_locres(path).map_err(|e| Error::resource_read(path, e))
    }

    fn entry_count(&self) -> usize {
        self.len()
    }

    fn for_each_entry(&self, visit: &mut dyn FnMut(&str, &str, &str)) {
        for (namespace, entry) in self.iter() {
            visit(&namespace.name, &entry.key, &entry.translation);
        }
    }

    fn for_each_entry_mut(&mut self, visit: &mut dyn FnMut(&str, &str, &mut String)) {
        for namespace in &mut self.namespaces {
            for entry in &mut namespace.entries {
                visit(&namespace.name, &entry.key, &mut entry.translation);
            }
        }
    }

    fn save(&self, path: &Path) -> Result<()> {
        locres::write_locres(path, self).map_err(|e| Error::resource_write(path, e))
    }
}
