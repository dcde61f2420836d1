//! File format readers and writers

pub mod locres;

pub use locres::{Entry, LocresResource, LocresVersion, Namespace, read_locres, write_locres};
