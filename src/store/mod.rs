//! Blob store seam.
//!
//! The pipeline reads part files from, and writes output objects to, an
//! object store it only knows through this trait. Real object-storage
//! bindings live outside the crate; the implementations shipped here
//! cover tests ([`MemoryStore`]) and local runs ([`FsStore`]).

mod fs;
mod memory;

pub use fs::FsStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// Minimal object-store contract: ordered listing, whole-object reads
/// and writes. Calls are blocking request/response pairs; retry and
/// timeout policy belongs to the caller's environment.
pub trait BlobStore: Send + Sync {
    /// Keys under the given prefix, in the store's listing order.
    fn list(&self, prefix: &str) -> Result<Vec<String>>;

    /// Read one object in full.
    fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Write one object in full, replacing any previous content.
    fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<()>;
}
