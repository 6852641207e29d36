//! In-memory blob store.

use std::collections::BTreeMap;
use std::sync::Mutex;

use super::BlobStore;
use crate::error::{Error, Result};

struct Object {
    bytes: Vec<u8>,
    content_type: String,
}

/// Blob store backed by a sorted in-memory map.
///
/// Listing order is lexicographic, matching how object stores paginate
/// keys. Used by tests and as a scratch target.
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<BTreeMap<String, Object>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.lock().expect("store lock poisoned").len()
    }

    /// Whether the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Content type recorded for a key, if present.
    pub fn content_type(&self, key: &str) -> Option<String> {
        self.objects
            .lock()
            .expect("store lock poisoned")
            .get(key)
            .map(|o| o.content_type.clone())
    }
}

impl BlobStore for MemoryStore {
    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let objects = self.objects.lock().expect("store lock poisoned");
        Ok(objects
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn get(&self, key: &str) -> Result<Vec<u8>> {
        let objects = self.objects.lock().expect("store lock poisoned");
        objects
            .get(key)
            .map(|o| o.bytes.clone())
            .ok_or_else(|| Error::Store(format!("no such key: {}", key)))
    }

    fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<()> {
        let mut objects = self.objects.lock().expect("store lock poisoned");
        objects.insert(
            key.to_string(),
            Object {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }
}
