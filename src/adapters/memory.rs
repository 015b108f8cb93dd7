//! In-memory object store for tests and demos.

use crate::adapters::ObjectStore;
use crate::error::RedactError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// `ObjectStore` backed by a mutex-guarded map. Cheap to clone via `Arc`;
/// every `(bucket, key)` pair is an independent slot.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects, across all buckets.
    pub fn len(&self) -> usize {
        self.objects.lock().expect("store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> Result<(), RedactError> {
        self.objects
            .lock()
            .expect("store lock poisoned")
            .insert((bucket.to_string(), key.to_string()), bytes);
        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, RedactError> {
        self.objects
            .lock()
            .expect("store lock poisoned")
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| RedactError::StorageFailed {
                op: "get",
                bucket: bucket.to_string(),
                key: key.to_string(),
                detail: "no such object".to_string(),
            })
    }

    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, RedactError> {
        Ok(self
            .objects
            .lock()
            .expect("store lock poisoned")
            .contains_key(&(bucket.to_string(), key.to_string())))
    }
}
