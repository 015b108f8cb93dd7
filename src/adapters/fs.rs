//! Filesystem-backed object store.
//!
//! Buckets map to subdirectories of a root directory; keys map to relative
//! paths inside their bucket. Used by the CLI to exercise the upload/poll
//! flow locally without any cloud storage.
//!
//! Writes are atomic (temp file in the target directory, then rename) so a
//! concurrently polling client never observes a half-written output object —
//! `exists` answering true must imply `get` returns complete bytes.

use crate::adapters::ObjectStore;
use crate::error::RedactError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `ObjectStore` rooted at a local directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, RedactError> {
        // Reject keys that would escape the bucket directory.
        if key.split('/').any(|seg| seg == "..") || Path::new(key).is_absolute() {
            return Err(RedactError::StorageFailed {
                op: "resolve",
                bucket: bucket.to_string(),
                key: key.to_string(),
                detail: "key must be a relative path without '..'".to_string(),
            });
        }
        Ok(self.root.join(bucket).join(key))
    }

    fn storage_err(
        op: &'static str,
        bucket: &str,
        key: &str,
        e: std::io::Error,
    ) -> RedactError {
        RedactError::StorageFailed {
            op,
            bucket: bucket.to_string(),
            key: key.to_string(),
            detail: e.to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for FsStore {
    async fn put(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> Result<(), RedactError> {
        let path = self.object_path(bucket, key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Self::storage_err("put", bucket, key, e))?;
        }

        let tmp_path = path.with_extension("tmp");
        tokio::fs::write(&tmp_path, &bytes)
            .await
            .map_err(|e| Self::storage_err("put", bucket, key, e))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| Self::storage_err("put", bucket, key, e))?;

        debug!(bucket, key, bytes = bytes.len(), "stored object");
        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, RedactError> {
        let path = self.object_path(bucket, key)?;
        tokio::fs::read(&path)
            .await
            .map_err(|e| Self::storage_err("get", bucket, key, e))
    }

    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, RedactError> {
        let path = self.object_path(bucket, key)?;
        Ok(tokio::fs::try_exists(&path).await.unwrap_or(false))
    }
}
