// stockroom/src/blob/memory.rs

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{BlobStore, ImageFile, StoredBlob};

/// In-memory blob store for tests and local runs.
///
/// Keys are sequential (`blob-1`, `blob-2`, ...) and URLs are `{base_url}/{key}/{file_name}`.
#[derive(Debug)]
pub struct MemoryBlobStore {
  base_url: String,
  next_key: AtomicU64,
  objects: RwLock<HashMap<String, Bytes>>,
}

impl Default for MemoryBlobStore {
  fn default() -> Self {
    Self::new("memory://blobs")
  }
}

impl MemoryBlobStore {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into().trim_end_matches('/').to_string(),
      next_key: AtomicU64::new(1),
      objects: RwLock::new(HashMap::new()),
    }
  }

  pub fn len(&self) -> usize {
    self.objects.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.objects.read().is_empty()
  }

  pub fn get(&self, key: &str) -> Option<Bytes> {
    self.objects.read().get(key).cloned()
  }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
  async fn upload(&self, file: &ImageFile) -> anyhow::Result<StoredBlob> {
    if file.is_empty() {
      anyhow::bail!("refusing to store empty file '{}'", file.file_name);
    }
    let key = format!("blob-{}", self.next_key.fetch_add(1, Ordering::Relaxed));
    self.objects.write().insert(key.clone(), file.bytes.clone());
    Ok(StoredBlob {
      url: format!("{}/{}/{}", self.base_url, key, file.file_name),
      key,
    })
  }
}
