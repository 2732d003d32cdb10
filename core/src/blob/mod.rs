// stockroom/src/blob/mod.rs

//! The external object store that hosts uploaded image bytes.

pub mod memory;

pub use memory::MemoryBlobStore;

use async_trait::async_trait;
use bytes::Bytes;

/// An uploaded image file, fully buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
  /// Client-supplied file name. Informational only.
  pub file_name: String,
  pub content_type: Option<String>,
  pub bytes: Bytes,
}

impl ImageFile {
  pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: impl Into<Bytes>) -> Self {
    Self {
      file_name: file_name.into(),
      content_type,
      bytes: bytes.into(),
    }
  }

  pub fn len(&self) -> usize {
    self.bytes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }
}

/// Where the blob store put one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
  /// Backend-specific object key.
  pub key: String,
  /// Durable retrieval URL.
  pub url: String,
}

/// A blob store client, constructed once and shared by reference.
///
/// One call uploads one file. Implementations do not retry; whatever timeout the
/// underlying client applies is the only one.
#[async_trait]
pub trait BlobStore: Send + Sync + 'static {
  async fn upload(&self, file: &ImageFile) -> anyhow::Result<StoredBlob>;
}
