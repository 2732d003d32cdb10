// stockroom/src/attachment/definition.rs

use std::fmt;
use std::sync::Arc;

use super::hooks::PhaseHook;
use crate::blob::BlobStore;

/// Resolves submitted image files into durable URLs through a shared blob store client.
///
/// Build one at startup with the blob store handle and reuse it for every request.
pub struct AttachmentPipeline {
  pub(crate) blob_store: Arc<dyn BlobStore>,
  pub(crate) hooks: Vec<PhaseHook>,
}

impl AttachmentPipeline {
  pub fn new(blob_store: Arc<dyn BlobStore>) -> Self {
    Self {
      blob_store,
      hooks: Vec::new(),
    }
  }

  pub fn blob_store(&self) -> &Arc<dyn BlobStore> {
    &self.blob_store
  }
}

impl fmt::Debug for AttachmentPipeline {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AttachmentPipeline")
      .field("hooks", &self.hooks.len())
      .finish_non_exhaustive()
  }
}
