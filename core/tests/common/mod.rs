// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use stockroom::{
  AttachmentPipeline, BlobStore, CatalogService, ImageFile, MemoryBlobStore, MemoryCatalogStore, ProductFields,
  StoredBlob,
};
use tracing::Level;

// --- Blob store doubles ---

/// Wraps a `MemoryBlobStore`, records every attempted file name in order, and fails the
/// attempt with the given 0-based position.
#[derive(Debug)]
pub struct FlakyBlobStore {
  inner: MemoryBlobStore,
  fail_at: Option<usize>,
  attempts: AtomicUsize,
  seen: Mutex<Vec<String>>,
}

impl FlakyBlobStore {
  pub fn reliable() -> Self {
    Self {
      inner: MemoryBlobStore::new("https://blobs.test"),
      fail_at: None,
      attempts: AtomicUsize::new(0),
      seen: Mutex::new(Vec::new()),
    }
  }

  pub fn failing_at(attempt: usize) -> Self {
    Self {
      fail_at: Some(attempt),
      ..Self::reliable()
    }
  }

  pub fn attempts(&self) -> usize {
    self.attempts.load(Ordering::SeqCst)
  }

  pub fn seen(&self) -> Vec<String> {
    self.seen.lock().clone()
  }

  pub fn stored(&self) -> usize {
    self.inner.len()
  }
}

#[async_trait]
impl BlobStore for FlakyBlobStore {
  async fn upload(&self, file: &ImageFile) -> anyhow::Result<StoredBlob> {
    let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
    self.seen.lock().push(file.file_name.clone());
    tracing::debug!(target: "test_blob_store", attempt, file = %file.file_name, "upload attempted");
    if Some(attempt) == self.fail_at {
      anyhow::bail!("simulated outage on attempt {attempt}");
    }
    self.inner.upload(file).await
  }
}

// --- Fixtures ---

pub fn png(name: &str) -> ImageFile {
  ImageFile::new(name, Some("image/png".to_string()), name.as_bytes().to_vec())
}

pub fn pngs(prefix: &str, n: usize) -> Vec<ImageFile> {
  (0..n).map(|i| png(&format!("{prefix}{i}.png"))).collect()
}

pub fn fields(name: &str, price: f64, category: &str, stock: i64) -> ProductFields {
  ProductFields {
    name: Some(name.to_string()),
    description: Some(format!("{name} description")),
    price: Some(price),
    category: Some(category.to_string()),
    stock: Some(stock),
  }
}

pub struct Harness {
  pub service: CatalogService,
  pub store: Arc<MemoryCatalogStore>,
  pub blobs: Arc<FlakyBlobStore>,
}

pub fn harness(blobs: FlakyBlobStore) -> Harness {
  let store = Arc::new(MemoryCatalogStore::new());
  let blobs = Arc::new(blobs);
  let service = CatalogService::new(store.clone(), AttachmentPipeline::new(blobs.clone()));
  Harness { service, store, blobs }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
