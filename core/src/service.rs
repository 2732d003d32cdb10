// stockroom/src/service.rs

//! Request-level orchestration.
//!
//! Writes: access gate, then (create only) field pre-validation, then the attachment
//! pipeline, then the catalog store. Reads: access gate, then the store.

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::access::{AccessGate, Action, Caller};
use crate::attachment::{AttachmentPipeline, ImageUploads};
use crate::error::CatalogResult;
use crate::model::{Product, ProductFields};
use crate::pagination::Page;
use crate::query::ListingParams;
use crate::store::CatalogStore;

/// The whole filtered and sorted result of an unpaginated listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredProducts {
  pub items: Vec<Product>,
  pub total: u64,
}

pub struct CatalogService {
  store: Arc<dyn CatalogStore>,
  attachments: AttachmentPipeline,
  gate: AccessGate,
}

impl std::fmt::Debug for CatalogService {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CatalogService")
      .field("attachments", &self.attachments)
      .finish_non_exhaustive()
  }
}

impl CatalogService {
  pub fn new(store: Arc<dyn CatalogStore>, attachments: AttachmentPipeline) -> Self {
    Self {
      store,
      attachments,
      gate: AccessGate::new(),
    }
  }

  pub fn store(&self) -> &Arc<dyn CatalogStore> {
    &self.store
  }

  /// Lets a transport refuse a caller before reading a request body. Every operation
  /// below checks again.
  pub fn authorize(&self, caller: &Caller, action: Action) -> CatalogResult<()> {
    self.gate.require(caller, action)
  }

  /// Creates a product. Field problems are reported before any file is uploaded; an
  /// upload failure means nothing is stored.
  #[instrument(
    name = "CatalogService::create",
    skip_all,
    fields(role = ?caller.role(), files = uploads.file_count()),
    err(Display)
  )]
  pub async fn create(&self, caller: &Caller, fields: ProductFields, uploads: ImageUploads) -> CatalogResult<Product> {
    self.gate.require(caller, Action::Create)?;

    let fields = fields.normalized();
    fields.validate_for_create()?;

    let images = self.attachments.resolve(&uploads).await?;
    let product = self.store.create(fields, images).await?;
    info!(product_id = %product.id, "Product created.");
    Ok(product)
  }

  /// Updates the supplied fields. Uploads run before the store is touched; an unknown id
  /// is only detected afterwards, leaving any uploaded blobs orphaned.
  #[instrument(
    name = "CatalogService::update",
    skip_all,
    fields(role = ?caller.role(), product_id = %id, files = uploads.file_count()),
    err(Display)
  )]
  pub async fn update(
    &self,
    caller: &Caller,
    id: Uuid,
    fields: ProductFields,
    uploads: ImageUploads,
  ) -> CatalogResult<Product> {
    self.gate.require(caller, Action::Update)?;

    let images = self.attachments.resolve(&uploads).await?;
    if fields.is_empty() && images.is_empty() {
      warn!("Update carries no fields and no files.");
    }
    let product = self.store.update(id, fields.normalized(), images).await?;
    info!("Product updated.");
    Ok(product)
  }

  /// Deletes a product. Its blobs are left in the blob store.
  #[instrument(
    name = "CatalogService::delete",
    skip_all,
    fields(role = ?caller.role(), product_id = %id),
    err(Display)
  )]
  pub async fn delete(&self, caller: &Caller, id: Uuid) -> CatalogResult<Product> {
    self.gate.require(caller, Action::Delete)?;
    let product = self.store.delete(id).await?;
    info!("Product deleted.");
    Ok(product)
  }

  #[instrument(name = "CatalogService::get", skip_all, fields(product_id = %id))]
  pub async fn get(&self, caller: &Caller, id: Uuid) -> CatalogResult<Product> {
    self.gate.require(caller, Action::Get)?;
    self.store.get_by_id(id).await
  }

  /// Filtered, sorted and paginated listing.
  #[instrument(name = "CatalogService::list", skip_all, err(Display))]
  pub async fn list(&self, caller: &Caller, params: &ListingParams) -> CatalogResult<Page<Product>> {
    self.gate.require(caller, Action::List)?;
    let query = params.query()?;
    let page = params.page_request();
    self.store.list(&query, page).await
  }

  /// Filtered and sorted listing without pagination.
  #[instrument(name = "CatalogService::filter", skip_all, err(Display))]
  pub async fn filter(&self, caller: &Caller, params: &ListingParams) -> CatalogResult<FilteredProducts> {
    self.gate.require(caller, Action::Filter)?;
    let query = params.query()?;
    let items = self.store.find(&query).await?;
    let total = items.len() as u64;
    Ok(FilteredProducts { items, total })
  }
}
