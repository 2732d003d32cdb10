// stockroom/src/store/mod.rs

//! The catalog store port.

pub mod memory;

pub use memory::MemoryCatalogStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::model::{ImageFields, Product, ProductFields};
use crate::pagination::{Page, PageRequest};
use crate::query::ListingQuery;

/// Persistence for products. Implementations enforce the field invariants on every write
/// (`ProductFields::validate_for_create`, `ProductFields::apply_to`, `validate_product`),
/// so an invalid entity is never stored regardless of the caller.
///
/// Calls are independently atomic. Concurrent updates to one id are not coordinated:
/// the last write to complete wins.
#[async_trait]
pub trait CatalogStore: Send + Sync + 'static {
  /// Validates, assigns an id and both timestamps, and stores the product.
  async fn create(&self, fields: ProductFields, images: ImageFields) -> CatalogResult<Product>;

  /// Overwrites supplied fields and supplied image fields, re-validates the merged entity,
  /// refreshes `updated_at`, and stores it. Returns `NotFound` without writing if `id` is unknown.
  async fn update(&self, id: Uuid, fields: ProductFields, images: ImageFields) -> CatalogResult<Product>;

  /// Removes and returns the product.
  async fn delete(&self, id: Uuid) -> CatalogResult<Product>;

  async fn get_by_id(&self, id: Uuid) -> CatalogResult<Product>;

  /// Runs the query and returns one page of it plus the total match count.
  async fn list(&self, query: &ListingQuery, page: PageRequest) -> CatalogResult<Page<Product>>;

  /// Runs the query without pagination.
  async fn find(&self, query: &ListingQuery) -> CatalogResult<Vec<Product>>;
}
