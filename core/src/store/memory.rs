// stockroom/src/store/memory.rs

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::{event, Level};
use uuid::Uuid;

use super::CatalogStore;
use crate::error::{CatalogError, CatalogResult};
use crate::model::{validate_product, ImageFields, Product, ProductFields};
use crate::pagination::{Page, PageRequest};
use crate::query::ListingQuery;

/// In-memory catalog store. Store-native order is insertion order.
///
/// Locks are never held across an `.await`.
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
  products: RwLock<Vec<Product>>,
}

impl MemoryCatalogStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.products.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.products.read().is_empty()
  }

  pub fn snapshot(&self) -> Vec<Product> {
    self.products.read().clone()
  }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
  async fn create(&self, fields: ProductFields, images: ImageFields) -> CatalogResult<Product> {
    let product = fields
      .validate_for_create()?
      .into_product(Uuid::new_v4(), images, Utc::now());
    validate_product(&product)?;

    self.products.write().push(product.clone());
    event!(Level::DEBUG, product_id = %product.id, "Product stored.");
    Ok(product)
  }

  async fn update(&self, id: Uuid, fields: ProductFields, images: ImageFields) -> CatalogResult<Product> {
    let mut products = self.products.write();
    let slot = products
      .iter_mut()
      .find(|p| p.id == id)
      .ok_or(CatalogError::NotFound { id })?;

    let mut candidate = slot.clone();
    fields.apply_to(&mut candidate)?;
    images.apply_to(&mut candidate);
    validate_product(&candidate)?;
    candidate.updated_at = Utc::now();

    *slot = candidate.clone();
    Ok(candidate)
  }

  async fn delete(&self, id: Uuid) -> CatalogResult<Product> {
    let mut products = self.products.write();
    let idx = products
      .iter()
      .position(|p| p.id == id)
      .ok_or(CatalogError::NotFound { id })?;
    Ok(products.remove(idx))
  }

  async fn get_by_id(&self, id: Uuid) -> CatalogResult<Product> {
    self
      .products
      .read()
      .iter()
      .find(|p| p.id == id)
      .cloned()
      .ok_or(CatalogError::NotFound { id })
  }

  async fn list(&self, query: &ListingQuery, page: PageRequest) -> CatalogResult<Page<Product>> {
    let matched = query.apply(self.products.read().iter());
    Ok(page.paginate(matched))
  }

  async fn find(&self, query: &ListingQuery) -> CatalogResult<Vec<Product>> {
    Ok(query.apply(self.products.read().iter()))
  }
}
