// stockroom/src/model/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Category;

/// A sellable catalog item. Owned by the catalog store; `id` and timestamps are store-assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: Uuid,
  pub name: String,
  pub description: String,
  pub price: f64,
  pub category: Category,
  pub stock: i64,
  pub primary_image_url: Option<String>,
  /// Same order as the files were submitted in.
  pub gallery_image_urls: Vec<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Product {
  pub fn in_stock(&self) -> bool {
    self.stock > 0
  }
}
