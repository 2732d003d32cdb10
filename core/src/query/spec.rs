// stockroom/src/query/spec.rs

//! The declarative match+sort spec handed to `CatalogStore::list` / `CatalogStore::find`.
//!
//! Every dimension is independent and the dimensions are AND-combined. A dimension left at
//! its default imposes no restriction.

use std::cmp::Ordering;

use crate::model::Product;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchSpec {
  /// Compared verbatim against the category name; a non-category string matches nothing.
  pub category: Option<String>,
  pub price: PriceRange,
  pub stock: Option<StockFilter>,
  /// Case-insensitive substring of the product name.
  pub name_contains: Option<String>,
}

impl MatchSpec {
  pub fn all() -> Self {
    Self::default()
  }

  pub fn with_category(mut self, category: impl Into<String>) -> Self {
    self.category = Some(category.into());
    self
  }

  pub fn with_min_price(mut self, min: f64) -> Self {
    self.price.min = Some(min);
    self
  }

  pub fn with_max_price(mut self, max: f64) -> Self {
    self.price.max = Some(max);
    self
  }

  pub fn with_stock(mut self, stock: StockFilter) -> Self {
    self.stock = Some(stock);
    self
  }

  pub fn with_name_containing(mut self, needle: impl Into<String>) -> Self {
    self.name_contains = Some(needle.into());
    self
  }

  pub fn is_unrestricted(&self) -> bool {
    self == &Self::default()
  }

  pub fn matches(&self, product: &Product) -> bool {
    if let Some(category) = &self.category {
      if product.category.as_str() != category {
        return false;
      }
    }
    if !self.price.contains(product.price) {
      return false;
    }
    if let Some(stock) = self.stock {
      if !stock.matches(product.stock) {
        return false;
      }
    }
    if let Some(needle) = &self.name_contains {
      if !product.name.to_lowercase().contains(&needle.to_lowercase()) {
        return false;
      }
    }
    true
  }
}

/// Inclusive price bounds; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceRange {
  pub min: Option<f64>,
  pub max: Option<f64>,
}

impl PriceRange {
  pub fn contains(&self, price: f64) -> bool {
    self.min.map_or(true, |min| price >= min) && self.max.map_or(true, |max| price <= max)
  }

  pub fn is_open(&self) -> bool {
    self.min.is_none() && self.max.is_none()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockFilter {
  /// `stock > 0`
  InStock,
  /// `stock == 0`
  OutOfStock,
}

impl StockFilter {
  /// Reads a raw `inStock` value by string truthiness: any non-empty value, `"false"`
  /// included, selects `InStock`; only the empty string selects `OutOfStock`.
  pub fn from_param(raw: &str) -> Self {
    if raw.is_empty() {
      StockFilter::OutOfStock
    } else {
      StockFilter::InStock
    }
  }

  pub fn matches(self, stock: i64) -> bool {
    match self {
      StockFilter::InStock => stock > 0,
      StockFilter::OutOfStock => stock == 0,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
  Name,
  Description,
  Price,
  Stock,
  Category,
  CreatedAt,
  UpdatedAt,
}

impl SortKey {
  /// Accepts the camelCase field names of the product JSON and their snake_case forms.
  pub fn from_param(raw: &str) -> Option<Self> {
    let key = match raw {
      "name" => SortKey::Name,
      "description" => SortKey::Description,
      "price" => SortKey::Price,
      "stock" => SortKey::Stock,
      "category" => SortKey::Category,
      "createdAt" | "created_at" => SortKey::CreatedAt,
      "updatedAt" | "updated_at" => SortKey::UpdatedAt,
      _ => return None,
    };
    Some(key)
  }

  fn compare(self, a: &Product, b: &Product) -> Ordering {
    match self {
      SortKey::Name => a.name.cmp(&b.name),
      SortKey::Description => a.description.cmp(&b.description),
      SortKey::Price => a.price.total_cmp(&b.price),
      SortKey::Stock => a.stock.cmp(&b.stock),
      SortKey::Category => a.category.as_str().cmp(b.category.as_str()),
      SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
      SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
  #[default]
  Ascending,
  Descending,
}

impl SortOrder {
  /// Only the exact string `"desc"` sorts descending.
  pub fn from_param(raw: Option<&str>) -> Self {
    match raw {
      Some("desc") => SortOrder::Descending,
      _ => SortOrder::Ascending,
    }
  }
}

/// A single sort key and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
  pub key: SortKey,
  pub order: SortOrder,
}

impl SortSpec {
  pub fn new(key: SortKey, order: SortOrder) -> Self {
    Self { key, order }
  }

  pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
    let ordering = self.key.compare(a, b);
    match self.order {
      SortOrder::Ascending => ordering,
      SortOrder::Descending => ordering.reverse(),
    }
  }

  /// Stable sort: equal keys keep their incoming (store-native) order.
  pub fn sort(&self, products: &mut [Product]) {
    products.sort_by(|a, b| self.compare(a, b));
  }
}

/// What a listing request asks the store for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingQuery {
  pub filter: MatchSpec,
  /// `None` leaves the store-native order.
  pub sort: Option<SortSpec>,
}

impl ListingQuery {
  pub fn new(filter: MatchSpec, sort: Option<SortSpec>) -> Self {
    Self { filter, sort }
  }

  /// Filters and orders `products` in memory.
  pub fn apply<'a, I>(&self, products: I) -> Vec<Product>
  where
    I: IntoIterator<Item = &'a Product>,
  {
    let mut matched: Vec<Product> = products
      .into_iter()
      .filter(|p| self.filter.matches(p))
      .cloned()
      .collect();
    if let Some(sort) = &self.sort {
      sort.sort(&mut matched);
    }
    matched
  }
}
