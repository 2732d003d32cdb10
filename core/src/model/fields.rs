// stockroom/src/model/fields.rs

//! Input DTOs for catalog writes.
//!
//! `ProductForm` is what a transport hands over (every value a string), `ProductFields` is
//! the parsed, typed form, and `ProductDraft` is a fully validated create request.
//! Image URL fields never come from callers: they are produced by the attachment pipeline
//! as `ImageFields`.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::validation::{check_description, check_name, check_price, check_stock};
use super::{validate_product, Category, Product};
use crate::error::{CatalogError, CatalogResult, FieldViolation};

/// Raw product fields as they arrive from a form. Absent keys stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductForm {
  pub name: Option<String>,
  pub description: Option<String>,
  pub price: Option<String>,
  pub category: Option<String>,
  pub stock: Option<String>,
}

impl ProductForm {
  /// Sets a field by its form key. Unknown keys are ignored and reported as `false`.
  pub fn set(&mut self, key: &str, value: String) -> bool {
    let slot = match key {
      "name" => &mut self.name,
      "description" => &mut self.description,
      "price" => &mut self.price,
      "category" => &mut self.category,
      "stock" => &mut self.stock,
      _ => return false,
    };
    *slot = Some(value);
    true
  }

  /// Parses the numeric fields. Every unparsable value is reported in one `Validation` error.
  pub fn into_fields(self) -> CatalogResult<ProductFields> {
    let mut violations = Vec::new();
    let price = self
      .price
      .as_deref()
      .and_then(|raw| parse_price(raw, &mut violations));
    let stock = self
      .stock
      .as_deref()
      .and_then(|raw| parse_stock(raw, &mut violations));
    CatalogError::from_violations(violations)?;

    Ok(ProductFields {
      name: self.name,
      description: self.description,
      price,
      category: self.category,
      stock,
    })
  }
}

fn parse_price(raw: &str, violations: &mut Vec<FieldViolation>) -> Option<f64> {
  let raw = raw.trim();
  if raw.is_empty() {
    violations.push(FieldViolation::new("price", "Product price is required"));
    return None;
  }
  match raw.parse::<f64>() {
    Ok(price) => Some(price),
    Err(_) => {
      violations.push(FieldViolation::new("price", format!("`{raw}` is not a number")));
      None
    }
  }
}

fn parse_stock(raw: &str, violations: &mut Vec<FieldViolation>) -> Option<i64> {
  let raw = raw.trim();
  if raw.is_empty() {
    violations.push(FieldViolation::new("stock", "Product stock is required"));
    return None;
  }
  if let Ok(stock) = raw.parse::<i64>() {
    return Some(stock);
  }
  let message = match raw.parse::<f64>() {
    Ok(n) if n.is_finite() && n.fract() != 0.0 => "Stock must be a whole number".to_string(),
    _ => format!("`{raw}` is not a whole number"),
  };
  violations.push(FieldViolation::new("stock", message));
  None
}

/// Typed product fields. `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFields {
  pub name: Option<String>,
  pub description: Option<String>,
  pub price: Option<f64>,
  /// Kept raw: an unknown category is a validation failure, not a parse failure.
  pub category: Option<String>,
  pub stock: Option<i64>,
}

impl ProductFields {
  pub fn is_empty(&self) -> bool {
    self.name.is_none()
      && self.description.is_none()
      && self.price.is_none()
      && self.category.is_none()
      && self.stock.is_none()
  }

  /// Trims the name, as stored names never carry surrounding whitespace.
  pub fn normalized(mut self) -> Self {
    if let Some(name) = self.name.as_mut() {
      let trimmed = name.trim();
      if trimmed.len() != name.len() {
        *name = trimmed.to_string();
      }
    }
    self
  }

  /// Validates a create request: required fields present, defaults applied, bounds checked.
  pub fn validate_for_create(&self) -> CatalogResult<ProductDraft> {
    let mut violations = Vec::new();

    let name = self.name.as_deref().map(str::trim).unwrap_or_default();
    check_name(name, &mut violations);

    let description = self.description.as_deref().unwrap_or_default();
    check_description(description, &mut violations);

    let price = match self.price {
      Some(price) => {
        check_price(price, &mut violations);
        price
      }
      None => {
        violations.push(FieldViolation::new("price", "Product price is required"));
        0.0
      }
    };

    let category = match self.category.as_deref() {
      Some(raw) => parse_category(raw, &mut violations).unwrap_or_default(),
      None => Category::default(),
    };

    let stock = self.stock.unwrap_or(0);
    check_stock(stock, &mut violations);

    CatalogError::from_violations(violations)?;
    Ok(ProductDraft {
      name: name.to_string(),
      description: description.to_string(),
      price,
      category,
      stock,
    })
  }

  /// Overwrites the supplied fields on `product`, then re-validates the whole entity.
  ///
  /// On error `product` may be partially modified; callers apply this to a scratch copy.
  pub fn apply_to(&self, product: &mut Product) -> CatalogResult<()> {
    let mut violations = Vec::new();

    if let Some(name) = &self.name {
      product.name = name.trim().to_string();
    }
    if let Some(description) = &self.description {
      product.description = description.clone();
    }
    if let Some(price) = self.price {
      product.price = price;
    }
    if let Some(raw) = self.category.as_deref() {
      if let Some(category) = parse_category(raw, &mut violations) {
        product.category = category;
      }
    }
    if let Some(stock) = self.stock {
      product.stock = stock;
    }

    match validate_product(product) {
      Ok(()) => CatalogError::from_violations(violations),
      Err(CatalogError::Validation { violations: mut more }) => {
        violations.append(&mut more);
        CatalogError::from_violations(violations)
      }
      Err(other) => Err(other),
    }
  }
}

fn parse_category(raw: &str, violations: &mut Vec<FieldViolation>) -> Option<Category> {
  if raw.is_empty() {
    violations.push(FieldViolation::new("category", "Product category is required"));
    return None;
  }
  match raw.parse::<Category>() {
    Ok(category) => Some(category),
    Err(err) => {
      violations.push(FieldViolation::new("category", err.to_string()));
      None
    }
  }
}

/// A create request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
  pub name: String,
  pub description: String,
  pub price: f64,
  pub category: Category,
  pub stock: i64,
}

impl ProductDraft {
  pub fn into_product(self, id: Uuid, images: ImageFields, now: DateTime<Utc>) -> Product {
    Product {
      id,
      name: self.name,
      description: self.description,
      price: self.price,
      category: self.category,
      stock: self.stock,
      primary_image_url: images.primary,
      gallery_image_urls: images.gallery.unwrap_or_default(),
      created_at: now,
      updated_at: now,
    }
  }
}

/// Image URLs resolved for one write. `None` leaves the stored value alone; `Some` replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageFields {
  pub primary: Option<String>,
  pub gallery: Option<Vec<String>>,
}

impl ImageFields {
  pub fn none() -> Self {
    Self::default()
  }

  pub fn is_empty(&self) -> bool {
    self.primary.is_none() && self.gallery.is_none()
  }

  pub fn apply_to(self, product: &mut Product) {
    if let Some(primary) = self.primary {
      product.primary_image_url = Some(primary);
    }
    if let Some(gallery) = self.gallery {
      product.gallery_image_urls = gallery;
    }
  }
}
