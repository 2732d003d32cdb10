// stockroom/src/model/validation.rs

//! Field constraints that hold for every stored product.
//!
//! Each check pushes onto a shared violation list so one failed write reports all of
//! its problems at once.

use crate::error::{CatalogError, CatalogResult, FieldViolation};

use super::Product;

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

pub(crate) fn check_name(name: &str, violations: &mut Vec<FieldViolation>) {
  if name.is_empty() {
    violations.push(FieldViolation::new("name", "Product name is required"));
  } else if name.chars().count() > NAME_MAX_CHARS {
    violations.push(FieldViolation::new(
      "name",
      format!("Product name cannot exceed {NAME_MAX_CHARS} characters"),
    ));
  }
}

pub(crate) fn check_description(description: &str, violations: &mut Vec<FieldViolation>) {
  if description.is_empty() {
    violations.push(FieldViolation::new("description", "Product description is required"));
  } else if description.chars().count() > DESCRIPTION_MAX_CHARS {
    violations.push(FieldViolation::new(
      "description",
      format!("Product description cannot exceed {DESCRIPTION_MAX_CHARS} characters"),
    ));
  }
}

pub(crate) fn check_price(price: f64, violations: &mut Vec<FieldViolation>) {
  if !price.is_finite() {
    violations.push(FieldViolation::new("price", "Price must be a finite number"));
  } else if price < 0.0 {
    violations.push(FieldViolation::new("price", "Price cannot be negative"));
  }
}

pub(crate) fn check_stock(stock: i64, violations: &mut Vec<FieldViolation>) {
  if stock < 0 {
    violations.push(FieldViolation::new("stock", "Stock cannot be negative"));
  }
}

/// Checks the whole entity. Stores call this right before committing a write.
pub fn validate_product(product: &Product) -> CatalogResult<()> {
  let mut violations = Vec::new();
  check_name(&product.name, &mut violations);
  check_description(&product.description, &mut violations);
  check_price(product.price, &mut violations);
  check_stock(product.stock, &mut violations);
  CatalogError::from_violations(violations)
}
