// stockroom/src/error.rs

//! The catalog error taxonomy shared by every component.

use anyhow::Error as AnyhowError;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::access::Action;
use crate::attachment::ImageSlot;

/// A single violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
  pub field: &'static str,
  pub message: String,
}

impl FieldViolation {
  pub fn new(field: &'static str, message: impl Into<String>) -> Self {
    Self {
      field,
      message: message.into(),
    }
  }
}

impl fmt::Display for FieldViolation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.field, self.message)
  }
}

/// Joins violations the way they are reported to callers: `field: message, field: message`.
fn join_violations(violations: &[FieldViolation]) -> String {
  violations
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join(", ")
}

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("Access denied for '{action}': admin role required")]
  AccessDenied { action: Action },

  #[error("Validation failed: {}", join_violations(.violations))]
  Validation { violations: Vec<FieldViolation> },

  #[error("Product not found: {id}")]
  NotFound { id: Uuid },

  #[error("Upload of {slot} image '{file_name}' failed. Source: {source}")]
  UploadFailure {
    slot: ImageSlot,
    file_name: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Unexpected catalog failure. Source: {source}")]
  Unknown {
    #[source]
    source: AnyhowError,
  },
}

/// Fieldless view of [`CatalogError`], for matching on the category alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  AccessDenied,
  Validation,
  NotFound,
  UploadFailure,
  Unknown,
}

impl CatalogError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      CatalogError::AccessDenied { .. } => ErrorKind::AccessDenied,
      CatalogError::Validation { .. } => ErrorKind::Validation,
      CatalogError::NotFound { .. } => ErrorKind::NotFound,
      CatalogError::UploadFailure { .. } => ErrorKind::UploadFailure,
      CatalogError::Unknown { .. } => ErrorKind::Unknown,
    }
  }

  /// Builds a validation error from a single violation.
  pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
    CatalogError::Validation {
      violations: vec![FieldViolation::new(field, message)],
    }
  }

  /// Returns `Ok(())` when `violations` is empty, otherwise one aggregated `Validation` error.
  pub fn from_violations(violations: Vec<FieldViolation>) -> CatalogResult<()> {
    if violations.is_empty() {
      Ok(())
    } else {
      Err(CatalogError::Validation { violations })
    }
  }

  /// The violated constraints, if this is a validation error.
  pub fn violations(&self) -> &[FieldViolation] {
    match self {
      CatalogError::Validation { violations } => violations,
      _ => &[],
    }
  }
}

// Faults from external collaborators that nothing upstream classified.
impl From<AnyhowError> for CatalogError {
  fn from(err: AnyhowError) -> Self {
    // An anyhow error may already carry a CatalogError; keep its category instead of
    // burying it under Unknown.
    match err.downcast::<CatalogError>() {
      Ok(catalog_err) => catalog_err,
      Err(source) => CatalogError::Unknown { source },
    }
  }
}

pub type CatalogResult<T, E = CatalogError> = std::result::Result<T, E>;
