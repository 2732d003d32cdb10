// stockroom/server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use stockroom::{CatalogError, ErrorKind};
use thiserror::Error;

use crate::web::envelope::ApiResponse;

/// The catalog operation a request was performing. Drives the wording of error replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
  Add,
  Update,
  Delete,
  FetchOne,
  FetchMany,
}

impl Operation {
  fn verb(self) -> Option<&'static str> {
    match self {
      Operation::Add => Some("add"),
      Operation::Update => Some("update"),
      Operation::Delete => Some("delete"),
      Operation::FetchOne | Operation::FetchMany => None,
    }
  }

  fn denied_message(self) -> String {
    match self.verb() {
      Some(verb) => format!("Access denied. Only admins can {verb} products."),
      None => "Access denied.".to_string(),
    }
  }

  fn not_found_message(self) -> String {
    match self.verb() {
      Some(verb) if self != Operation::Add => format!("Product not found. Unable to {verb}."),
      _ => "Product not found.".to_string(),
    }
  }

  fn failure_message(self) -> &'static str {
    match self {
      Operation::Add => "Failed to add product",
      Operation::Update => "Failed to update product",
      Operation::Delete => "Failed to delete product",
      Operation::FetchOne => "Error fetching product.",
      Operation::FetchMany => "Error fetching products.",
    }
  }
}

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Catalog operation {op:?} failed: {source}")]
  Catalog {
    op: Operation,
    #[source]
    source: CatalogError,
  },

  /// The request could not be read at the transport level (bad multipart, bad id).
  #[error("Bad Request: {0}")]
  BadRequest(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),
}

/// Attaches the running operation to a core error.
pub trait OperationContext<T> {
  fn during(self, op: Operation) -> Result<T>;
}

impl<T> OperationContext<T> for std::result::Result<T, CatalogError> {
  fn during(self, op: Operation) -> Result<T> {
    self.map_err(|source| AppError::Catalog { op, source })
  }
}

impl AppError {
  fn reply(&self) -> (StatusCode, ApiResponse<()>) {
    match self {
      AppError::Catalog { op, source } => match source.kind() {
        ErrorKind::AccessDenied => (StatusCode::FORBIDDEN, ApiResponse::failure(op.denied_message(), None)),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, ApiResponse::failure(op.not_found_message(), None)),
        // Validation is reported as a server error, same as upload and unknown failures.
        ErrorKind::Validation | ErrorKind::UploadFailure | ErrorKind::Unknown => (
          StatusCode::INTERNAL_SERVER_ERROR,
          ApiResponse::failure(op.failure_message(), Some(source.to_string())),
        ),
      },
      AppError::BadRequest(m) => (
        StatusCode::BAD_REQUEST,
        ApiResponse::failure("Invalid request", Some(m.clone())),
      ),
      AppError::Config(m) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        ApiResponse::failure("Configuration issue", Some(m.clone())),
      ),
      AppError::Sqlx(_) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        ApiResponse::failure("Database operation failed", None),
      ),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    self.reply().0
  }

  fn error_response(&self) -> HttpResponse {
    let (status, body) = self.reply();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, status = status.as_u16(), "Responding with client error");
    }
    HttpResponse::build(status).json(body)
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
