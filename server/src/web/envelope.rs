// stockroom/server/src/web/envelope.rs

use serde::Serialize;

/// Every JSON reply: `{ success, message, data?, error? }`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
  pub success: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data: Option<T>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
  pub fn ok(message: impl Into<String>, data: T) -> Self {
    Self {
      success: true,
      message: message.into(),
      data: Some(data),
      error: None,
    }
  }
}

impl ApiResponse<()> {
  pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
    Self {
      success: false,
      message: message.into(),
      data: None,
      error,
    }
  }
}
