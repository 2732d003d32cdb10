// stockroom/server/src/services/cloudinary.rs

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;
use stockroom::{BlobStore, ImageFile, StoredBlob};
use tracing::{debug, instrument, warn};

use crate::config::CloudinaryConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct UploadResponse {
  public_id: String,
  secure_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
  error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
  message: String,
}

/// Signed uploads to Cloudinary's image upload endpoint.
///
/// One client is built at startup and shared; nothing is retried.
#[derive(Debug, Clone)]
pub struct CloudinaryBlobStore {
  client: reqwest::Client,
  config: CloudinaryConfig,
}

impl CloudinaryBlobStore {
  pub fn new(config: CloudinaryConfig) -> anyhow::Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(REQUEST_TIMEOUT)
      .build()
      .context("building Cloudinary HTTP client")?;
    Ok(Self { client, config })
  }

  fn upload_url(&self) -> String {
    format!("{}/{}/image/upload", self.config.base_url, self.config.cloud_name)
  }

  /// Parameters that take part in the signature, sorted by name.
  fn signed_params(&self, timestamp: i64) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(2);
    if let Some(folder) = &self.config.upload_folder {
      params.push(("folder", folder.clone()));
    }
    params.push(("timestamp", timestamp.to_string()));
    params.sort_by(|a, b| a.0.cmp(b.0));
    params
  }

  /// `sha256("k1=v1&k2=v2" + api_secret)`, hex encoded.
  fn sign(&self, params: &[(&'static str, String)]) -> String {
    let to_sign = params
      .iter()
      .map(|(k, v)| format!("{k}={v}"))
      .collect::<Vec<_>>()
      .join("&");
    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(self.config.api_secret.as_bytes());
    hex::encode(hasher.finalize())
  }

  fn form_for(&self, file: &ImageFile, timestamp: i64) -> anyhow::Result<Form> {
    let params = self.signed_params(timestamp);
    let signature = self.sign(&params);

    let mut part = Part::bytes(file.bytes.to_vec()).file_name(file.file_name.clone());
    if let Some(content_type) = &file.content_type {
      part = part
        .mime_str(content_type)
        .with_context(|| format!("invalid content type '{content_type}'"))?;
    }

    let mut form = Form::new()
      .text("api_key", self.config.api_key.clone())
      .text("signature", signature)
      .text("signature_algorithm", "sha256");
    for (key, value) in params {
      form = form.text(key, value);
    }
    Ok(form.part("file", part))
  }
}

#[async_trait]
impl BlobStore for CloudinaryBlobStore {
  #[instrument(name = "CloudinaryBlobStore::upload", skip_all, fields(file_name = %file.file_name, size = file.len()))]
  async fn upload(&self, file: &ImageFile) -> anyhow::Result<StoredBlob> {
    let form = self.form_for(file, Utc::now().timestamp())?;

    let response = self
      .client
      .post(self.upload_url())
      .multipart(form)
      .send()
      .await
      .context("Cloudinary upload request failed")?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      let detail = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
      warn!(%status, %detail, "Cloudinary rejected upload.");
      return Err(anyhow!("Cloudinary rejected upload ({status}): {detail}"));
    }

    let uploaded: UploadResponse = response
      .json()
      .await
      .context("unreadable Cloudinary upload response")?;
    debug!(public_id = %uploaded.public_id, "Cloudinary upload stored.");
    Ok(StoredBlob {
      key: uploaded.public_id,
      url: uploaded.secure_url,
    })
  }
}
