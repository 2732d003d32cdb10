// stockroom/server/src/web/multipart.rs

//! Reading `multipart/form-data` product submissions.

use actix_multipart::{Field, Multipart};
use bytes::BytesMut;
use futures_util::TryStreamExt;
use stockroom::{ImageFile, ProductForm};
use tracing::{debug, instrument};

use crate::errors::{AppError, Result};

pub const PRIMARY_FIELD: &str = "image";
pub const GALLERY_FIELD: &str = "images";

const TEXT_FIELD_LIMIT: usize = 64 * 1024;

/// Text fields plus the raw file lists, in the order the client sent them.
/// File counts are checked later, by `ImageUploads::new`.
#[derive(Debug, Default)]
pub struct ProductSubmission {
  pub form: ProductForm,
  pub primary: Vec<ImageFile>,
  pub gallery: Vec<ImageFile>,
}

#[instrument(name = "multipart::read_product_submission", skip_all, fields(max_file_bytes = max_file_bytes))]
pub async fn read_product_submission(mut payload: Multipart, max_file_bytes: usize) -> Result<ProductSubmission> {
  let mut submission = ProductSubmission::default();

  while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
    let name = field.name().unwrap_or_default().to_string();
    match name.as_str() {
      PRIMARY_FIELD | GALLERY_FIELD => {
        let Some(file) = read_file(&mut field, &name, max_file_bytes).await? else {
          debug!(field = %name, "Skipping file part with no file selected.");
          continue;
        };
        debug!(field = %name, file_name = %file.file_name, size = file.len(), "File part received.");
        if name == PRIMARY_FIELD {
          submission.primary.push(file);
        } else {
          submission.gallery.push(file);
        }
      }
      _ => {
        let bytes = read_limited(&mut field, &name, TEXT_FIELD_LIMIT).await?;
        let value = String::from_utf8(bytes.to_vec())
          .map_err(|_| AppError::BadRequest(format!("Field '{name}' is not valid UTF-8")))?;
        if !submission.form.set(&name, value) {
          debug!(field = %name, "Ignoring unknown form field.");
        }
      }
    }
  }

  Ok(submission)
}

/// Reads one file part. A part without a file name and without content is what a browser sends for an
/// untouched file input, so it yields `None`. A named file with no content is still rejected.
async fn read_file(field: &mut Field, name: &str, limit: usize) -> Result<Option<ImageFile>> {
  let file_name = field
    .content_disposition()
    .and_then(|cd| cd.get_filename())
    .filter(|f| !f.is_empty())
    .map(str::to_string);
  let content_type = field.content_type().map(|mime| mime.to_string());
  let bytes = read_limited(field, name, limit).await?;
  match (file_name, bytes.is_empty()) {
    (None, true) => Ok(None),
    (Some(file_name), true) => Err(AppError::BadRequest(format!(
      "File '{file_name}' in field '{name}' is empty"
    ))),
    (file_name, false) => Ok(Some(ImageFile::new(
      file_name.unwrap_or_else(|| name.to_string()),
      content_type,
      bytes.freeze(),
    ))),
  }
}

async fn read_limited(field: &mut Field, name: &str, limit: usize) -> Result<BytesMut> {
  let mut buf = BytesMut::new();
  while let Some(chunk) = field.try_next().await.map_err(malformed)? {
    if buf.len() + chunk.len() > limit {
      return Err(AppError::BadRequest(format!("Field '{name}' exceeds {limit} bytes")));
    }
    buf.extend_from_slice(&chunk);
  }
  Ok(buf)
}

fn malformed(err: actix_multipart::MultipartError) -> AppError {
  AppError::BadRequest(format!("Malformed multipart body: {err}"))
}
