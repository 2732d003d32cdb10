// stockroom/src/attachment/uploads.rs

use crate::blob::ImageFile;
use crate::error::{CatalogError, CatalogResult, FieldViolation};

/// Files accepted under the `image` field.
pub const MAX_PRIMARY_IMAGES: usize = 1;
/// Files accepted under the `images` field.
pub const MAX_GALLERY_IMAGES: usize = 10;

/// The image files submitted with one write request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageUploads {
  primary: Option<ImageFile>,
  gallery: Vec<ImageFile>,
}

impl ImageUploads {
  pub fn none() -> Self {
    Self::default()
  }

  /// Checks the per-field file counts before anything is uploaded.
  pub fn new(primary: Vec<ImageFile>, gallery: Vec<ImageFile>) -> CatalogResult<Self> {
    let mut violations = Vec::new();
    if primary.len() > MAX_PRIMARY_IMAGES {
      violations.push(FieldViolation::new(
        "image",
        format!("At most {MAX_PRIMARY_IMAGES} primary image may be uploaded, got {}", primary.len()),
      ));
    }
    if gallery.len() > MAX_GALLERY_IMAGES {
      violations.push(FieldViolation::new(
        "images",
        format!("At most {MAX_GALLERY_IMAGES} gallery images may be uploaded, got {}", gallery.len()),
      ));
    }
    CatalogError::from_violations(violations)?;

    Ok(Self {
      primary: primary.into_iter().next(),
      gallery,
    })
  }

  pub fn with_primary(mut self, file: ImageFile) -> Self {
    self.primary = Some(file);
    self
  }

  pub fn primary(&self) -> Option<&ImageFile> {
    self.primary.as_ref()
  }

  pub fn gallery(&self) -> &[ImageFile] {
    &self.gallery
  }

  pub fn is_empty(&self) -> bool {
    self.primary.is_none() && self.gallery.is_empty()
  }

  pub fn file_count(&self) -> usize {
    usize::from(self.primary.is_some()) + self.gallery.len()
  }
}
