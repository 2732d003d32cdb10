// stockroom/src/attachment/execution.rs

//! Running upload steps against the blob store.

use tracing::{event, instrument, span, Instrument, Level};

use super::definition::AttachmentPipeline;
use super::phase::UploadPhase;
use super::step::{plan, ImageSlot, UploadStep};
use super::uploads::ImageUploads;
use crate::blob::ImageFile;
use crate::error::{CatalogError, CatalogResult};
use crate::model::ImageFields;

impl AttachmentPipeline {
  /// Uploads the primary image, if one was given.
  pub async fn resolve_primary(&self, file: Option<&ImageFile>) -> CatalogResult<Option<String>> {
    let uploaded = self.run(plan(file, &[])).await?;
    Ok(uploaded.into_iter().next().map(|(_, url)| url))
  }

  /// Uploads gallery files in order. On the first failure nothing is returned.
  pub async fn resolve_gallery(&self, files: &[ImageFile]) -> CatalogResult<Vec<String>> {
    let uploaded = self.run(plan(None, files)).await?;
    Ok(uploaded.into_iter().map(|(_, url)| url).collect())
  }

  /// Resolves a whole request in one run: primary first, then the gallery.
  ///
  /// Only fields that had files come back as `Some`, so an update without files leaves
  /// the stored image fields untouched.
  pub async fn resolve(&self, uploads: &ImageUploads) -> CatalogResult<ImageFields> {
    if uploads.is_empty() {
      return Ok(ImageFields::none());
    }

    let uploaded = self.run(plan(uploads.primary(), uploads.gallery())).await?;

    let mut fields = ImageFields::none();
    let mut gallery = Vec::with_capacity(uploads.gallery().len());
    for (slot, url) in uploaded {
      match slot {
        ImageSlot::Primary => fields.primary = Some(url),
        ImageSlot::Gallery(_) => gallery.push(url),
      }
    }
    if !uploads.gallery().is_empty() {
      fields.gallery = Some(gallery);
    }
    Ok(fields)
  }

  /// Executes the steps one at a time, in order.
  ///
  /// Returns the `(slot, url)` of every step on success. The first failure ends the run
  /// with `UploadFailure`; URLs from earlier steps are discarded, not cleaned up.
  #[instrument(
    name = "AttachmentPipeline::run",
    skip_all,
    fields(num_steps = steps.len()),
    err(Display)
  )]
  async fn run(&self, steps: Vec<UploadStep<'_>>) -> CatalogResult<Vec<(ImageSlot, String)>> {
    self.notify(&UploadPhase::Pending { total: steps.len() });

    let mut uploaded: Vec<(ImageSlot, String)> = Vec::with_capacity(steps.len());
    for step in steps {
      let step_span = span!(
        Level::INFO,
        "upload_step",
        step_index = step.index,
        slot = %step.slot,
        file_name = %step.file.file_name,
        size = step.file.len()
      );
      self.notify(&UploadPhase::Uploading {
        index: step.index,
        slot: step.slot,
      });

      match self.blob_store.upload(step.file).instrument(step_span.clone()).await {
        Ok(blob) => {
          step_span.in_scope(|| event!(Level::DEBUG, url = %blob.url, "Upload stored."));
          uploaded.push((step.slot, blob.url));
        }
        Err(source) => {
          step_span.in_scope(|| {
            event!(
              Level::ERROR,
              error = %source,
              orphaned_blobs = uploaded.len(),
              "Upload failed, aborting remaining uploads."
            )
          });
          self.notify(&UploadPhase::Aborted {
            index: step.index,
            slot: step.slot,
          });
          return Err(CatalogError::UploadFailure {
            slot: step.slot,
            file_name: step.file.file_name.clone(),
            source,
          });
        }
      }
    }

    self.notify(&UploadPhase::Completed {
      uploaded: uploaded.len(),
    });
    event!(Level::DEBUG, uploaded = uploaded.len(), "Upload run completed.");
    Ok(uploaded)
  }
}
