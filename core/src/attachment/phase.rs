// stockroom/src/attachment/phase.rs

//! Run phases: `Pending -> Uploading(0..n) -> Completed | Aborted`.

use super::step::ImageSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
  /// The run has its steps laid out and nothing has been sent yet.
  Pending { total: usize },
  /// Step `index` is being uploaded.
  Uploading { index: usize, slot: ImageSlot },
  /// Every step succeeded.
  Completed { uploaded: usize },
  /// Step `index` failed; no later step ran.
  Aborted { index: usize, slot: ImageSlot },
}

impl UploadPhase {
  pub fn is_terminal(&self) -> bool {
    matches!(self, UploadPhase::Completed { .. } | UploadPhase::Aborted { .. })
  }

  /// Whether `next` may directly follow `self`.
  pub fn can_advance_to(&self, next: &UploadPhase) -> bool {
    match (self, next) {
      (UploadPhase::Pending { total }, UploadPhase::Uploading { index: 0, .. }) => *total > 0,
      (UploadPhase::Pending { total: 0 }, UploadPhase::Completed { uploaded: 0 }) => true,
      (UploadPhase::Uploading { index, .. }, UploadPhase::Uploading { index: next, .. }) => *next == index + 1,
      (UploadPhase::Uploading { index, .. }, UploadPhase::Aborted { index: failed, .. }) => index == failed,
      (UploadPhase::Uploading { index, .. }, UploadPhase::Completed { uploaded }) => *uploaded == index + 1,
      _ => false,
    }
  }
}
