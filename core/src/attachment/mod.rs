// stockroom/src/attachment/mod.rs

//! The image attachment pipeline: uploads a request's primary image and gallery to the
//! blob store, strictly one after another, and hands the resulting URLs to the catalog store.
//!
//! A run is an ordered list of upload steps (primary first, then gallery files in
//! submission order). The first failing step aborts the run; URLs obtained by earlier
//! steps are dropped and their blobs stay orphaned in the blob store.

pub mod definition;
pub mod execution;
pub mod hooks;
pub mod phase;
pub mod step;
pub mod uploads;

pub use definition::AttachmentPipeline;
pub use hooks::PhaseHook;
pub use phase::UploadPhase;
pub use step::{ImageSlot, UploadStep};
pub use uploads::{ImageUploads, MAX_GALLERY_IMAGES, MAX_PRIMARY_IMAGES};
