// stockroom/src/lib.rs

//! Stockroom: the core of a product catalog service.
//!
//! It covers:
//!  - A validated product model with a fixed category enumeration.
//!  - A catalog store port, with an in-memory implementation.
//!  - A query engine turning loose listing parameters into a match+sort spec.
//!  - Page slicing with totals.
//!  - An image attachment pipeline that uploads a primary image and an ordered gallery to
//!    a blob store, aborting on the first failed upload.
//!  - An access gate that reserves mutations for the `admin` role.
//!
//! HTTP, identity and concrete storage backends live in the application crate.

pub mod access;
pub mod attachment;
pub mod blob;
pub mod error;
pub mod model;
pub mod pagination;
pub mod query;
pub mod service;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::access::{AccessDecision, AccessGate, Action, Caller, ADMIN_ROLE};
pub use crate::attachment::{AttachmentPipeline, ImageSlot, ImageUploads, UploadPhase, MAX_GALLERY_IMAGES};
pub use crate::blob::{BlobStore, ImageFile, MemoryBlobStore, StoredBlob};
pub use crate::error::{CatalogError, CatalogResult, ErrorKind, FieldViolation};
pub use crate::model::{Category, ImageFields, Product, ProductFields, ProductForm};
pub use crate::pagination::{Page, PageRequest};
pub use crate::query::{ListingParams, ListingQuery, MatchSpec, SortKey, SortOrder, SortSpec, StockFilter};
pub use crate::service::{CatalogService, FilteredProducts};
pub use crate::store::{CatalogStore, MemoryCatalogStore};

/*
    Request flow:
    1. Transport parses a `ProductForm` + files, or `ListingParams`, and finds the `Caller`.
    2. `CatalogService` asks the `AccessGate`; mutations need the admin role.
    3. Writes with files go through `AttachmentPipeline::resolve`, one upload at a time.
    4. The `CatalogStore` validates and persists, or runs the `ListingQuery` and slices a `Page`.
*/
