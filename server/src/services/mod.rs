// stockroom/server/src/services/mod.rs

// Clients for external services, built once at startup.
pub mod cloudinary;

pub use cloudinary::CloudinaryBlobStore;
