// stockroom/server/src/web/mod.rs

pub mod envelope;
pub mod handlers;
pub mod identity;
pub mod multipart;
pub mod routes;

pub use routes::configure_app_routes;
