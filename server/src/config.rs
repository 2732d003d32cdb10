// stockroom/server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::fmt;

pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct CloudinaryConfig {
  pub cloud_name: String,
  pub api_key: String,
  pub api_secret: String,
  pub upload_folder: Option<String>,
  pub base_url: String,
}

impl fmt::Debug for CloudinaryConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CloudinaryConfig")
      .field("cloud_name", &self.cloud_name)
      .field("api_key", &"[REDACTED]")
      .field("api_secret", &"[REDACTED]")
      .field("upload_folder", &self.upload_folder)
      .field("base_url", &self.base_url)
      .finish()
  }
}

#[derive(Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub db_max_connections: u32,
  pub cloudinary: CloudinaryConfig,
  /// Per-file limit for multipart uploads.
  pub max_image_bytes: usize,
}

impl fmt::Debug for AppConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AppConfig")
      .field("server_host", &self.server_host)
      .field("server_port", &self.server_port)
      .field("database_url", &"[REDACTED]")
      .field("db_max_connections", &self.db_max_connections)
      .field("cloudinary", &self.cloudinary)
      .field("max_image_bytes", &self.max_image_bytes)
      .finish()
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source. Empty values count as unset.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_env = |var_name: &str| {
      lookup(var_name)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Config(format!("Missing environment variable '{}'", var_name)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("PORT")
      .unwrap_or_else(|_| "5000".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL")?;
    let db_max_connections = get_env("DB_MAX_CONNECTIONS")
      .unwrap_or_else(|_| "5".to_string())
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DB_MAX_CONNECTIONS: {}", e)))?;

    let cloudinary = CloudinaryConfig {
      cloud_name: get_env("CLOUDINARY_API_NAME")?,
      api_key: get_env("CLOUDINARY_API_KEY")?,
      api_secret: get_env("CLOUDINARY_API_SECRET")?,
      upload_folder: get_env("CLOUDINARY_UPLOAD_FOLDER").ok(),
      base_url: get_env("CLOUDINARY_BASE_URL")
        .unwrap_or_else(|_| "https://api.cloudinary.com/v1_1".to_string())
        .trim_end_matches('/')
        .to_string(),
    };

    let max_image_bytes = match get_env("MAX_IMAGE_BYTES") {
      Ok(raw) => raw
        .parse::<usize>()
        .map_err(|e| AppError::Config(format!("Invalid MAX_IMAGE_BYTES: {}", e)))?,
      Err(_) => DEFAULT_MAX_IMAGE_BYTES,
    };

    let config = Self {
      server_host,
      server_port,
      database_url,
      db_max_connections,
      cloudinary,
      max_image_bytes,
    };
    tracing::info!("Application configuration loaded successfully.");
    tracing::debug!(config = ?config, "Loaded config details");
    Ok(config)
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

#[cfg(test)]
impl AppConfig {
  pub fn for_tests() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 0,
      database_url: "postgres://unused".to_string(),
      db_max_connections: 1,
      cloudinary: CloudinaryConfig {
        cloud_name: "demo".to_string(),
        api_key: "key".to_string(),
        api_secret: "secret".to_string(),
        upload_folder: None,
        base_url: "http://127.0.0.1:9".to_string(),
      },
      max_image_bytes: 1024,
    }
  }
}
