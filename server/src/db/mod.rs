// stockroom/server/src/db/mod.rs

pub mod catalog_store;

pub use catalog_store::PostgresCatalogStore;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::AppConfig;
use crate::errors::Result;

const CREATE_PRODUCTS_TABLE: &str = r#"
  CREATE TABLE IF NOT EXISTS products (
    id                 UUID PRIMARY KEY,
    name               VARCHAR(100) NOT NULL,
    description        VARCHAR(1000) NOT NULL,
    price              DOUBLE PRECISION NOT NULL CHECK (price >= 0),
    category           TEXT NOT NULL DEFAULT 'Other',
    stock              BIGINT NOT NULL DEFAULT 0 CHECK (stock >= 0),
    primary_image_url  TEXT,
    gallery_image_urls TEXT[] NOT NULL DEFAULT '{}',
    created_at         TIMESTAMPTZ NOT NULL,
    updated_at         TIMESTAMPTZ NOT NULL
  )
"#;

const CREATE_CREATED_AT_INDEX: &str =
  "CREATE INDEX IF NOT EXISTS products_created_at_idx ON products (created_at, id)";

pub async fn connect(config: &AppConfig) -> Result<PgPool> {
  let pool = PgPoolOptions::new()
    .max_connections(config.db_max_connections)
    .connect(&config.database_url)
    .await?;
  info!(max_connections = config.db_max_connections, "Successfully connected to the database.");
  Ok(pool)
}

/// Creates the `products` table and its ordering index when missing.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
  sqlx::query(CREATE_PRODUCTS_TABLE).execute(pool).await?;
  sqlx::query(CREATE_CREATED_AT_INDEX).execute(pool).await?;
  info!("Database schema is ready.");
  Ok(())
}
