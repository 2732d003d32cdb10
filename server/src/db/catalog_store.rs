// stockroom/server/src/db/catalog_store.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use stockroom::model::validate_product;
use stockroom::query::{MatchSpec, SortKey, SortOrder, SortSpec, StockFilter};
use stockroom::{
  CatalogError, CatalogResult, CatalogStore, Category, ImageFields, ListingQuery, Page, PageRequest, Product,
  ProductFields,
};
use tracing::{debug, instrument};
use uuid::Uuid;

const COLUMNS: &str =
  "id, name, description, price, category, stock, primary_image_url, gallery_image_urls, created_at, updated_at";

#[derive(Debug, FromRow)]
struct ProductRow {
  id: Uuid,
  name: String,
  description: String,
  price: f64,
  category: String,
  stock: i64,
  primary_image_url: Option<String>,
  gallery_image_urls: Vec<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
  type Error = CatalogError;

  fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
    let category = row
      .category
      .parse::<Category>()
      .map_err(|e| CatalogError::from(anyhow::Error::new(e).context(format!("corrupt row {}", row.id))))?;
    Ok(Product {
      id: row.id,
      name: row.name,
      description: row.description,
      price: row.price,
      category,
      stock: row.stock,
      primary_image_url: row.primary_image_url,
      gallery_image_urls: row.gallery_image_urls,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

fn db_error(err: sqlx::Error) -> CatalogError {
  CatalogError::Unknown { source: err.into() }
}

fn into_products(rows: Vec<ProductRow>) -> CatalogResult<Vec<Product>> {
  rows.into_iter().map(Product::try_from).collect()
}

/// Escapes `LIKE` wildcards so the needle matches literally.
fn like_pattern(needle: &str) -> String {
  let mut escaped = String::with_capacity(needle.len() + 2);
  escaped.push('%');
  for c in needle.chars() {
    if matches!(c, '\\' | '%' | '_') {
      escaped.push('\\');
    }
    escaped.push(c);
  }
  escaped.push('%');
  escaped
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, spec: &MatchSpec) {
  qb.push(" WHERE 1=1");
  if let Some(category) = &spec.category {
    qb.push(" AND category = ");
    qb.push_bind(category.clone());
  }
  if let Some(min) = spec.price.min {
    qb.push(" AND price >= ");
    qb.push_bind(min);
  }
  if let Some(max) = spec.price.max {
    qb.push(" AND price <= ");
    qb.push_bind(max);
  }
  match spec.stock {
    Some(StockFilter::InStock) => {
      qb.push(" AND stock > 0");
    }
    Some(StockFilter::OutOfStock) => {
      qb.push(" AND stock = 0");
    }
    None => {}
  }
  if let Some(needle) = &spec.name_contains {
    qb.push(" AND name ILIKE ");
    qb.push_bind(like_pattern(needle));
  }
}

/// Sort columns come from this fixed list only; text sorts by byte order.
fn sort_column(key: SortKey) -> &'static str {
  match key {
    SortKey::Name => "name COLLATE \"C\"",
    SortKey::Description => "description COLLATE \"C\"",
    SortKey::Price => "price",
    SortKey::Stock => "stock",
    SortKey::Category => "category COLLATE \"C\"",
    SortKey::CreatedAt => "created_at",
    SortKey::UpdatedAt => "updated_at",
  }
}

fn push_order(qb: &mut QueryBuilder<'_, Postgres>, sort: Option<SortSpec>) {
  qb.push(" ORDER BY ");
  if let Some(sort) = sort {
    qb.push(sort_column(sort.key));
    qb.push(match sort.order {
      SortOrder::Ascending => " ASC, ",
      SortOrder::Descending => " DESC, ",
    });
  }
  qb.push("created_at ASC, id ASC");
}

fn as_sql_i64(value: u64) -> i64 {
  i64::try_from(value).unwrap_or(i64::MAX)
}

/// PostgreSQL-backed catalog store. Store-native order is `created_at, id`.
#[derive(Clone, Debug)]
pub struct PostgresCatalogStore {
  pool: PgPool,
}

impl PostgresCatalogStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  fn pool(&self) -> &PgPool {
    &self.pool
  }
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
  #[instrument(name = "PostgresCatalogStore::create", skip_all, err(Display))]
  async fn create(&self, fields: ProductFields, images: ImageFields) -> CatalogResult<Product> {
    let product = fields
      .validate_for_create()?
      .into_product(Uuid::new_v4(), images, Utc::now());
    validate_product(&product)?;

    let row: ProductRow = sqlx::query_as(&format!(
      "INSERT INTO products ({COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {COLUMNS}"
    ))
    .bind(product.id)
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.price)
    .bind(product.category.as_str())
    .bind(product.stock)
    .bind(&product.primary_image_url)
    .bind(&product.gallery_image_urls)
    .bind(product.created_at)
    .bind(product.updated_at)
    .fetch_one(self.pool())
    .await
    .map_err(db_error)?;

    debug!(product_id = %row.id, "Product row inserted.");
    Product::try_from(row)
  }

  #[instrument(name = "PostgresCatalogStore::update", skip(self, fields, images), err(Display))]
  async fn update(&self, id: Uuid, fields: ProductFields, images: ImageFields) -> CatalogResult<Product> {
    let mut tx = self.pool().begin().await.map_err(db_error)?;

    let current: Option<ProductRow> =
      sqlx::query_as(&format!("SELECT {COLUMNS} FROM products WHERE id = $1 FOR UPDATE"))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error)?;
    let mut candidate = match current {
      Some(row) => Product::try_from(row)?,
      None => return Err(CatalogError::NotFound { id }),
    };

    fields.apply_to(&mut candidate)?;
    images.apply_to(&mut candidate);
    validate_product(&candidate)?;
    candidate.updated_at = Utc::now();

    let row: ProductRow = sqlx::query_as(&format!(
      "UPDATE products SET name = $2, description = $3, price = $4, category = $5, stock = $6, \
       primary_image_url = $7, gallery_image_urls = $8, updated_at = $9 WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(&candidate.name)
    .bind(&candidate.description)
    .bind(candidate.price)
    .bind(candidate.category.as_str())
    .bind(candidate.stock)
    .bind(&candidate.primary_image_url)
    .bind(&candidate.gallery_image_urls)
    .bind(candidate.updated_at)
    .fetch_one(&mut *tx)
    .await
    .map_err(db_error)?;

    tx.commit().await.map_err(db_error)?;
    Product::try_from(row)
  }

  #[instrument(name = "PostgresCatalogStore::delete", skip(self), err(Display))]
  async fn delete(&self, id: Uuid) -> CatalogResult<Product> {
    let row: Option<ProductRow> = sqlx::query_as(&format!("DELETE FROM products WHERE id = $1 RETURNING {COLUMNS}"))
      .bind(id)
      .fetch_optional(self.pool())
      .await
      .map_err(db_error)?;
    row.ok_or(CatalogError::NotFound { id }).and_then(Product::try_from)
  }

  async fn get_by_id(&self, id: Uuid) -> CatalogResult<Product> {
    let row: Option<ProductRow> = sqlx::query_as(&format!("SELECT {COLUMNS} FROM products WHERE id = $1"))
      .bind(id)
      .fetch_optional(self.pool())
      .await
      .map_err(db_error)?;
    row.ok_or(CatalogError::NotFound { id }).and_then(Product::try_from)
  }

  #[instrument(name = "PostgresCatalogStore::list", skip_all, fields(page = page.page(), limit = page.limit()))]
  async fn list(&self, query: &ListingQuery, page: PageRequest) -> CatalogResult<Page<Product>> {
    let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
    push_filters(&mut count, &query.filter);
    let total: i64 = count
      .build_query_scalar()
      .fetch_one(self.pool())
      .await
      .map_err(db_error)?;

    let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM products"));
    push_filters(&mut select, &query.filter);
    push_order(&mut select, query.sort);
    select.push(" LIMIT ");
    select.push_bind(as_sql_i64(page.limit()));
    select.push(" OFFSET ");
    select.push_bind(as_sql_i64(page.offset()));
    let rows: Vec<ProductRow> = select
      .build_query_as()
      .fetch_all(self.pool())
      .await
      .map_err(db_error)?;

    let total = u64::try_from(total).unwrap_or_default();
    Ok(page.page_of(into_products(rows)?, total))
  }

  #[instrument(name = "PostgresCatalogStore::find", skip_all)]
  async fn find(&self, query: &ListingQuery) -> CatalogResult<Vec<Product>> {
    let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM products"));
    push_filters(&mut select, &query.filter);
    push_order(&mut select, query.sort);
    let rows: Vec<ProductRow> = select
      .build_query_as()
      .fetch_all(self.pool())
      .await
      .map_err(db_error)?;
    into_products(rows)
  }
}
