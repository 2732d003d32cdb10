// stockroom/server/src/web/handlers/product_handlers.rs

use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use stockroom::{Action, ImageUploads, ListingParams, ProductFields};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::{AppError, Operation, OperationContext, Result};
use crate::state::AppState;
use crate::web::envelope::ApiResponse;
use crate::web::identity::CallerIdentity;
use crate::web::multipart::read_product_submission;

fn parse_product_id(raw: &str) -> Result<Uuid> {
  Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("'{raw}' is not a valid product id")))
}

/// Reads the multipart body into typed fields and counted uploads.
async fn read_write_request(
  app_state: &AppState,
  req: &HttpRequest,
  payload: web::Payload,
  op: Operation,
) -> Result<(ProductFields, ImageUploads)> {
  let multipart = Multipart::new(req.headers(), payload);
  let submission = read_product_submission(multipart, app_state.config.max_image_bytes).await?;
  let uploads = ImageUploads::new(submission.primary, submission.gallery).during(op)?;
  let fields = submission.form.into_fields().during(op)?;
  Ok((fields, uploads))
}

#[instrument(name = "handler::create_product", skip_all, fields(role = ?caller.0.role()))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  caller: CallerIdentity,
  req: HttpRequest,
  payload: web::Payload,
) -> Result<HttpResponse> {
  let op = Operation::Add;
  let caller = caller.into_inner();
  app_state.catalog.authorize(&caller, Action::Create).during(op)?;

  let (fields, uploads) = read_write_request(&app_state, &req, payload, op).await?;
  let product = app_state.catalog.create(&caller, fields, uploads).await.during(op)?;

  info!(product_id = %product.id, "Product added.");
  Ok(HttpResponse::Created().json(ApiResponse::ok("Product added successfully", product)))
}

#[instrument(name = "handler::update_product", skip_all, fields(product_id = %path.as_str(), role = ?caller.0.role()))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  caller: CallerIdentity,
  path: web::Path<String>,
  req: HttpRequest,
  payload: web::Payload,
) -> Result<HttpResponse> {
  let op = Operation::Update;
  let caller = caller.into_inner();
  app_state.catalog.authorize(&caller, Action::Update).during(op)?;
  let id = parse_product_id(&path)?;

  let (fields, uploads) = read_write_request(&app_state, &req, payload, op).await?;
  let product = app_state.catalog.update(&caller, id, fields, uploads).await.during(op)?;

  Ok(HttpResponse::Ok().json(ApiResponse::ok("Product updated successfully", product)))
}

#[instrument(name = "handler::delete_product", skip_all, fields(product_id = %path.as_str(), role = ?caller.0.role()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  caller: CallerIdentity,
  path: web::Path<String>,
) -> Result<HttpResponse> {
  let op = Operation::Delete;
  let caller = caller.into_inner();
  app_state.catalog.authorize(&caller, Action::Delete).during(op)?;
  let id = parse_product_id(&path)?;

  let product = app_state.catalog.delete(&caller, id).await.during(op)?;
  Ok(HttpResponse::Ok().json(ApiResponse::ok("Product deleted successfully", product)))
}

#[instrument(name = "handler::get_product", skip_all, fields(product_id = %path.as_str()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  caller: CallerIdentity,
  path: web::Path<String>,
) -> Result<HttpResponse> {
  let id = parse_product_id(&path)?;
  let product = app_state
    .catalog
    .get(&caller.into_inner(), id)
    .await
    .during(Operation::FetchOne)?;
  Ok(HttpResponse::Ok().json(ApiResponse::ok("Product fetched successfully", product)))
}

#[instrument(name = "handler::list_products", skip_all)]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  caller: CallerIdentity,
  query_params: web::Query<ListingParams>,
) -> Result<HttpResponse> {
  let page = app_state
    .catalog
    .list(&caller.into_inner(), &query_params)
    .await
    .during(Operation::FetchMany)?;
  info!(returned = page.items.len(), total = page.total_count, "Products listed.");
  Ok(HttpResponse::Ok().json(ApiResponse::ok("Products fetched successfully", page)))
}

#[instrument(name = "handler::filter_products", skip_all)]
pub async fn filter_products_handler(
  app_state: web::Data<AppState>,
  caller: CallerIdentity,
  query_params: web::Query<ListingParams>,
) -> Result<HttpResponse> {
  let filtered = app_state
    .catalog
    .filter(&caller.into_inner(), &query_params)
    .await
    .during(Operation::FetchMany)?;
  Ok(HttpResponse::Ok().json(ApiResponse::ok("Products fetched successfully", filtered)))
}
