// stockroom/server/src/web/routes.rs

use actix_web::web;

use crate::errors::AppError;
use crate::web::handlers::product_handlers;

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// This function will be called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  // Query string errors get the same envelope as every other failure.
  cfg.app_data(
    web::QueryConfig::default().error_handler(|err, _req| AppError::BadRequest(format!("Invalid query string: {err}")).into()),
  );
  cfg.service(
    web::scope("/api")
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/product")
          .route("", web::post().to(product_handlers::create_product_handler))
          .route("", web::get().to(product_handlers::list_products_handler))
          // Registered before `/{product_id}` so it is not read as an id.
          .route("/filter", web::get().to(product_handlers::filter_products_handler))
          .route("/{product_id}", web::get().to(product_handlers::get_product_handler))
          .route("/{product_id}", web::put().to(product_handlers::update_product_handler))
          .route("/{product_id}", web::delete().to(product_handlers::delete_product_handler)),
      ),
  );
}
