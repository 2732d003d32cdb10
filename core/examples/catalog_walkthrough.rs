// stockroom/examples/catalog_walkthrough.rs

use std::sync::Arc;
use stockroom::{
  AttachmentPipeline, CatalogResult, CatalogService, Caller, ImageFile, ImageUploads, ListingParams, MemoryBlobStore,
  MemoryCatalogStore, ProductForm,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> CatalogResult<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Catalog Walkthrough ---");

  // 1. Build the shared clients once and hand them to the service.
  let blobs = Arc::new(MemoryBlobStore::new("https://cdn.example"));
  let mut attachments = AttachmentPipeline::new(blobs.clone());
  attachments.on_phase(|phase| info!(?phase, "upload phase"));
  let service = CatalogService::new(Arc::new(MemoryCatalogStore::new()), attachments);

  // 2. An admin creates a product from raw form values plus files.
  let mut form = ProductForm::default();
  form.set("name", "  Trail Runner  ".to_string());
  form.set("description", "Lightweight running shoe".to_string());
  form.set("price", "89.90".to_string());
  form.set("category", "Fashion".to_string());
  form.set("stock", "12".to_string());

  let uploads = ImageUploads::new(
    vec![ImageFile::new("runner.jpg", Some("image/jpeg".to_string()), vec![1u8; 64])],
    vec![
      ImageFile::new("side.jpg", None, vec![2u8; 64]),
      ImageFile::new("sole.jpg", None, vec![3u8; 64]),
    ],
  )?;
  let admin = Caller::admin();
  let created = service.create(&admin, form.into_fields()?, uploads).await?;
  info!(id = %created.id, name = %created.name, gallery = created.gallery_image_urls.len(), "created");

  // 3. A customer may read but not write.
  let customer = Caller::with_role("customer");
  if let Err(err) = service.delete(&customer, created.id).await {
    warn!(%err, "customer delete refused");
  }

  // 4. Listing with filters and paging.
  let params = ListingParams {
    category: Some("Fashion".to_string()),
    in_stock: Some("true".to_string()),
    sort_by: Some("price".to_string()),
    ..Default::default()
  };
  let page = service.list(&customer, &params).await?;
  info!(total = page.total_count, pages = page.total_pages, "listing");

  info!(stored_blobs = blobs.len(), "--- Walkthrough Finished ---");
  Ok(())
}
