// tests/service_scenarios_tests.rs
mod common;

use common::*;
use serial_test::serial;
use stockroom::{Caller, Category, ErrorKind, ImageSlot, ImageUploads, ProductFields, ProductForm};

#[tokio::test]
#[serial]
async fn test_create_without_files_has_no_images() {
  setup_tracing();
  let h = harness(FlakyBlobStore::reliable());

  let product = h
    .service
    .create(&Caller::admin(), fields("Pen", 1.5, "Other", 10), ImageUploads::none())
    .await
    .unwrap();

  assert_eq!(product.primary_image_url, None);
  assert!(product.gallery_image_urls.is_empty());
  assert_eq!(product.stock, 10);
  assert_eq!(product.category, Category::Other);
  assert_eq!(product.created_at, product.updated_at);
  assert_eq!(h.blobs.attempts(), 0);
  assert_eq!(h.store.len(), 1);
}

#[tokio::test]
#[serial]
async fn test_create_from_a_form_trims_the_name_and_applies_defaults() {
  setup_tracing();
  let h = harness(FlakyBlobStore::reliable());

  let mut form = ProductForm::default();
  form.set("name", "  Desk Lamp  ".to_string());
  form.set("description", "Warm light".to_string());
  form.set("price", "24.99".to_string());

  let product = h
    .service
    .create(&Caller::admin(), form.into_fields().unwrap(), ImageUploads::none())
    .await
    .unwrap();

  assert_eq!(product.name, "Desk Lamp");
  assert_eq!(product.category, Category::Other);
  assert_eq!(product.stock, 0);
}

#[tokio::test]
#[serial]
async fn test_create_missing_price_is_a_validation_error_and_uploads_nothing() {
  setup_tracing();
  let h = harness(FlakyBlobStore::reliable());
  let mut input = fields("Pen", 1.5, "Other", 10);
  input.price = None;

  let err = h
    .service
    .create(&Caller::admin(), input, ImageUploads::none().with_primary(png("pen.png")))
    .await
    .unwrap_err();

  assert_eq!(err.kind(), ErrorKind::Validation);
  assert_eq!(err.violations()[0].field, "price");
  assert_eq!(h.blobs.attempts(), 0);
  assert!(h.store.is_empty());
}

#[tokio::test]
#[serial]
async fn test_non_admin_cannot_create() {
  setup_tracing();
  let h = harness(FlakyBlobStore::reliable());

  for caller in [Caller::anonymous(), Caller::with_role("customer")] {
    let err = h
      .service
      .create(&caller, fields("Pen", 1.5, "Other", 10), ImageUploads::none())
      .await
      .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AccessDenied);
  }
  assert!(h.store.is_empty());
}

#[tokio::test]
#[serial]
async fn test_non_admin_update_leaves_the_product_unchanged() {
  setup_tracing();
  let h = harness(FlakyBlobStore::reliable());
  let created = h
    .service
    .create(&Caller::admin(), fields("Pen", 1.5, "Other", 10), ImageUploads::none())
    .await
    .unwrap();

  let patch = ProductFields {
    price: Some(99.0),
    ..Default::default()
  };
  let err = h
    .service
    .update(&Caller::with_role("customer"), created.id, patch, ImageUploads::none().with_primary(png("x.png")))
    .await
    .unwrap_err();

  assert_eq!(err.kind(), ErrorKind::AccessDenied);
  assert_eq!(h.blobs.attempts(), 0);
  let stored = h.service.get(&Caller::anonymous(), created.id).await.unwrap();
  assert_eq!(stored, created);
}

#[tokio::test]
#[serial]
async fn test_non_admin_cannot_delete() {
  setup_tracing();
  let h = harness(FlakyBlobStore::reliable());
  let created = h
    .service
    .create(&Caller::admin(), fields("Pen", 1.5, "Other", 10), ImageUploads::none())
    .await
    .unwrap();

  let err = h.service.delete(&Caller::anonymous(), created.id).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::AccessDenied);
  assert_eq!(h.store.len(), 1);
}

#[tokio::test]
#[serial]
async fn test_failed_gallery_upload_on_create_persists_nothing() {
  setup_tracing();
  let h = harness(FlakyBlobStore::failing_at(1));
  let uploads = ImageUploads::new(Vec::new(), pngs("g", 3)).unwrap();

  let err = h
    .service
    .create(&Caller::admin(), fields("Pen", 1.5, "Other", 10), uploads)
    .await
    .unwrap_err();

  assert_eq!(err.kind(), ErrorKind::UploadFailure);
  match err {
    stockroom::CatalogError::UploadFailure { slot, file_name, .. } => {
      assert_eq!(slot, ImageSlot::Gallery(1));
      assert_eq!(file_name, "g1.png");
    }
    other => panic!("unexpected error: {other}"),
  }
  assert_eq!(h.blobs.seen(), vec!["g0.png", "g1.png"]);
  assert!(h.store.is_empty());
}

#[tokio::test]
#[serial]
async fn test_failed_gallery_upload_on_update_keeps_the_old_gallery() {
  setup_tracing();
  let h = harness(FlakyBlobStore::failing_at(3));
  let created = h
    .service
    .create(
      &Caller::admin(),
      fields("Pen", 1.5, "Other", 10),
      ImageUploads::new(Vec::new(), pngs("old", 2)).unwrap(),
    )
    .await
    .unwrap();
  assert_eq!(created.gallery_image_urls.len(), 2);

  // Attempts 0 and 1 were the create; the update's second file is attempt 3.
  let err = h
    .service
    .update(
      &Caller::admin(),
      created.id,
      ProductFields::default(),
      ImageUploads::new(Vec::new(), pngs("new", 3)).unwrap(),
    )
    .await
    .unwrap_err();

  assert_eq!(err.kind(), ErrorKind::UploadFailure);
  assert_eq!(h.blobs.attempts(), 4);
  let stored = h.service.get(&Caller::anonymous(), created.id).await.unwrap();
  assert_eq!(stored.gallery_image_urls, created.gallery_image_urls);
}

#[tokio::test]
#[serial]
async fn test_partial_update_without_files_keeps_images() {
  setup_tracing();
  let h = harness(FlakyBlobStore::reliable());
  let uploads = ImageUploads::new(vec![png("main.png")], pngs("g", 2)).unwrap();
  let created = h
    .service
    .create(&Caller::admin(), fields("Pen", 1.5, "Books", 10), uploads)
    .await
    .unwrap();

  let patch = ProductFields {
    stock: Some(0),
    ..Default::default()
  };
  let updated = h
    .service
    .update(&Caller::admin(), created.id, patch, ImageUploads::none())
    .await
    .unwrap();

  assert_eq!(updated.stock, 0);
  assert_eq!(updated.name, "Pen");
  assert_eq!(updated.category, Category::Books);
  assert_eq!(updated.primary_image_url, created.primary_image_url);
  assert_eq!(updated.gallery_image_urls, created.gallery_image_urls);
  assert_eq!(updated.created_at, created.created_at);
  assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
#[serial]
async fn test_update_replaces_only_the_supplied_image_field() {
  setup_tracing();
  let h = harness(FlakyBlobStore::reliable());
  let created = h
    .service
    .create(
      &Caller::admin(),
      fields("Pen", 1.5, "Other", 1),
      ImageUploads::new(vec![png("main.png")], pngs("g", 3)).unwrap(),
    )
    .await
    .unwrap();

  let updated = h
    .service
    .update(
      &Caller::admin(),
      created.id,
      ProductFields::default(),
      ImageUploads::none().with_primary(png("main2.png")),
    )
    .await
    .unwrap();

  assert_ne!(updated.primary_image_url, created.primary_image_url);
  assert!(updated.primary_image_url.as_deref().unwrap_or_default().ends_with("/main2.png"));
  assert_eq!(updated.gallery_image_urls, created.gallery_image_urls);
}

#[tokio::test]
#[serial]
async fn test_invalid_update_is_rejected_without_writing() {
  setup_tracing();
  let h = harness(FlakyBlobStore::reliable());
  let created = h
    .service
    .create(&Caller::admin(), fields("Pen", 1.5, "Other", 1), ImageUploads::none())
    .await
    .unwrap();

  let patch = ProductFields {
    price: Some(-1.0),
    category: Some("Gadgets".to_string()),
    ..Default::default()
  };
  let err = h
    .service
    .update(&Caller::admin(), created.id, patch, ImageUploads::none())
    .await
    .unwrap_err();

  assert_eq!(err.kind(), ErrorKind::Validation);
  let fields: Vec<_> = err.violations().iter().map(|v| v.field).collect();
  assert!(fields.contains(&"price"));
  assert!(fields.contains(&"category"));
  assert_eq!(h.service.get(&Caller::anonymous(), created.id).await.unwrap(), created);
}

#[tokio::test]
#[serial]
async fn test_update_of_unknown_id_uploads_first_then_reports_not_found() {
  setup_tracing();
  let h = harness(FlakyBlobStore::reliable());
  let missing = uuid::Uuid::new_v4();

  let err = h
    .service
    .update(
      &Caller::admin(),
      missing,
      ProductFields::default(),
      ImageUploads::none().with_primary(png("orphan.png")),
    )
    .await
    .unwrap_err();

  assert_eq!(err.kind(), ErrorKind::NotFound);
  assert_eq!(h.blobs.stored(), 1);
}

#[tokio::test]
#[serial]
async fn test_delete_returns_the_product_then_it_is_gone() {
  setup_tracing();
  let h = harness(FlakyBlobStore::reliable());
  let created = h
    .service
    .create(&Caller::admin(), fields("Pen", 1.5, "Other", 1), ImageUploads::none())
    .await
    .unwrap();

  let deleted = h.service.delete(&Caller::admin(), created.id).await.unwrap();
  assert_eq!(deleted.id, created.id);

  let err = h.service.get(&Caller::admin(), created.id).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
  let err = h.service.delete(&Caller::admin(), created.id).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
}
