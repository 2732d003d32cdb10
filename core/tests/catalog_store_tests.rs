// tests/catalog_store_tests.rs
mod common;

use common::*;
use serial_test::serial;
use stockroom::query::{MatchSpec, SortKey, SortOrder, SortSpec};
use stockroom::{CatalogStore, ErrorKind, ImageFields, ListingQuery, MemoryCatalogStore, PageRequest, ProductFields};
use uuid::Uuid;

#[tokio::test]
#[serial]
async fn test_store_assigns_ids_and_timestamps() {
  setup_tracing();
  let store = MemoryCatalogStore::new();

  let a = store.create(fields("A", 1.0, "Toys", 1), ImageFields::none()).await.unwrap();
  let b = store.create(fields("B", 2.0, "Toys", 1), ImageFields::none()).await.unwrap();

  assert_ne!(a.id, b.id);
  assert_eq!(a.created_at, a.updated_at);
  assert_eq!(store.get_by_id(b.id).await.unwrap(), b);
}

#[tokio::test]
#[serial]
async fn test_store_rejects_invalid_entities_on_its_own() {
  setup_tracing();
  let store = MemoryCatalogStore::new();

  let too_long = "x".repeat(101);
  let err = store
    .create(fields(&too_long, -3.0, "Toys", -1), ImageFields::none())
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Validation);
  let fields: Vec<_> = err.violations().iter().map(|v| v.field).collect();
  assert_eq!(fields, vec!["name", "price", "stock"]);
  assert!(store.is_empty());
}

#[tokio::test]
#[serial]
async fn test_name_limits_count_characters_after_trimming() {
  setup_tracing();
  let store = MemoryCatalogStore::new();

  let hundred_wide = "é".repeat(100);
  let padded = format!("   {hundred_wide}   ");
  let product = store.create(fields(&padded, 1.0, "Home", 0), ImageFields::none()).await.unwrap();
  assert_eq!(product.name, hundred_wide);

  let blank = store.create(fields("    ", 1.0, "Home", 0), ImageFields::none()).await.unwrap_err();
  assert_eq!(blank.violations()[0].field, "name");
}

#[tokio::test]
#[serial]
async fn test_update_of_unknown_id_writes_nothing() {
  setup_tracing();
  let store = MemoryCatalogStore::new();
  store.create(fields("A", 1.0, "Toys", 1), ImageFields::none()).await.unwrap();
  let before = store.snapshot();

  let err = store
    .update(Uuid::new_v4(), ProductFields::default(), ImageFields::none())
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
  assert_eq!(store.snapshot(), before);
}

#[tokio::test]
#[serial]
async fn test_failed_update_keeps_the_stored_entity() {
  setup_tracing();
  let store = MemoryCatalogStore::new();
  let created = store.create(fields("A", 1.0, "Toys", 1), ImageFields::none()).await.unwrap();

  let patch = ProductFields {
    name: Some("Renamed".to_string()),
    stock: Some(-5),
    ..Default::default()
  };
  let images = ImageFields {
    primary: Some("https://blobs.test/new.png".to_string()),
    gallery: None,
  };
  assert!(store.update(created.id, patch, images).await.is_err());
  assert_eq!(store.get_by_id(created.id).await.unwrap(), created);
}

#[tokio::test]
#[serial]
async fn test_list_and_find_agree_on_order_and_count() {
  setup_tracing();
  let store = MemoryCatalogStore::new();
  for (name, price) in [("C", 3.0), ("A", 1.0), ("B", 2.0), ("D", 4.0)] {
    store.create(fields(name, price, "Food", 1), ImageFields::none()).await.unwrap();
  }
  let query = ListingQuery::new(
    MatchSpec::all().with_max_price(3.0),
    Some(SortSpec::new(SortKey::Price, SortOrder::Descending)),
  );

  let all = store.find(&query).await.unwrap();
  let first = store.list(&query, PageRequest::new(1, 2)).await.unwrap();
  let second = store.list(&query, PageRequest::new(2, 2)).await.unwrap();

  let names = |ps: &[stockroom::Product]| ps.iter().map(|p| p.name.clone()).collect::<Vec<_>>();
  assert_eq!(names(&all), vec!["C", "B", "A"]);
  assert_eq!(names(&first.items), vec!["C", "B"]);
  assert_eq!(names(&second.items), vec!["A"]);
  assert_eq!(first.total_count, 3);
  assert_eq!(second.total_pages, 2);
}
