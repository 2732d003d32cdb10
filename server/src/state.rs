// stockroom/server/src/state.rs
use crate::config::AppConfig;
use std::sync::Arc;
use stockroom::CatalogService;

#[derive(Clone)]
pub struct AppState {
  pub catalog: Arc<CatalogService>,
  pub config: Arc<AppConfig>, // Share loaded config
}
