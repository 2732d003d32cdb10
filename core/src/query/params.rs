// stockroom/src/query/params.rs

use serde::Deserialize;
use tracing::{event, Level};

use super::spec::{ListingQuery, MatchSpec, PriceRange, SortKey, SortOrder, SortSpec, StockFilter};
use crate::error::{CatalogError, CatalogResult, FieldViolation};
use crate::pagination::PageRequest;

/// Listing parameters exactly as a query string carries them.
///
/// Presence matters: `inStock` and the price bounds count as given even when empty,
/// while empty `category`, `nameContains` and `sortBy` values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingParams {
  pub page: Option<String>,
  pub limit: Option<String>,
  pub category: Option<String>,
  pub min_price: Option<String>,
  pub max_price: Option<String>,
  pub in_stock: Option<String>,
  #[serde(alias = "name")]
  pub name_contains: Option<String>,
  pub sort_by: Option<String>,
  pub sort_order: Option<String>,
}

impl ListingParams {
  pub fn match_spec(&self) -> CatalogResult<MatchSpec> {
    let mut violations = Vec::new();
    let price = PriceRange {
      min: parse_bound("minPrice", self.min_price.as_deref(), &mut violations),
      max: parse_bound("maxPrice", self.max_price.as_deref(), &mut violations),
    };
    CatalogError::from_violations(violations)?;

    Ok(MatchSpec {
      category: non_empty(&self.category),
      price,
      stock: self.in_stock.as_deref().map(StockFilter::from_param),
      name_contains: non_empty(&self.name_contains),
    })
  }

  pub fn sort_spec(&self) -> Option<SortSpec> {
    let raw = non_empty(&self.sort_by)?;
    match SortKey::from_param(&raw) {
      Some(key) => Some(SortSpec::new(key, SortOrder::from_param(self.sort_order.as_deref()))),
      None => {
        event!(Level::DEBUG, sort_by = %raw, "Unknown sort key, keeping store order.");
        None
      }
    }
  }

  pub fn query(&self) -> CatalogResult<ListingQuery> {
    Ok(ListingQuery::new(self.match_spec()?, self.sort_spec()))
  }

  pub fn page_request(&self) -> PageRequest {
    PageRequest::from_params(self.page.as_deref(), self.limit.as_deref())
  }
}

fn non_empty(value: &Option<String>) -> Option<String> {
  value.as_ref().filter(|v| !v.is_empty()).cloned()
}

fn parse_bound(field: &'static str, raw: Option<&str>, violations: &mut Vec<FieldViolation>) -> Option<f64> {
  let raw = raw?;
  match raw.trim().parse::<f64>() {
    Ok(bound) if bound.is_finite() => Some(bound),
    _ => {
      violations.push(FieldViolation::new(field, format!("`{raw}` is not a number")));
      None
    }
  }
}
