// stockroom/src/pagination.rs

//! Page slicing for listing results.

use serde::Serialize;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// A requested page window. Both values are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  page: u64,
  limit: u64,
}

impl Default for PageRequest {
  fn default() -> Self {
    Self {
      page: DEFAULT_PAGE,
      limit: DEFAULT_LIMIT,
    }
  }
}

impl PageRequest {
  /// Values below 1 are raised to 1.
  pub fn new(page: u64, limit: u64) -> Self {
    Self {
      page: page.max(1),
      limit: limit.max(1),
    }
  }

  /// Builds a request from raw query values. Missing or unparsable values fall back to
  /// the defaults; zero and negative values are raised to 1.
  pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Self {
    Self::new(parse_or(page, DEFAULT_PAGE), parse_or(limit, DEFAULT_LIMIT))
  }

  pub fn page(&self) -> u64 {
    self.page
  }

  pub fn limit(&self) -> u64 {
    self.limit
  }

  pub fn offset(&self) -> u64 {
    (self.page - 1).saturating_mul(self.limit)
  }

  /// Wraps an already-sliced window of items together with the pre-slice total.
  pub fn page_of<T>(&self, items: Vec<T>, total_count: u64) -> Page<T> {
    Page {
      items,
      total_count,
      total_pages: total_count.div_ceil(self.limit),
      current_page: self.page,
      limit: self.limit,
    }
  }

  /// Slices a complete, already filtered and sorted result.
  pub fn paginate<T>(&self, all: Vec<T>) -> Page<T> {
    let total_count = all.len() as u64;
    let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
    let items = all.into_iter().skip(offset).take(limit).collect();
    self.page_of(items, total_count)
  }
}

fn parse_or(raw: Option<&str>, default: u64) -> u64 {
  match raw.map(|r| r.trim().parse::<i64>()) {
    Some(Ok(n)) => u64::try_from(n).unwrap_or(0),
    _ => default,
  }
}

/// One page of a listing result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
  pub items: Vec<T>,
  /// Matching items before slicing.
  pub total_count: u64,
  pub total_pages: u64,
  pub current_page: u64,
  pub limit: u64,
}

impl<T> Page<T> {
  pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
    Page {
      items: self.items.into_iter().map(f).collect(),
      total_count: self.total_count,
      total_pages: self.total_pages,
      current_page: self.current_page,
      limit: self.limit,
    }
  }
}
