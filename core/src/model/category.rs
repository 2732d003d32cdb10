// stockroom/src/model/category.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
  Electronics,
  Fashion,
  Books,
  Toys,
  Home,
  Food,
  #[default]
  Other,
}

impl Category {
  pub const ALL: [Category; 7] = [
    Category::Electronics,
    Category::Fashion,
    Category::Books,
    Category::Toys,
    Category::Home,
    Category::Food,
    Category::Other,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Category::Electronics => "Electronics",
      Category::Fashion => "Fashion",
      Category::Books => "Books",
      Category::Toys => "Toys",
      Category::Home => "Home",
      Category::Food => "Food",
      Category::Other => "Other",
    }
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Error for a string that names no category. Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a valid category")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
  type Err = UnknownCategory;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Category::ALL
      .into_iter()
      .find(|c| c.as_str() == s)
      .ok_or_else(|| UnknownCategory(s.to_string()))
  }
}
