// stockroom/src/model/mod.rs

//! Product entity, its category enumeration, and the input DTOs that feed the catalog store.

pub mod category;
pub mod fields;
pub mod product;
pub mod validation;

pub use category::Category;
pub use fields::{ImageFields, ProductDraft, ProductFields, ProductForm};
pub use product::Product;
pub use validation::{validate_product, DESCRIPTION_MAX_CHARS, NAME_MAX_CHARS};
