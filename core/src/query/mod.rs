// stockroom/src/query/mod.rs

//! Turns loosely-typed listing parameters into a match+sort spec.

pub mod params;
pub mod spec;

pub use params::ListingParams;
pub use spec::{ListingQuery, MatchSpec, PriceRange, SortKey, SortOrder, SortSpec, StockFilter};
