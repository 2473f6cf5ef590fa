//! Core abstractions shared by providers and generators.
//!
//! - [`schema`]: canonical table and column metadata
//! - [`traits`]: [`SchemaProvider`] and [`Dialect`], implemented per driver

pub mod schema;
pub mod traits;

pub use schema::{Column, Table};
pub use traits::{Dialect, SchemaProvider};
