//! Schema module
//!
//! Turns parsed DDL into the [`TableSchema`](crate::models::TableSchema)
//! values rendered by the emitters.

pub mod builder;

pub use builder::{IMPORT_MYSQL_MODEL, SchemaBuilder, model_imports};
