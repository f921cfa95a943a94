//! Models module
//!
//! The intermediate schema every emitter renders from, plus the option enums
//! shared across the crate.

pub mod column;
pub mod enums;
pub mod table;

pub use column::{
    COLUMN_CREATED_AT, COLUMN_DELETED_AT, COLUMN_ID, COLUMN_UPDATED_AT, ColumnSchema,
    EMBEDDED_MARKER, RESERVED_COLUMNS, UNSUPPORTED_TYPE, is_reserved_column,
};
pub use enums::*;
pub use table::TableSchema;
