//! Import functionality
//!
//! Reads DDL text into the intermediate form consumed by the schema builder.

pub mod sql;

pub use sql::{
    ERROR_FRAGMENT_LEN, ParsedColumn, ParsedTable, ParserConfig, SqlParser, extract_table,
    table_name, unquote_identifier,
};
