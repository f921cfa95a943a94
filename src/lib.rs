//! sql2code - code generation from SQL `CREATE TABLE` statements
//!
//! Turns DDL into:
//! - GORM model structs (`model`)
//! - update-field assignments for a dao (`dao`)
//! - handler request/response structs (`handler`)
//! - a zero-valued JSON skeleton (`json`)
//! - a proto3 CRUD service (`proto`)
//! - the list of generated type names (`__table_name__`)
//!
//! ```
//! use sql2code::{CodeType, GenOptions, generate_code};
//!
//! let options = GenOptions::new("CREATE TABLE users (id BIGINT PRIMARY KEY, name VARCHAR(50))");
//! let model = generate_code(&options, CodeType::Model).unwrap();
//! assert!(model.contains("type User struct {"));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod import;
pub mod mapping;
pub mod models;
pub mod naming;
pub mod schema;
pub mod validation;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::GenOptions;
pub use engine::{CodeGenerator, GeneratedCodes};
pub use error::{CodegenError, CodegenResult};
pub use models::{CodeType, ColumnSchema, JsonNaming, NullStyle, TableSchema};

/// Generate every artifact with the process-wide generator
pub fn generate(options: &GenOptions) -> CodegenResult<GeneratedCodes> {
    CodeGenerator::shared()?.generate(options)
}

/// Generate one artifact with the process-wide generator
pub fn generate_code(options: &GenOptions, code_type: CodeType) -> CodegenResult<String> {
    CodeGenerator::shared()?.generate_code(options, code_type)
}
