//! Validation functionality
//!
//! Well-formedness checks run on every rendered artifact.

pub mod syntax;

pub use syntax::format_source;
