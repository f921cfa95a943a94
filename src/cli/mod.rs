//! CLI module for the sql2code binary

#[cfg(feature = "cli")]
pub mod args;
#[cfg(feature = "cli")]
pub mod error;
#[cfg(feature = "cli")]
pub mod output;

#[cfg(feature = "cli")]
pub use error::CliError;
