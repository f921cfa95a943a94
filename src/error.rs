//! Error types for code generation

use thiserror::Error;

/// Errors returned by the generator
///
/// Input errors are caused by the DDL or the options and can be fixed by the
/// caller. Internal errors mean a template or post-render pass produced
/// invalid output; see [`CodegenError::is_internal`].
#[derive(Error, Debug)]
pub enum CodegenError {
    /// The DDL could not be parsed
    #[error("Failed to parse SQL near `{fragment}`: {message}")]
    Parse { fragment: String, message: String },

    /// No DDL was supplied
    #[error("No SQL input provided")]
    MissingSql,

    /// Null style value not in `disabled|sql|ptr`
    #[error("Invalid null style: {0} (expected one of: sql, ptr)")]
    InvalidNullStyle(String),

    /// Requested artifact kind does not exist
    #[error("Unknown code type: {0}")]
    UnknownCodeType(String),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// A built-in template failed to compile
    #[error("Template `{template}` failed to compile: {message}")]
    TemplateCompile { template: String, message: String },

    /// A built-in template referenced a value the emitter did not provide
    #[error("Template `{template}` failed to render: {message}")]
    TemplateRender { template: String, message: String },

    /// Rendered output is not well formed
    #[error("{emitter} produced malformed code: {message}")]
    Syntax { emitter: String, message: String },
}

impl CodegenError {
    /// Whether the error is a defect of the generator rather than of its input
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            CodegenError::TemplateCompile { .. }
                | CodegenError::TemplateRender { .. }
                | CodegenError::Syntax { .. }
        )
    }
}

/// Result type for code generation
pub type CodegenResult<T> = Result<T, CodegenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CodegenError::Parse {
            fragment: "CREATE TABL".to_string(),
            message: "Expected an object type".to_string(),
        };
        assert!(err.to_string().contains("CREATE TABL"));
        assert!(!err.is_internal());

        let err = CodegenError::Syntax {
            emitter: "model".to_string(),
            message: "unclosed `{`".to_string(),
        };
        assert!(err.to_string().starts_with("model"));
        assert!(err.is_internal());
    }
}
