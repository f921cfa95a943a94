//! Option enums shared by the generator, the configuration and the CLI

use crate::error::CodegenError;
use serde::{Deserialize, Serialize};

/// How a possibly-absent column value is represented in Go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullStyle {
    /// Native types (`int`, `string`, `time.Time`)
    #[default]
    Disabled,
    /// `database/sql` wrappers (`sql.NullInt64`, `sql.NullString`, ...)
    Sql,
    /// Pointers to native types (`*int`, `*string`, ...)
    #[serde(rename = "ptr", alias = "pointer")]
    Pointer,
}

impl std::fmt::Display for NullStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NullStyle::Disabled => write!(f, "disabled"),
            NullStyle::Sql => write!(f, "sql"),
            NullStyle::Pointer => write!(f, "ptr"),
        }
    }
}

impl std::str::FromStr for NullStyle {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "disabled" | "none" => Ok(NullStyle::Disabled),
            "sql" => Ok(NullStyle::Sql),
            "ptr" | "pointer" => Ok(NullStyle::Pointer),
            _ => Err(CodegenError::InvalidNullStyle(s.to_string())),
        }
    }
}

/// Naming convention of the `json` struct tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonNaming {
    /// Column name as written in the DDL
    #[default]
    Snake,
    /// `lowerCamelCase` rendering of the column name
    Camel,
}

impl std::fmt::Display for JsonNaming {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonNaming::Snake => write!(f, "snake"),
            JsonNaming::Camel => write!(f, "camel"),
        }
    }
}

impl std::str::FromStr for JsonNaming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "snake" | "0" => Ok(JsonNaming::Snake),
            "camel" | "1" => Ok(JsonNaming::Camel),
            _ => Err(format!("Unknown json naming type: {}", s)),
        }
    }
}

/// Kind of generated artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeType {
    /// Go file with the GORM model structs
    Model,
    /// JSON skeleton of each table
    Json,
    /// Update-field assignments for the DAO layer
    Dao,
    /// Create/update request and detail response structs
    Handler,
    /// proto3 service and messages
    Proto,
    /// Comma separated record type names
    #[serde(rename = "__table_name__")]
    TableName,
}

impl CodeType {
    pub const ALL: [CodeType; 6] = [
        CodeType::Model,
        CodeType::Json,
        CodeType::Dao,
        CodeType::Handler,
        CodeType::Proto,
        CodeType::TableName,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CodeType::Model => "model",
            CodeType::Json => "json",
            CodeType::Dao => "dao",
            CodeType::Handler => "handler",
            CodeType::Proto => "proto",
            CodeType::TableName => "__table_name__",
        }
    }
}

impl std::fmt::Display for CodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CodeType {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        CodeType::ALL
            .into_iter()
            .find(|t| t.as_str() == lower || (lower == "table_name" && *t == CodeType::TableName))
            .ok_or_else(|| CodegenError::UnknownCodeType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_style_parse() {
        assert_eq!("".parse::<NullStyle>().unwrap(), NullStyle::Disabled);
        assert_eq!("sql".parse::<NullStyle>().unwrap(), NullStyle::Sql);
        assert_eq!("PTR".parse::<NullStyle>().unwrap(), NullStyle::Pointer);
        assert!(matches!(
            "maybe".parse::<NullStyle>(),
            Err(CodegenError::InvalidNullStyle(_))
        ));
    }

    #[test]
    fn test_json_naming_parse() {
        assert_eq!("camel".parse::<JsonNaming>().unwrap(), JsonNaming::Camel);
        assert_eq!("0".parse::<JsonNaming>().unwrap(), JsonNaming::Snake);
        assert!("kebab".parse::<JsonNaming>().is_err());
    }

    #[test]
    fn test_code_type_round_trip_names() {
        for t in CodeType::ALL {
            assert_eq!(t.as_str().parse::<CodeType>().unwrap(), t);
        }
        assert_eq!("table_name".parse::<CodeType>().unwrap(), CodeType::TableName);
        assert!("service".parse::<CodeType>().is_err());
    }
}
