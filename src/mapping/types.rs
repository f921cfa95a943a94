//! SQL to Go/proto type mapping

use crate::models::{NullStyle, UNSUPPORTED_TYPE};
use serde::Serialize;

/// Go import needed by `time.Time` fields
pub const IMPORT_TIME: &str = "time";
/// Go import needed by `sql.Null*` fields
pub const IMPORT_DATABASE_SQL: &str = "database/sql";

/// Broad category of a SQL column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SqlTypeFamily {
    /// TINYINT, SMALLINT, MEDIUMINT, INT (and BOOL, stored as TINYINT(1))
    Integer,
    /// BIGINT
    BigInteger,
    /// FLOAT, DOUBLE, REAL
    Float,
    /// CHAR/VARCHAR/TEXT/BLOB/BINARY variants
    Text,
    /// TIMESTAMP, DATETIME, DATE
    Temporal,
    /// DECIMAL, NUMERIC
    Decimal,
    /// JSON
    Json,
    /// Anything else (spatial types, ENUM, SET, TIME, YEAR, BIT, ...)
    Unsupported,
}

/// Result of mapping one column type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappedType {
    /// Go type, including any null-style wrapper
    pub go_type: String,
    /// proto3 scalar type
    pub proto_type: &'static str,
    /// Go import path the type requires
    pub import: Option<&'static str>,
}

/// Classify a SQL type as rendered by the parser, e.g. `BIGINT(20) UNSIGNED`
///
/// Returns the family and whether the type carries the `UNSIGNED` flag.
pub fn classify_sql_type(sql_type: &str) -> (SqlTypeFamily, bool) {
    let upper = sql_type.trim().to_ascii_uppercase();
    let unsigned = upper.split_whitespace().any(|w| w == "UNSIGNED") || upper == "SERIAL";
    let keyword: String = upper
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    let family = match keyword.as_str() {
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "INTEGER" | "INT2" | "INT4" | "BOOL"
        | "BOOLEAN" => SqlTypeFamily::Integer,
        "BIGINT" | "INT8" | "SERIAL" => SqlTypeFamily::BigInteger,
        "FLOAT" | "DOUBLE" | "REAL" | "FLOAT4" | "FLOAT8" => SqlTypeFamily::Float,
        "CHAR" | "VARCHAR" | "CHARACTER" | "NCHAR" | "NVARCHAR" | "TEXT" | "TINYTEXT"
        | "MEDIUMTEXT" | "LONGTEXT" | "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB"
        | "BINARY" | "VARBINARY" => SqlTypeFamily::Text,
        "TIMESTAMP" | "DATETIME" | "DATE" => SqlTypeFamily::Temporal,
        "DECIMAL" | "NUMERIC" | "DEC" | "FIXED" => SqlTypeFamily::Decimal,
        "JSON" => SqlTypeFamily::Json,
        _ => SqlTypeFamily::Unsupported,
    };

    (family, unsigned)
}

/// Map a SQL type to its Go and proto3 representation
///
/// `NullStyle::Sql` and `NullStyle::Pointer` wrap every supported type,
/// independent of the column's nullability. Unsupported types map to the
/// `UnSupport` sentinel with no import in every style.
///
/// # Example
///
/// ```rust
/// use sql2code::mapping::map_sql_type;
/// use sql2code::models::NullStyle;
///
/// let mapped = map_sql_type("DATETIME", NullStyle::Disabled);
/// assert_eq!(mapped.go_type, "time.Time");
/// assert_eq!(mapped.import, Some("time"));
///
/// let mapped = map_sql_type("BIGINT UNSIGNED", NullStyle::Pointer);
/// assert_eq!(mapped.go_type, "*uint64");
/// ```
pub fn map_sql_type(sql_type: &str, style: NullStyle) -> MappedType {
    let (family, unsigned) = classify_sql_type(sql_type);

    let proto_type = match family {
        SqlTypeFamily::Integer if unsigned => "uint32",
        SqlTypeFamily::Integer => "int32",
        SqlTypeFamily::BigInteger if unsigned => "uint64",
        SqlTypeFamily::BigInteger => "int64",
        SqlTypeFamily::Float => "double",
        SqlTypeFamily::Text | SqlTypeFamily::Decimal | SqlTypeFamily::Json => "string",
        SqlTypeFamily::Temporal => "int64",
        SqlTypeFamily::Unsupported => UNSUPPORTED_TYPE,
    };

    if family == SqlTypeFamily::Unsupported {
        return MappedType {
            go_type: UNSUPPORTED_TYPE.to_string(),
            proto_type,
            import: None,
        };
    }

    if style == NullStyle::Sql {
        let go_type = match family {
            SqlTypeFamily::Integer => "sql.NullInt32",
            SqlTypeFamily::BigInteger => "sql.NullInt64",
            SqlTypeFamily::Float => "sql.NullFloat64",
            SqlTypeFamily::Temporal => "sql.NullTime",
            _ => "sql.NullString",
        };
        return MappedType {
            go_type: go_type.to_string(),
            proto_type,
            import: Some(IMPORT_DATABASE_SQL),
        };
    }

    let (native, import) = match family {
        SqlTypeFamily::Integer if unsigned => ("uint", None),
        SqlTypeFamily::Integer => ("int", None),
        SqlTypeFamily::BigInteger if unsigned => ("uint64", None),
        SqlTypeFamily::BigInteger => ("int64", None),
        SqlTypeFamily::Float => ("float64", None),
        SqlTypeFamily::Temporal => ("time.Time", Some(IMPORT_TIME)),
        _ => ("string", None),
    };

    let go_type = match style {
        NullStyle::Pointer => format!("*{}", native),
        _ => native.to_string(),
    };

    MappedType {
        go_type,
        proto_type,
        import,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUPPORTED: &[&str] = &[
        "TINYINT",
        "SMALLINT UNSIGNED",
        "MEDIUMINT",
        "INT(11)",
        "INT UNSIGNED",
        "BIGINT(20) UNSIGNED",
        "BIGINT",
        "FLOAT",
        "DOUBLE",
        "CHAR(50)",
        "VARCHAR(255)",
        "TEXT",
        "LONGTEXT",
        "BLOB",
        "MEDIUMBLOB",
        "TIMESTAMP",
        "DATETIME",
        "DATE",
        "DECIMAL(10,2)",
        "JSON",
    ];

    #[test]
    fn test_classify() {
        assert_eq!(classify_sql_type("bigint unsigned"), (SqlTypeFamily::BigInteger, true));
        assert_eq!(classify_sql_type("INT(11)"), (SqlTypeFamily::Integer, false));
        assert_eq!(classify_sql_type("varchar(32)"), (SqlTypeFamily::Text, false));
        assert_eq!(classify_sql_type("DOUBLE PRECISION"), (SqlTypeFamily::Float, false));
        assert_eq!(classify_sql_type("GEOMETRY"), (SqlTypeFamily::Unsupported, false));
        assert_eq!(classify_sql_type("ENUM('a','b')"), (SqlTypeFamily::Unsupported, false));
    }

    #[test]
    fn test_disabled_mapping() {
        let m = |t| map_sql_type(t, NullStyle::Disabled);
        assert_eq!(m("TINYINT").go_type, "int");
        assert_eq!(m("INT UNSIGNED").go_type, "uint");
        assert_eq!(m("BIGINT").go_type, "int64");
        assert_eq!(m("BIGINT UNSIGNED").go_type, "uint64");
        assert_eq!(m("DOUBLE").go_type, "float64");
        assert_eq!(m("CHAR(50)").go_type, "string");
        assert_eq!(m("DECIMAL(10,2)").go_type, "string");
        assert_eq!(m("JSON").go_type, "string");
        assert_eq!(m("DATETIME").go_type, "time.Time");
        assert_eq!(m("DATETIME").import, Some(IMPORT_TIME));
        assert_eq!(m("VARCHAR(10)").import, None);
    }

    #[test]
    fn test_sql_mapping() {
        let m = |t| map_sql_type(t, NullStyle::Sql);
        assert_eq!(m("INT").go_type, "sql.NullInt32");
        assert_eq!(m("BIGINT UNSIGNED").go_type, "sql.NullInt64");
        assert_eq!(m("FLOAT").go_type, "sql.NullFloat64");
        assert_eq!(m("TEXT").go_type, "sql.NullString");
        assert_eq!(m("TIMESTAMP").go_type, "sql.NullTime");
        assert_eq!(m("TIMESTAMP").import, Some(IMPORT_DATABASE_SQL));
    }

    #[test]
    fn test_pointer_mapping() {
        let m = |t| map_sql_type(t, NullStyle::Pointer);
        assert_eq!(m("INT").go_type, "*int");
        assert_eq!(m("VARCHAR(20)").go_type, "*string");
        assert_eq!(m("DATE").go_type, "*time.Time");
        assert_eq!(m("DATE").import, Some(IMPORT_TIME));
    }

    #[test]
    fn test_unsupported_is_sentinel_in_every_style() {
        for style in [NullStyle::Disabled, NullStyle::Sql, NullStyle::Pointer] {
            let mapped = map_sql_type("POINT", style);
            assert_eq!(mapped.go_type, UNSUPPORTED_TYPE);
            assert_eq!(mapped.import, None);
        }
    }

    #[test]
    fn test_every_supported_type_is_non_empty() {
        for style in [NullStyle::Disabled, NullStyle::Sql, NullStyle::Pointer] {
            for sql_type in SUPPORTED {
                let mapped = map_sql_type(sql_type, style);
                assert!(!mapped.go_type.is_empty());
                assert_ne!(mapped.go_type, UNSUPPORTED_TYPE, "{} in {}", sql_type, style);
                assert!(!mapped.proto_type.is_empty());
            }
        }
    }

    #[test]
    fn test_proto_types() {
        let m = |t| map_sql_type(t, NullStyle::Sql).proto_type;
        assert_eq!(m("INT UNSIGNED"), "uint32");
        assert_eq!(m("BIGINT"), "int64");
        assert_eq!(m("DOUBLE"), "double");
        assert_eq!(m("DATETIME"), "int64");
        assert_eq!(m("CHAR(1)"), "string");
    }
}
