//! Type mapping module
//!
//! Maps SQL column types to Go types (per null style), proto3 scalars and the
//! Go imports they need.

mod types;

pub use types::{
    IMPORT_DATABASE_SQL, IMPORT_TIME, MappedType, SqlTypeFamily, classify_sql_type, map_sql_type,
};

use std::collections::BTreeSet;

/// Deduplicate and sort import paths
pub fn collect_imports<I, S>(paths: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paths
        .into_iter()
        .map(|p| p.as_ref().to_string())
        .filter(|p| !p.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_imports() {
        let imports = collect_imports(["time", "database/sql", "time", ""]);
        assert_eq!(imports, vec!["database/sql".to_string(), "time".to_string()]);
    }
}
