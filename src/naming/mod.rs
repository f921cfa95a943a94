//! Identifier normalization
//!
//! Turns raw SQL identifiers into Go identifiers:
//! - prefix stripping (`t_order` -> `order`)
//! - acronym-aware camel casing (`user_id` -> `UserID`)
//! - plural/singular inflection for table names

pub mod camel;
pub mod inflection;

pub use camel::{Acronyms, DEFAULT_ACRONYMS, first_lower, to_camel, to_lower_camel};
pub use inflection::{needs_table_name_mapping, pluralize, singularize};

/// Remove `prefix` from `ident` when it is a literal prefix
///
/// Returns the remaining identifier and whether anything was stripped. An
/// empty prefix, or one that would consume the whole identifier, is ignored.
pub fn strip_prefix<'a>(ident: &'a str, prefix: &str) -> (&'a str, bool) {
    if prefix.is_empty() {
        return (ident, false);
    }
    match ident.strip_prefix(prefix) {
        Some(rest) if !rest.is_empty() => (rest, true),
        _ => (ident, false),
    }
}

/// Go type name for a table: prefix stripped, singularized, camel cased
pub fn record_type_name(raw_table_name: &str, prefix: &str, acronyms: &Acronyms) -> String {
    let (name, _) = strip_prefix(raw_table_name, prefix);
    to_camel(&singularize(name), acronyms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_prefix() {
        assert_eq!(strip_prefix("t_order", "t_"), ("order", true));
        assert_eq!(strip_prefix("order", "t_"), ("order", false));
        assert_eq!(strip_prefix("order", ""), ("order", false));
        assert_eq!(strip_prefix("t_", "t_"), ("t_", false));
    }

    #[test]
    fn test_record_type_name() {
        let a = Acronyms::default();
        assert_eq!(record_type_name("users", "", &a), "User");
        assert_eq!(record_type_name("t_order_items", "t_", &a), "OrderItem");
        assert_eq!(record_type_name("user_example", "", &a), "UserExample");
        assert_eq!(record_type_name("people", "", &a), "Person");
    }
}
