//! English noun inflection for table names
//!
//! Rule tables follow the usual ORM conventions: uncountable words are left
//! untouched, irregular pairs are matched as a word suffix, and the regular
//! rules are tried most specific first.

use once_cell::sync::Lazy;
use regex::Regex;

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
    "news",
];

// (singular, plural)
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("mombie", "mombies"),
];

fn compile(rules: &[(&'static str, &'static str)]) -> Vec<(Regex, &'static str)> {
    rules
        .iter()
        .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), *replacement))
        .collect()
}

static PLURAL_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    compile(&[
        (r"(?i)(quiz)$", "${1}zes"),
        (r"(?i)^(oxen)$", "${1}"),
        (r"(?i)^(ox)$", "${1}en"),
        (r"(?i)(m|l)ice$", "${1}ice"),
        (r"(?i)(m|l)ouse$", "${1}ice"),
        (r"(?i)(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
        (r"(?i)(x|ch|ss|sh)$", "${1}es"),
        (r"(?i)([^aeiouy]|qu)y$", "${1}ies"),
        (r"(?i)(hive)$", "${1}s"),
        (r"(?i)(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
        (r"(?i)sis$", "ses"),
        (r"(?i)([ti])a$", "${1}a"),
        (r"(?i)([ti])um$", "${1}a"),
        (r"(?i)(buffal|tomat)o$", "${1}oes"),
        (r"(?i)(bu)s$", "${1}ses"),
        (r"(?i)(alias|status)$", "${1}es"),
        (r"(?i)(octop|vir)i$", "${1}i"),
        (r"(?i)(octop|vir)us$", "${1}i"),
        (r"(?i)^(ax|test)is$", "${1}es"),
        (r"(?i)s$", "s"),
        (r"$", "s"),
    ])
});

static SINGULAR_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    compile(&[
        (r"(?i)(database)s$", "${1}"),
        (r"(?i)(quiz)zes$", "${1}"),
        (r"(?i)(matr)ices$", "${1}ix"),
        (r"(?i)(vert|ind)ices$", "${1}ex"),
        (r"(?i)^(ox)en", "${1}"),
        (r"(?i)(alias|status)(es)?$", "${1}"),
        (r"(?i)(octop|vir)(us|i)$", "${1}us"),
        (r"(?i)^(a)x[ie]s$", "${1}xis"),
        (r"(?i)(cris|test)(is|es)$", "${1}is"),
        (r"(?i)(shoe)s$", "${1}"),
        (r"(?i)(o)es$", "${1}"),
        (r"(?i)(bus)(es)?$", "${1}"),
        (r"(?i)(m|l)ice$", "${1}ouse"),
        (r"(?i)(x|ch|ss|sh)es$", "${1}"),
        (r"(?i)(m)ovies$", "${1}ovie"),
        (r"(?i)(s)eries$", "${1}eries"),
        (r"(?i)([^aeiouy]|qu)ies$", "${1}y"),
        (r"(?i)([lr])ves$", "${1}f"),
        (r"(?i)(tive)s$", "${1}"),
        (r"(?i)(hive)s$", "${1}"),
        (r"(?i)([^f])ves$", "${1}fe"),
        (r"(?i)(^analy)(sis|ses)$", "${1}sis"),
        (
            r"(?i)((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)(sis|ses)$",
            "${1}sis",
        ),
        (r"(?i)([ti])a$", "${1}um"),
        (r"(?i)(n)ews$", "${1}ews"),
        (r"(?i)(ss)$", "${1}"),
        (r"(?i)s$", ""),
    ])
});

fn is_uncountable(word: &str) -> bool {
    let lower = word.to_ascii_lowercase();
    UNCOUNTABLE
        .iter()
        .any(|u| lower == *u || lower.ends_with(&format!("_{}", u)))
}

/// Replace an irregular suffix `from` with `to`, keeping the caller's prefix
/// and the case of the suffix's first letter.
fn replace_irregular(word: &str, from: &str, to: &str) -> Option<String> {
    let lower = word.to_ascii_lowercase();
    if !lower.ends_with(from) {
        return None;
    }
    let split = word.len() - from.len();
    let (head, tail) = word.split_at(split);
    if !(head.is_empty() || head.ends_with('_')) {
        return None;
    }
    let mut out = String::with_capacity(head.len() + to.len());
    out.push_str(head);
    if tail.starts_with(|c: char| c.is_ascii_uppercase()) {
        let mut chars = to.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars);
        }
    } else {
        out.push_str(to);
    }
    Some(out)
}

fn apply_rules(word: &str, rules: &[(Regex, &'static str)]) -> String {
    for (re, replacement) in rules {
        if re.is_match(word) {
            return re.replace(word, *replacement).into_owned();
        }
    }
    word.to_string()
}

/// Plural form of an English noun, e.g. `user` -> `users`
pub fn pluralize(word: &str) -> String {
    if word.is_empty() || is_uncountable(word) {
        return word.to_string();
    }
    for (singular, plural) in IRREGULAR {
        if replace_irregular(word, plural, plural).is_some() {
            return word.to_string();
        }
        if let Some(out) = replace_irregular(word, singular, plural) {
            return out;
        }
    }
    apply_rules(word, &PLURAL_RULES)
}

/// Singular form of an English noun, e.g. `categories` -> `category`
pub fn singularize(word: &str) -> String {
    if word.is_empty() || is_uncountable(word) {
        return word.to_string();
    }
    for (singular, plural) in IRREGULAR {
        if replace_irregular(word, singular, singular).is_some() {
            return word.to_string();
        }
        if let Some(out) = replace_irregular(word, plural, singular) {
            return out;
        }
    }
    apply_rules(word, &SINGULAR_RULES)
}

/// Whether a generated record type needs an explicit table-name accessor
///
/// `prefix_stripped` and `force` always require one. Otherwise the raw name
/// needs one only when it is neither singular nor the regular plural of its
/// own singular, since only those two forms can be derived from the type name.
pub fn needs_table_name_mapping(raw_table_name: &str, prefix_stripped: bool, force: bool) -> bool {
    if prefix_stripped || force {
        return true;
    }
    let singular = singularize(raw_table_name);
    singular != raw_table_name && pluralize(&singular) != raw_table_name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize_regular() {
        assert_eq!(pluralize("user"), "users");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("key"), "keys");
        assert_eq!(pluralize("status"), "statuses");
        assert_eq!(pluralize("users"), "users");
        assert_eq!(pluralize("wolf"), "wolves");
        assert_eq!(pluralize("knife"), "knives");
    }

    #[test]
    fn test_pluralize_irregular_and_uncountable() {
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("people"), "people");
        assert_eq!(pluralize("sales_person"), "sales_people");
        assert_eq!(pluralize("Child"), "Children");
        assert_eq!(pluralize("information"), "information");
        assert_eq!(pluralize("user_money"), "user_money");
    }

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("users"), "user");
        assert_eq!(singularize("user"), "user");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("addresses"), "address");
        assert_eq!(singularize("address"), "address");
        assert_eq!(singularize("people"), "person");
        assert_eq!(singularize("user_infos"), "user_info");
        assert_eq!(singularize("statuses"), "status");
        assert_eq!(singularize("news"), "news");
    }

    #[test]
    fn test_table_name_mapping() {
        assert!(!needs_table_name_mapping("user", false, false));
        assert!(!needs_table_name_mapping("users", false, false));
        assert!(!needs_table_name_mapping("people", false, false));
        assert!(needs_table_name_mapping("t_order", true, false));
        assert!(needs_table_name_mapping("user", false, true));
    }
}
