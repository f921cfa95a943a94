//! Identifier case conversion for generated Go code

use std::collections::BTreeSet;

/// Segments rendered fully uppercase when no acronym list is configured
pub const DEFAULT_ACRONYMS: &[&str] = &["ID", "IP", "RPC"];

/// Set of identifier segments that are emitted fully uppercase
///
/// Lookups are case-insensitive: `id`, `Id` and `ID` all match the `ID` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acronyms {
    words: BTreeSet<String>,
}

impl Default for Acronyms {
    fn default() -> Self {
        Self::new(DEFAULT_ACRONYMS)
    }
}

impl Acronyms {
    /// Build an acronym table from a list of words
    ///
    /// Blank entries are ignored.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_ascii_uppercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Whether `word` is a configured acronym
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_ascii_uppercase())
    }

    /// Whether an uppercase word is made only of acronyms, e.g. `IDIP`
    fn is_run(&self, upper: &str) -> bool {
        if upper.is_empty() {
            return true;
        }
        self.words
            .iter()
            .any(|a| upper.starts_with(a.as_str()) && self.is_run(&upper[a.len()..]))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// Convert a SQL identifier to an exported Go identifier
///
/// The input is split on `_`, `-`, space, `.` and digits. Digits are kept
/// verbatim, separators are dropped. Each segment starts uppercase; acronym
/// segments are fully uppercase; all-caps segments that are not acronyms are
/// title-cased; mixed-case segments keep their inner casing, which makes the
/// conversion idempotent (`to_camel(to_camel(x)) == to_camel(x)`).
///
/// # Example
///
/// ```rust
/// use sql2code::naming::{to_camel, Acronyms};
///
/// let acronyms = Acronyms::default();
/// assert_eq!(to_camel("user_id", &acronyms), "UserID");
/// assert_eq!(to_camel("login_ip_2", &acronyms), "LoginIP2");
/// ```
pub fn to_camel(s: &str, acronyms: &Acronyms) -> String {
    let s = s.trim();
    let mut out = String::with_capacity(s.len());
    let mut word = String::new();

    for ch in s.chars() {
        if ch.is_ascii_alphabetic() {
            word.push(ch);
            continue;
        }
        if ch.is_ascii_digit() || matches!(ch, '_' | '-' | ' ' | '.') {
            flush_word(&mut word, &mut out, acronyms);
            if ch.is_ascii_digit() {
                out.push(ch);
            }
        }
        // anything else is dropped and does not end the current word
    }
    flush_word(&mut word, &mut out, acronyms);

    out
}

fn flush_word(word: &mut String, out: &mut String, acronyms: &Acronyms) {
    if word.is_empty() {
        return;
    }

    let upper = word.to_ascii_uppercase();
    let all_caps = *word == upper;
    if acronyms.contains(&upper) || (all_caps && acronyms.is_run(&upper)) {
        out.push_str(&upper);
    } else {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            if all_caps {
                out.extend(chars.map(|c| c.to_ascii_lowercase()));
            } else {
                out.extend(chars);
            }
        }
    }
    word.clear();
}

/// Lowercase the first character
pub fn first_lower(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert `snake_case` to `lowerCamelCase` without acronym handling
///
/// Used for JSON names, where `user_id` must become `userId`.
pub fn to_lower_camel(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = false;
    for ch in s.trim().chars() {
        if matches!(ch, '_' | '-' | ' ') {
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    first_lower(&out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_camel_basic() {
        let a = Acronyms::default();
        assert_eq!(to_camel("user_name", &a), "UserName");
        assert_eq!(to_camel("created-at", &a), "CreatedAt");
        assert_eq!(to_camel("  order item ", &a), "OrderItem");
        assert_eq!(to_camel("", &a), "");
        assert_eq!(to_camel("   ", &a), "");
    }

    #[test]
    fn test_to_camel_acronyms() {
        let a = Acronyms::default();
        assert_eq!(to_camel("user_id", &a), "UserID");
        assert_eq!(to_camel("id", &a), "ID");
        assert_eq!(to_camel("client_ip", &a), "ClientIP");
        assert_eq!(to_camel("rpc_addr", &a), "RPCAddr");
        assert_eq!(to_camel("id_ip", &a), "IDIP");
    }

    #[test]
    fn test_to_camel_digits_survive() {
        let a = Acronyms::default();
        assert_eq!(to_camel("address2", &a), "Address2");
        assert_eq!(to_camel("v2_name", &a), "V2Name");
        assert_eq!(to_camel("a1b", &a), "A1B");
    }

    #[test]
    fn test_to_camel_all_caps_segments() {
        let a = Acronyms::default();
        assert_eq!(to_camel("USER_NAME", &a), "UserName");
        assert_eq!(to_camel("USER_ID", &a), "UserID");
    }

    #[test]
    fn test_to_camel_idempotent() {
        let a = Acronyms::default();
        for raw in ["user_id", "UserID", "id_ip", "login_ip_2", "USER_NAME", "HTTPServer"] {
            let once = to_camel(raw, &a);
            assert_eq!(to_camel(&once, &a), once, "not idempotent for {}", raw);
        }
    }

    #[test]
    fn test_custom_acronyms() {
        let a = Acronyms::new(["url", " ", "Api"]);
        assert!(a.contains("URL"));
        assert!(a.contains("api"));
        assert!(!a.contains("ID"));
        assert_eq!(to_camel("home_url", &a), "HomeURL");
        assert_eq!(to_camel("user_id", &a), "UserId");
    }

    #[test]
    fn test_lower_camel() {
        assert_eq!(to_lower_camel("user_id"), "userId");
        assert_eq!(to_lower_camel("created_at"), "createdAt");
        assert_eq!(to_lower_camel("name"), "name");
        assert_eq!(to_lower_camel("_secret_key"), "secretKey");
        assert_eq!(first_lower("UserExample"), "userExample");
        assert_eq!(first_lower(""), "");
    }
}
