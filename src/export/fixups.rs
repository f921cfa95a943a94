//! Post-render text passes
//!
//! Each pass is a pure function of the rendered text. They run after the
//! syntax pass, on text with canonical tab indentation.

use crate::models::EMBEDDED_MARKER;

/// Start marker of the inbound by-ID request body
pub const BY_ID_REQUEST_START: &str = "ByIDRequest struct {";
/// End marker of the `id` field in a by-ID request
pub const BY_ID_REQUEST_END: &str = "`json:\"id\" binding:\"\"`";
/// Start marker of the outbound by-ID response body
pub const BY_ID_RESPOND_START: &str = "ByIDRespond struct {";
/// End marker of the `id` field in a by-ID response
pub const BY_ID_RESPOND_END: &str = "`json:\"id\"`";

/// Type of the synthetic embedded field before substitution
pub const EMBEDDED_TYPE_MARKER: &str = "__type__";
/// Go type the embedded marker field is replaced with
pub const EMBEDDED_MODEL_TYPE: &str = "mysql.Model";

/// Turn `"col" = value` lines into `"col": value`
///
/// ```rust
/// use sql2code::export::fixups::json_assignments_to_pairs;
///
/// assert_eq!(json_assignments_to_pairs("\t\"id\" = 0"), "\t\"id\": 0");
/// ```
pub fn json_assignments_to_pairs(text: &str) -> String {
    text.replace(" =", ":")
}

/// Add a trailing comma to every body line of a JSON object except the last
///
/// Lines holding only an opening or closing brace are left as they are, as
/// are blank lines.
pub fn add_json_commas(text: &str) -> String {
    let is_body = |line: &str| {
        let trimmed = line.trim();
        !trimmed.is_empty() && trimmed != "{" && trimmed != "}"
    };
    let mut remaining = text.lines().filter(|l| is_body(l)).count();

    let mut out = String::with_capacity(text.len() + remaining);
    for line in text.lines() {
        out.push_str(line);
        if is_body(line) {
            remaining -= 1;
            if remaining > 0 {
                out.push(',');
            }
        }
        out.push('\n');
    }
    if !text.ends_with('\n') {
        out.pop();
    }
    out
}

/// Replace the embedded marker field with the real embedded type
///
/// `__mysqlModel__ __type__ ...` becomes `mysql.Model ...`.
pub fn replace_embedded_marker(text: &str) -> String {
    let marker_field = format!("{} {}", EMBEDDED_MARKER, EMBEDDED_TYPE_MARKER);
    text.replace(&marker_field, EMBEDDED_MODEL_TYPE)
        .replace(EMBEDDED_MARKER, EMBEDDED_MODEL_TYPE)
        .replace(EMBEDDED_TYPE_MARKER, "")
}

/// Rewrite the `id` field line of every by-ID request body to `ID uint64`
pub fn id_type_to_uint64(text: &str) -> String {
    rewrite_id_field(
        text,
        BY_ID_REQUEST_START,
        BY_ID_REQUEST_END,
        "uint64",
        "uint64 id",
    )
}

/// Rewrite the `id` field line of every by-ID response body to `ID string`
pub fn id_type_to_string(text: &str) -> String {
    rewrite_id_field(
        text,
        BY_ID_RESPOND_START,
        BY_ID_RESPOND_END,
        "string",
        "covert to string id",
    )
}

/// Apply both ID rewrites to a handler artifact
///
/// ```rust
/// use sql2code::export::fixups::adjust_id_types;
///
/// let before = "type UpdateUserByIDRequest struct {\n\tID int `json:\"id\" binding:\"\"`\n}\n";
/// let after = adjust_id_types(before);
/// assert!(after.contains("\tID uint64 `json:\"id\" binding:\"\"` // uint64 id\n"));
/// ```
pub fn adjust_id_types(text: &str) -> String {
    id_type_to_string(&id_type_to_uint64(text))
}

/// Bounded rewrite of the `id` field line between `start` and `end`
///
/// For every occurrence of `start`, the first `end` inside the same struct
/// body (before the closing `}` line) identifies the id field; that line alone
/// is replaced. Bodies without the marker are left untouched.
fn rewrite_id_field(text: &str, start: &str, end: &str, go_type: &str, comment: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(start) {
        let body_start = pos + start.len();
        out.push_str(&rest[..body_start]);
        rest = &rest[body_start..];

        let body_end = rest.find("\n}").unwrap_or(rest.len());
        let Some(marker) = rest[..body_end].find(end) else {
            continue;
        };

        let line_start = rest[..marker].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let line_end = rest[marker..]
            .find('\n')
            .map(|i| marker + i)
            .unwrap_or(rest.len());

        out.push_str(&rest[..line_start]);
        out.push_str(&format!("\tID {} {} // {}", go_type, end, comment));
        rest = &rest[line_end..];
    }

    out.push_str(rest);
    out
}
