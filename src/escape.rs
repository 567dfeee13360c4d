//! YAML scalar escaping for front-matter values.
//!
//! Every structured value in front matter (ids, titles, tags, slugs, URLs,
//! emails, IPs) is written as a double-quoted YAML scalar. Characters that
//! could end the scalar early or be read as a mapping separator are replaced
//! with YAML `\uXXXX` escapes:
//!
//! | Input | Output |
//! |-------|--------|
//! | `\` | `\u005C` |
//! | `"` | `\u0022` |
//! | `'` | `\u0027` |
//! | `: ` | `\u003A ` |
//!
//! The backslash goes first: every later substitution introduces a backslash
//! that must not be escaped again. Body content and dates are never passed
//! through here.

/// Substitutions in application order.
const SUBSTITUTIONS: [(&str, &str); 4] = [
    ("\\", "\\u005C"),
    ("\"", "\\u0022"),
    ("'", "\\u0027"),
    (": ", "\\u003A "),
];

/// Encode `value` as a double-quoted YAML scalar.
pub fn yaml_scalar(value: &str) -> String {
    let escaped = SUBSTITUTIONS
        .iter()
        .fold(value.to_string(), |acc, (from, to)| acc.replace(from, to));
    format!("\"{escaped}\"")
}
