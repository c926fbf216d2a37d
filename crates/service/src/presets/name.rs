//! Type name normalization for reserved-name filtering.

/// Node types excluded from every preset operation, in normalized form.
pub const RESERVED_TYPE_NAMES: [&str; 2] = ["MarkdownNote", "Note"];

/// Produce the comparison key for reserved-name filtering: parenthesized
/// substrings are removed (non-nested, `(` through the next `)`), then
/// everything but ASCII alphanumerics is stripped. The key is only compared,
/// never persisted.
pub fn normalize_type_name(input: &str) -> String {
    let mut kept = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find('(') {
        kept.push_str(&rest[..open]);
        match rest[open + 1..].find(')') {
            Some(close) => rest = &rest[open + 1 + close + 1..],
            None => {
                // no closing paren anywhere after this point
                kept.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    kept.push_str(rest);
    kept.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Whether a raw type name refers to one of the reserved note types,
/// regardless of decoration like `"Note (v2)"`.
pub fn is_reserved_type(raw: &str) -> bool {
    let key = normalize_type_name(raw);
    RESERVED_TYPE_NAMES.iter().any(|reserved| key == *reserved)
}
