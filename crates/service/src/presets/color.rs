//! Hex color canonicalization.

/// Normalize a hex color to `#RRGGBBAA`, or `None` when the input cannot be
/// interpreted.
///
/// Everything but ASCII hex digits is discarded first (which also drops any
/// leading `#` and surrounding whitespace). Supported residual lengths:
/// - `RGB` → `#RRGGBBFF`
/// - `RGBA` → `#RRGGBBAA`
/// - `RRGGBB` → `#RRGGBBFF`
/// - `RRGGBBAA` → unchanged
///
/// Output is always uppercase with a single leading `#`.
pub fn normalize_hex8(input: &str) -> Option<String> {
    let digits: String = input.chars().filter(|c| c.is_ascii_hexdigit()).collect();
    let rgba = match digits.len() {
        3 | 4 => {
            let mut widened = String::with_capacity(8);
            for c in digits.chars() {
                widened.push(c);
                widened.push(c);
            }
            if digits.len() == 3 {
                widened.push_str("FF");
            }
            widened
        }
        6 => format!("{digits}FF"),
        8 => digits,
        _ => return None,
    };
    Some(format!("#{}", rgba.to_ascii_uppercase()))
}

/// Normalize a deletion target color: trim, uppercase, prefix `#` and widen
/// a bare `RRGGBB` value with an opaque alpha channel.
///
/// Unlike [`normalize_hex8`] other shapes pass through untouched; they simply
/// never match a stored entry.
pub fn normalize_delete_target(input: &str) -> String {
    let mut target = input.trim().to_ascii_uppercase();
    if !target.starts_with('#') {
        target.insert(0, '#');
    }
    if target.len() == 7 {
        target.push_str("FF");
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widens_short_forms() {
        assert_eq!(normalize_hex8("#abc").as_deref(), Some("#AABBCCFF"));
        assert_eq!(normalize_hex8("1234").as_deref(), Some("#11223344"));
        assert_eq!(normalize_hex8("#AABBCC").as_deref(), Some("#AABBCCFF"));
        assert_eq!(normalize_hex8("#ff00ff80").as_deref(), Some("#FF00FF80"));
    }

    #[test]
    fn strips_noise_before_interpreting() {
        assert_eq!(normalize_hex8("  #a1b2c3  ").as_deref(), Some("#A1B2C3FF"));
        assert_eq!(normalize_hex8("zz#1-2_3").as_deref(), Some("#112233FF"));
    }

    #[test]
    fn rejects_unusable_lengths() {
        for input in ["", " ", "#", "a", "ab", "abcde", "abcdefa", "abcdefabc", "GGHHII"] {
            assert_eq!(normalize_hex8(input), None, "input {input:?}");
        }
    }

    #[test]
    fn delete_target_widens_six_digit_values() {
        assert_eq!(normalize_delete_target("aabbcc"), "#AABBCCFF");
        assert_eq!(normalize_delete_target("#aabbccdd"), "#AABBCCDD");
        assert_eq!(normalize_delete_target(" #abc "), "#ABC");
    }
}
