/// Trim surrounding whitespace and upper-case a ticker symbol.
pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Keep only ASCII digits, for numeric input fields.
pub fn sanitize_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_symbol() {
        assert_eq!(normalize_symbol("acb"), "ACB");
        assert_eq!(normalize_symbol("  vnm\t"), "VNM");
        assert_eq!(normalize_symbol("   "), "");
    }

    #[test]
    fn strips_non_digits() {
        assert_eq!(sanitize_digits("3a6-5"), "365");
        assert_eq!(sanitize_digits(""), "");
    }
}
