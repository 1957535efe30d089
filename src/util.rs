/// Normalize an answer for comparison: trim surrounding whitespace and case-fold.
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Percentage of `part` in `whole`, 0.0 when `whole` is zero.
pub fn percentage(part: usize, whole: usize) -> f64 {
    match whole {
        positive if positive > 0 => 100.0 * part as f64 / whole as f64,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_answer() {
        assert_eq!(normalize_answer("  SULFATE "), "sulfate");
        assert_eq!(normalize_answer("Iron(III)"), "iron(iii)");
        assert_eq!(normalize_answer("\tmanganate(VII)\n"), "manganate(vii)");
    }

    #[test]
    fn test_normalize_answer_keeps_inner_spaces() {
        assert_eq!(
            normalize_answer(" Hydrogen Carbonate "),
            "hydrogen carbonate"
        );
    }

    #[test]
    fn test_normalize_answer_whitespace_only() {
        assert_eq!(normalize_answer("   "), "");
        assert_eq!(normalize_answer(""), "");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(3, 5), 60.0);
        assert_eq!(percentage(5, 5), 100.0);
        assert_eq!(percentage(0, 4), 0.0);
    }

    #[test]
    fn test_percentage_zero_total() {
        assert_eq!(percentage(0, 0), 0.0);
        assert!(!percentage(0, 0).is_nan());
    }
}
