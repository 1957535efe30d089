use unicode_width::UnicodeWidthChar;

/// Gauge ratio for `answered` of `total`, clamped to `0.0..=1.0`.
pub fn progress_ratio(answered: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    (answered as f64 / total as f64).clamp(0.0, 1.0)
}

/// Running score shown next to the gauge.
pub fn score_label(score: usize, answered: usize) -> String {
    format!("Score: {score} / {answered}")
}

pub fn format_percentage(val: f64) -> String {
    format!("{val:.1}%")
}

/// Longest suffix of `text` that fits in `width` columns.
pub fn visible_tail(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, c) in text.char_indices().rev() {
        used += c.width().unwrap_or(0);
        if used > width {
            return &text[idx + c.len_utf8()..];
        }
    }
    text
}
