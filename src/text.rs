//! Small text helpers for the customizer UI.

pub const DEFAULT_WORD_LIMIT: usize = 5;
const MAX_FRACTION_DIGITS: usize = 3;

/// Format with `,` thousands separators and at most three fraction digits
///
/// `1234567.891` gives `1,234,567.891`; `-1000.5` gives `-1,000.5`.
/// Negative values keep their sign even when they round to zero (`-0`).
pub fn format_number(number: f64) -> String {
    if !number.is_finite() {
        return if number.is_nan() {
            "NaN".to_string()
        } else if number > 0.0 {
            "∞".to_string()
        } else {
            "-∞".to_string()
        };
    }

    let rounded = format!("{:.*}", MAX_FRACTION_DIGITS, number.abs());
    let (integer, fraction) = rounded.split_once('.').unwrap_or((&rounded, ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let mut out = String::new();
    if number.is_sign_negative() {
        out.push('-');
    }
    out.push_str(&grouped);
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Keep the first `word_limit` whitespace-separated words, appending `...`
/// when anything was cut
///
/// Runs of whitespace separate words. Leading or trailing whitespace counts
/// as an empty word at that end, so `" a b"` has three.
pub fn truncate_to_words(input: &str, word_limit: usize) -> String {
    if input.is_empty() {
        return String::new();
    }

    let pieces: Vec<&str> = input.split(char::is_whitespace).collect();
    let last = pieces.len() - 1;
    let words: Vec<&str> = pieces
        .into_iter()
        .enumerate()
        .filter(|(i, word)| !word.is_empty() || *i == 0 || *i == last)
        .map(|(_, word)| word)
        .collect();
    if words.len() > word_limit {
        format!("{}...", words[..word_limit].join(" "))
    } else {
        input.to_string()
    }
}
