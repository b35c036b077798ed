// src/github/number.rs
// =============================================================================
// This module turns the human-readable counts GitHub shows on its pages
// ("1,234", "1.2k", "3m") into plain integers.
//
// Rules:
// - Surrounding whitespace and ',' thousands separators are ignored
// - One trailing 'k' (x1,000) or 'm' (x1,000,000), either case, scales it
// - What is left must be an unsigned decimal: "12", "1.25" or ".5"
// - Fractions are truncated toward zero after scaling
// - Anything else (empty, signs, exponents, stray letters, overflow) is 0
//
// The scaling is done on the decimal digits rather than on an f64, so
// "1.2k" is exactly 1200 and never 1199.
// =============================================================================

/// Parses a count like `"1,234"`, `"1.2k"` or `"3M"` into an integer.
///
/// Never fails: input that is not a count yields 0.
pub fn normalize_count(text: &str) -> u64 {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();

    let (digits, scale) = match cleaned.chars().last() {
        Some('k') | Some('K') => (&cleaned[..cleaned.len() - 1], 3),
        Some('m') | Some('M') => (&cleaned[..cleaned.len() - 1], 6),
        _ => (cleaned.as_str(), 0),
    };

    scale_decimal(digits, scale).unwrap_or(0)
}

// Multiplies a plain decimal string by 10^scale and truncates the result.
//
// Returns None when the text is not a plain unsigned decimal or the value
// does not fit in a u64.
//
// Example:
//   scale_decimal("1.25", 3) -> Some(1250)
//   scale_decimal("1.2345", 3) -> Some(1234)
fn scale_decimal(text: &str, scale: usize) -> Option<u64> {
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (text, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    // Move the decimal point `scale` places right, dropping extra fraction
    // digits and padding missing ones with zeros
    let mut shifted = String::with_capacity(whole.len() + scale);
    shifted.push_str(whole);
    shifted.extend(fraction.chars().chain(std::iter::repeat('0')).take(scale));

    let shifted = shifted.trim_start_matches('0');
    if shifted.is_empty() {
        return Some(0);
    }
    shifted.parse().ok()
}
