//! Tolerant parsing of spreadsheet cells.
//!
//! Upstream sheets mix Italian decimals ("0,45"), whole percentages ("67"),
//! raw fractions ("0.67") and suffixed percentages ("67%"). None of these
//! parsers fail: anything unreadable degrades to zero.

pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Parse a decimal cell, accepting a comma as the decimal separator.
/// Trailing decorations are ignored ("0,5 gol" is 0.5).
pub fn normalize_decimal(raw: &str) -> f64 {
    leading_number(&comma_to_dot(raw), true).unwrap_or(0.0)
}

/// Parse a non-negative count from the leading digits ("12 pres" is 12, "10,0" is 10).
pub fn normalize_int(raw: &str) -> u32 {
    match leading_number(&comma_to_dot(raw), false) {
        Some(v) if v >= 0.0 => v.trunc().min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

/// Per-match rate: like [`normalize_decimal`] but never negative.
pub fn normalize_rate(raw: &str) -> f64 {
    normalize_decimal(raw).max(0.0)
}

/// Win rate in [0,1] from "67%", "67", "0,67" or "0.67".
pub fn normalize_percent01(raw: &str) -> f64 {
    let s = comma_to_dot(raw);
    if s.is_empty() {
        return 0.0;
    }
    if let Some(stripped) = s.strip_suffix('%') {
        return leading_number(stripped.trim(), true)
            .map(|n| clamp01(n / 100.0))
            .unwrap_or(0.0);
    }
    match leading_number(&s, true) {
        Some(n) if n > 1.0 => clamp01(n / 100.0),
        Some(n) => clamp01(n),
        None => 0.0,
    }
}

fn comma_to_dot(raw: &str) -> String {
    raw.trim().replacen(',', ".", 1)
}

/// Longest numeric prefix: optional sign and digits, plus (for decimals) one
/// fractional part and an exponent. `None` when no digit is found.
fn leading_number(s: &str, decimal: bool) -> Option<f64> {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let start = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut end = digits_from(start);
    let mut digits = end - start;

    if decimal {
        if bytes.get(end) == Some(&b'.') {
            let frac_end = digits_from(end + 1);
            if digits > 0 || frac_end > end + 1 {
                digits += frac_end - (end + 1);
                end = frac_end;
            }
        }
        if digits > 0 && matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp = end + 1;
            if matches!(bytes.get(exp), Some(b'+' | b'-')) {
                exp += 1;
            }
            let exp_end = digits_from(exp);
            if exp_end > exp {
                end = exp_end;
            }
        }
    }

    if digits == 0 {
        return None;
    }
    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
