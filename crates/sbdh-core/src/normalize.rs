//! Code-token normalisation for comparing annotation values.
//!
//! Ground-truth tables carry integer columns while model output is written as
//! raw text tokens, so the same code can arrive as `1`, `"1"`, `"1.0"` or
//! `" 1 "`. Both sides are passed through [`normalize_code`] before they are
//! joined or compared.

/// Normalise a code or row-identifier token into a canonical string.
///
/// # Rules
///
/// 1. Trim surrounding whitespace and one layer of matching quotes.
/// 2. If the remainder parses as a finite number with no fractional part,
///    render it as a plain integer (`"1.0"` → `"1"`, `"+2"` → `"2"`, `"-0"` → `"0"`).
/// 3. Otherwise return the trimmed token unchanged (`"true"` stays `"true"`).
pub fn normalize_code(raw: &str) -> String {
    let s = strip_quotes(raw.trim()).trim();
    if s.is_empty() {
        return String::new();
    }

    if let Ok(n) = s.parse::<i64>() {
        return n.to_string();
    }

    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            (f as i64).to_string()
        }
        _ => s.to_string(),
    }
}

fn strip_quotes(s: &str) -> &str {
    for q in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(q) && s.ends_with(q) {
            return &s[1..s.len() - 1];
        }
    }
    s
}
