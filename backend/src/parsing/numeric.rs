//! Locale-tolerant numeric coercion.

/// Convert a raw cell to a number.
///
/// Empty text is `None`, never zero. The first comma is read as a decimal
/// separator (`"12,5"` is `12.5`). Unparseable and non-finite results are
/// `None` as well, so callers filter with a presence check.
pub fn to_num(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = trimmed.replacen(',', ".", 1);
    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// [`to_num`] restricted to strictly positive values.
pub fn to_positive(value: &str) -> Option<f64> {
    to_num(value).filter(|v| *v > 0.0)
}

/// Round to one decimal place, halves toward positive infinity.
pub fn round1(x: f64) -> f64 {
    (x * 10.0 + 0.5).floor() / 10.0
}

/// Round to six decimal places (about 0.1 m for coordinates).
pub fn round6(x: f64) -> f64 {
    (x * 1e6).round() / 1e6
}
