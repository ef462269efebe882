//! Parsing of user-entered monetary amounts.

/// Parse locale-formatted numeric text into a number.
///
/// A single decimal comma is accepted in place of a decimal point
/// (`"12,50"` → `12.5`). Returns `None` for empty, malformed, or
/// non-finite input — never panics.
///
/// Zero and negative values parse successfully; rejecting them is the
/// caller's concern: transactions require strictly positive amounts,
/// balance entry allows zero but not negative.
pub fn parse_amount(input: &str) -> Option<f64> {
    let normalized = input.trim().replacen(',', ".", 1);
    if normalized.is_empty() {
        return None;
    }
    let value: f64 = normalized.parse().ok()?;
    value.is_finite().then_some(value)
}
