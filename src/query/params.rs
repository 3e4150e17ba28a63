//! Lenient coercion of path segments into integers.
//!
//! Path parameters are parsed the forgiving way browsers' `parseInt` does: leading whitespace
//! and a sign are accepted, then the longest run of digits is used and the rest ignored
//! (`"12abc"` is 12, `"3.9"` is 3). A `0x` prefix switches to hexadecimal. Input with no
//! leading digits yields `None` rather than an error.

/// Number of cards returned by the random endpoint when the count is missing or zero.
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// Parse the leading integer of `raw`, saturating at the `i64` bounds.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x" | "0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for digit in digits.chars().map_while(|c| c.to_digit(radix)) {
        seen_digit = true;
        value = value
            .saturating_mul(i64::from(radix))
            .saturating_add(i64::from(digit));
    }

    seen_digit.then(|| if negative { value.saturating_neg() } else { value })
}

/// Resolve the number of cards to draw for a `count` path segment.
///
/// Unparseable input and zero fall back to [`DEFAULT_SAMPLE_SIZE`]. A negative count drops
/// that many cards from the end of the shuffled collection, so `-2` over 10 cards yields 8.
pub fn sample_len(raw: &str, available: usize) -> usize {
    match parse_int_prefix(raw) {
        None | Some(0) => DEFAULT_SAMPLE_SIZE,
        Some(count) if count > 0 => usize::try_from(count).unwrap_or(usize::MAX),
        Some(count) => {
            let dropped = usize::try_from(count.unsigned_abs()).unwrap_or(usize::MAX);
            available.saturating_sub(dropped)
        }
    }
}
