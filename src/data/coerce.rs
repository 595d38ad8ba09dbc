//! Numeric coercion for value cells.
//!
//! Cells are coerced permissively: anything that is not a number becomes NaN
//! instead of failing the whole file. Renderers must tolerate NaN values.

/// Coerce a raw cell into a number.
///
/// - Surrounding whitespace is ignored; a blank cell is `0`.
/// - Decimal and exponent notation (`12`, `-3.5`, `.5`, `1e3`).
/// - Unsigned `0x`, `0o` and `0b` integer literals.
/// - `Infinity` with an optional sign.
/// - Anything else, including `inf`, `NaN` or `1,000`, is NaN.
pub fn coerce_number(raw: &str) -> f64 {
    let s = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(value) = parse_radix_literal(s) {
        return value;
    }

    if is_decimal_literal(s) {
        return s.parse::<f64>().unwrap_or(f64::NAN);
    }

    f64::NAN
}

/// Parse `0x..`, `0o..` or `0b..`. Returns `Some(NaN)` for a prefix with bad digits.
fn parse_radix_literal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };

    let digits = &s[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
    });
    Some(value.unwrap_or(f64::NAN))
}

/// Restrict what we hand to `str::parse` so words like `inf` or `nan` stay NaN.
fn is_decimal_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let starts_ok = unsigned
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '.');

    starts_ok
        && unsigned
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
}
