//! Number formatting for labels and tick text.

/// Fixed-point formatting with `digits` decimals.
///
/// Exact ties round away from zero (`0.125` → `"0.13"`), and a negative
/// value that rounds to zero keeps its sign only if it is really below zero,
/// so `-0.0` prints as `"0.00"`.
pub fn to_fixed(value: f64, digits: usize) -> String {
    let magnitude = value.abs();
    let magnitude = if is_exact_tie(magnitude, digits) {
        // Step to the next representable value so the formatter rounds up.
        f64::from_bits(magnitude.to_bits() + 1)
    } else {
        magnitude
    };
    let body = format!("{:.*}", digits, magnitude);
    if value < 0.0 { format!("-{body}") } else { body }
}

/// True when the exact decimal expansion of `magnitude` stops with a single
/// `5` right after the last kept digit.
fn is_exact_tie(magnitude: f64, digits: usize) -> bool {
    if !magnitude.is_finite() {
        return false;
    }
    let exact = format!("{:.*}", digits + 40, magnitude);
    let Some((_, fraction)) = exact.split_once('.') else {
        return false;
    };
    let tail = &fraction[digits..];
    tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0')
}

/// Insert `,` every three digits in the integer part of a formatted number.
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
