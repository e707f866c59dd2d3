//! Canonicalization of raw phone cells into digit strings.
//!
//! Contact lists usually pass through a spreadsheet before they reach us, and
//! spreadsheets love to turn `09171234567` into the float `9171234567.0`. The
//! normalizer undoes the common forms of that damage using one signal taken
//! before any numeric interpretation: whether the raw text began with `0`.
//!
//! Normalization never fails. Garbage in produces a (possibly empty) digit
//! string out, and the format check decides what to do with it.

use std::borrow::Cow;

use crate::input::Cell;

/// Digit count at which a lost leading zero is restored.
const RECOVERABLE_LEN: usize = 10;

/// Normalize a raw cell into a canonical digit string.
pub fn normalize_phone(cell: &Cell) -> String {
    if cell.is_null() {
        return String::new();
    }
    normalize_phone_str(&cell.as_text())
}

/// Normalize raw phone text into a canonical digit string.
///
/// ```
/// use smsprep::phone::normalize_phone_str;
///
/// assert_eq!(normalize_phone_str("+63 917-123-4567"), "639171234567");
/// assert_eq!(normalize_phone_str("09171234567.0"), "09171234567");
/// assert_eq!(normalize_phone_str("091234567890.99"), "091234567890");
/// ```
pub fn normalize_phone_str(raw: &str) -> String {
    let starts_with_zero = raw.starts_with('0');

    let working: Cow<'_, str> = if raw.contains('.') {
        Cow::Owned(resolve_decimal(raw, starts_with_zero))
    } else {
        Cow::Borrowed(raw)
    };

    let mut digits: String = working.chars().filter(|c| c.is_ascii_digit()).collect();

    if starts_with_zero && digits.len() == RECOVERABLE_LEN {
        digits.insert(0, '0');
    }

    digits
}

/// Resolve text containing a decimal point to its integer portion.
///
/// Whole numbers are cut textually at the point so that every digit before
/// it survives exactly; genuine fractions are truncated toward zero.
fn resolve_decimal(raw: &str, starts_with_zero: bool) -> String {
    let value = match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return integer_part(raw).to_string(),
    };

    if value.fract() == 0.0 {
        // A textual cut of `6.39123456789E+11` would keep only the `6`.
        if is_scientific(raw) {
            return render_integer(value);
        }
        return integer_part(raw).to_string();
    }

    let truncated = render_integer(value.trunc());
    if starts_with_zero && !truncated.starts_with('0') {
        format!("0{}", truncated)
    } else {
        truncated
    }
}

/// Everything before the first decimal point.
fn integer_part(raw: &str) -> &str {
    raw.split('.').next().unwrap_or("")
}

fn is_scientific(raw: &str) -> bool {
    raw.contains(['e', 'E'])
}

/// Decimal text of a finite whole-valued float, without exponent.
fn render_integer(value: f64) -> String {
    format!("{:.0}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_cells_normalize_to_empty() {
        assert_eq!(normalize_phone(&Cell::Empty), "");
        assert_eq!(normalize_phone(&Cell::Float(f64::NAN)), "");
        assert_eq!(normalize_phone_str(""), "");
        assert_eq!(normalize_phone_str("   "), "");
    }

    #[test]
    fn test_clean_numbers_are_unchanged() {
        assert_eq!(normalize_phone_str("639123456789"), "639123456789");
        assert_eq!(normalize_phone_str("09123456789"), "09123456789");
    }

    #[test]
    fn test_whole_decimal_is_cut_textually() {
        assert_eq!(normalize_phone_str("639999999999.0"), "639999999999");
        assert_eq!(normalize_phone_str("091234567890.0"), "091234567890");
        assert_eq!(normalize_phone_str("09123456789.000"), "09123456789");
        assert_eq!(normalize_phone_str("639123456789.000000"), "639123456789");
    }

    #[test]
    fn test_fraction_truncates_without_rounding() {
        assert_eq!(normalize_phone_str("091234567890.99"), "091234567890");
        assert_eq!(normalize_phone_str("091234567890.01"), "091234567890");
        assert_eq!(normalize_phone_str("639123456780.5"), "639123456780");
        assert_eq!(normalize_phone_str("639123456789.25"), "639123456789");
        assert_eq!(normalize_phone_str("09123456789.9"), "09123456789");
    }

    #[test]
    fn test_fraction_too_fine_for_float_behaves_as_whole() {
        // Beyond f64 precision these parse as whole numbers, so the textual
        // cut applies and no rounding leaks into the result.
        assert_eq!(normalize_phone_str("639123456789.999999999"), "639123456789");
        assert_eq!(normalize_phone_str("639123456789.0000000001"), "639123456789");
    }

    #[test]
    fn test_separators_are_stripped() {
        assert_eq!(normalize_phone_str("639-123-456-789"), "639123456789");
        assert_eq!(normalize_phone_str("639 123 456 789"), "639123456789");
        assert_eq!(normalize_phone_str("(639) 123-456-789"), "639123456789");
        assert_eq!(normalize_phone_str("+639123456789"), "639123456789");
        assert_eq!(normalize_phone_str("639,123,456,789"), "639123456789");
        assert_eq!(normalize_phone_str("\"639123456789\""), "639123456789");
        assert_eq!(normalize_phone_str("0917-123-4567"), "09171234567");
    }

    #[test]
    fn test_negative_sign_is_dropped() {
        assert_eq!(normalize_phone_str("-639123456789"), "639123456789");
        assert_eq!(normalize_phone_str("-639123456789.5"), "639123456789");
    }

    #[test]
    fn test_unparseable_decimal_cuts_at_first_point() {
        assert_eq!(normalize_phone_str("0917.123.4567"), "0917");
        assert_eq!(normalize_phone_str("12a.34"), "12");
    }

    #[test]
    fn test_scientific_notation_expands() {
        assert_eq!(normalize_phone_str("6.39123456789E+11"), "639123456789");
        assert_eq!(normalize_phone_str("6.39123456789e11"), "639123456789");
        assert_eq!(normalize_phone_str("6.39123456789E+12"), "6391234567890");
    }

    #[test]
    fn test_lost_leading_zero_on_fraction_is_restored() {
        assert_eq!(normalize_phone_str("09171234567.5"), "09171234567");
    }

    #[test]
    fn test_ten_digits_after_leading_zero_gain_another_zero() {
        assert_eq!(normalize_phone_str("0917123456"), "00917123456");
        assert_eq!(normalize_phone_str("0 917 123 456"), "00917123456");
    }

    #[test]
    fn test_numeric_cells() {
        assert_eq!(normalize_phone(&Cell::Integer(639171234567)), "639171234567");
        assert_eq!(normalize_phone(&Cell::Float(639171234567.0)), "639171234567");
        // The leading zero is already gone once a spreadsheet stored a float.
        assert_eq!(normalize_phone(&Cell::Float(9171234567.0)), "9171234567");
    }
}
