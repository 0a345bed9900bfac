//! Number formatting for prices and quantities

/// Formats a number with `,` thousands separators and the given number of
/// decimals (0 to 3, anything else falls back to 2).
///
/// `format_number_with_decimals(1234.567, 2)` gives `"1,234.57"`.
pub fn format_number_with_decimals(value: f64, decimals: u8) -> String {
    let formatted = match decimals {
        0 => format!("{:.0}", value),
        1 => format!("{:.1}", value),
        2 => format!("{:.2}", value),
        3 => format!("{:.3}", value),
        _ => format!("{:.2}", value),
    };

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    // Group digits in threes from the right
    let mut result = String::new();
    let chars: Vec<char> = integer_part.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 && *c != '-' {
            result.push(',');
        }
        result.push(*c);
    }
    let formatted_integer = result.chars().rev().collect::<String>();

    match decimal_part {
        Some(d) => format!("{}.{}", formatted_integer, d),
        None => formatted_integer,
    }
}

/// Two decimals with thousands separators: `1234567.891` → `"1,234,567.89"`.
pub fn format_money(value: f64) -> String {
    format_number_with_decimals(value, 2)
}

/// Price as shown on product cards: `"$24.99"`.
pub fn format_price(value: f64) -> String {
    if value < 0.0 {
        format!("-${}", format_money(-value))
    } else {
        format!("${}", format_money(value))
    }
}

/// Whole number with thousands separators: `1234567.0` → `"1,234,567"`.
pub fn format_number_int(value: f64) -> String {
    format_number_with_decimals(value, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "1,234.56");
        assert_eq!(format_money(1234567.89), "1,234,567.89");
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(-1234.56), "-1,234.56");
        assert_eq!(format_money(-123.0), "-123.00");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1,235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1,234.6");
        assert_eq!(format_number_with_decimals(1234.567, 2), "1,234.57");
        assert_eq!(format_number_with_decimals(1234.567, 3), "1,234.567");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(24.99), "$24.99");
        assert_eq!(format_price(1500.0), "$1,500.00");
        assert_eq!(format_price(-5.0), "-$5.00");
    }

    #[test]
    fn test_format_number_int() {
        assert_eq!(format_number_int(1234567.0), "1,234,567");
        assert_eq!(format_number_int(0.0), "0");
        assert_eq!(format_number_int(-1234.0), "-1,234");
    }
}
