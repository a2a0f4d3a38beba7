//! Number formatting for tables and totals (es-CL: `.` thousands, `,` decimals).

/// Thousands separated with `.`, decimals with `,`: `1234.567, 2` → `1.234,57`.
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    match decimal_part {
        Some(d) => format!("{}{},{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Pesos have no minor unit.
pub fn format_money(value: f64) -> String {
    format!("$ {}", format_number_with_decimals(value, 0))
}

pub fn format_number_int(value: f64) -> String {
    format_number_with_decimals(value, 0)
}

/// Parse user input written either way: `36.720`, `36720,5`, `36720.5`.
/// A dot followed by exactly three digits in every group is a thousands mark.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let raw = raw.trim().trim_start_matches('$').trim();
    if raw.is_empty() {
        return None;
    }
    let normalized = if raw.contains(',') {
        raw.replace('.', "").replace(',', ".")
    } else {
        let groups: Vec<&str> = raw.split('.').collect();
        let thousands = groups.len() > 1 && groups[1..].iter().all(|g| g.len() == 3);
        if thousands {
            raw.replace('.', "")
        } else {
            raw.to_string()
        }
    };
    normalized.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(4590.0), "$ 4.590");
        assert_eq!(format_money(1234567.4), "$ 1.234.567");
        assert_eq!(format_money(0.0), "$ 0");
        assert_eq!(format_money(-36720.0), "$ -36.720");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1.235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1.234,6");
        assert_eq!(format_number_with_decimals(34.5, 2), "34,50");
        assert_eq!(format_number_with_decimals(999.0, 0), "999");
    }

    #[test]
    fn test_format_number_int() {
        assert_eq!(format_number_int(1234567.0), "1.234.567");
        assert_eq!(format_number_int(-1234.0), "-1.234");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("36.720"), Some(36720.0));
        assert_eq!(parse_amount("$ 1.234.567"), Some(1234567.0));
        assert_eq!(parse_amount("36720,5"), Some(36720.5));
        assert_eq!(parse_amount("1.234,50"), Some(1234.5));
        assert_eq!(parse_amount("36720.5"), Some(36720.5));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
    }
}
