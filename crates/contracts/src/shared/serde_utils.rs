//! Tolerant decoders for values the backend serializes inconsistently.
//!
//! Decimal fields come out of the API as strings (`"12500.00"`), while
//! computed fields and older endpoints send plain JSON numbers.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn parse_money(raw: NumberOrString) -> Result<f64, String> {
    match raw {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(0.0);
            }
            s.parse::<f64>()
                .map_err(|e| format!("invalid decimal '{}': {}", s, e))
        }
    }
}

/// Decimal that may arrive as a number or a string. Empty strings become `0.0`.
pub fn de_money<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = NumberOrString::deserialize(deserializer)?;
    parse_money(raw).map_err(serde::de::Error::custom)
}

/// Same as [`de_money`] but keeps `null` as `None`.
pub fn de_opt_money<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrString>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(v) => parse_money(v).map(Some).map_err(serde::de::Error::custom),
    }
}

/// Format an amount the way the store prints prices: `$12.500` (CLP, no decimals).
pub fn format_money(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let negative = rounded < 0;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Priced {
        #[serde(deserialize_with = "de_money")]
        price: f64,
        #[serde(default, deserialize_with = "de_opt_money")]
        weight: Option<f64>,
    }

    #[test]
    fn test_money_from_string_and_number() {
        let a: Priced = serde_json::from_str(r#"{"price": "12500.50", "weight": null}"#).unwrap();
        assert_eq!(a.price, 12500.5);
        assert_eq!(a.weight, None);

        let b: Priced = serde_json::from_str(r#"{"price": 990, "weight": "0.35"}"#).unwrap();
        assert_eq!(b.price, 990.0);
        assert_eq!(b.weight, Some(0.35));
    }

    #[test]
    fn test_money_rejects_garbage() {
        assert!(serde_json::from_str::<Priced>(r#"{"price": "abc"}"#).is_err());
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0");
        assert_eq!(format_money(999.0), "$999");
        assert_eq!(format_money(12500.4), "$12.500");
        assert_eq!(format_money(1234567.0), "$1.234.567");
        assert_eq!(format_money(-4500.0), "-$4.500");
    }
}
