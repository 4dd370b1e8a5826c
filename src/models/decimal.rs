use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Reads a JSON number or numeric string into a `BigDecimal`; `null` reads as
/// zero.
///
/// Floats go through their shortest round-trip text form, so a feed value of
/// `0.02` becomes exactly `0.02` rather than its binary expansion.
pub fn from_number<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Null => return Ok(BigDecimal::default()),
        NumberOrText::Integer(n) => return Ok(BigDecimal::from(n)),
        NumberOrText::Float(n) if n.is_finite() => n.to_string(),
        NumberOrText::Float(n) => {
            return Err(serde::de::Error::custom(format!("non-finite number {}", n)))
        }
        NumberOrText::Text(s) => s,
    };
    BigDecimal::from_str(text.trim()).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "from_number")]
        value: BigDecimal,
    }

    fn decode(json: &str) -> BigDecimal {
        serde_json::from_str::<Sample>(json).unwrap().value
    }

    #[test]
    fn test_float_keeps_short_decimal_form() {
        assert_eq!(decode(r#"{"value": 0.02}"#), BigDecimal::from_str("0.02").unwrap());
        assert_eq!(decode(r#"{"value": 27.35}"#), BigDecimal::from_str("27.35").unwrap());
    }

    #[test]
    fn test_integer_and_string_forms() {
        assert_eq!(decode(r#"{"value": 12}"#), BigDecimal::from(12));
        assert_eq!(decode(r#"{"value": "1.005"}"#), BigDecimal::from_str("1.005").unwrap());
    }

    #[test]
    fn test_null_reads_as_zero() {
        assert_eq!(decode(r#"{"value": null}"#), BigDecimal::default());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(serde_json::from_str::<Sample>(r#"{"value": "n/a"}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"value": [1]}"#).is_err());
    }
}
