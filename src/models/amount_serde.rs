use num_bigint::BigUint;
use serde::{self, Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Accepts a JSON integer of any size or a decimal string.
///
/// Relies on serde_json's `arbitrary_precision` feature: numbers reach us as
/// their original digits and never pass through `f64`.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
where
    D: Deserializer<'de>,
{
    let digits = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.to_string(),
        Value::String(s) => s,
        other => {
            return Err(serde::de::Error::custom(format!(
                "expecting an integer amount, got {other}"
            )))
        }
    };
    parse_amount(&digits).map_err(serde::de::Error::custom)
}

fn parse_amount(digits: &str) -> Result<BigUint, String> {
    let trimmed = digits.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!(
            "expecting a non-negative integer amount, got {trimmed:?}"
        ));
    }
    BigUint::from_str(trimmed).map_err(|e| format!("invalid amount {trimmed:?}: {e}"))
}
