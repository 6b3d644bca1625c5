//! Integer parsing for hosts backed by JavaScript, which hand every number over as a
//! double.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

use crate::rum::constants::LOG_TARGET;

/// Reads an integer, accepting whole doubles such as `2048.0`.
pub(crate) fn number_to_i64(number: &Number) -> Option<i64> {
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|value| value.is_finite() && value.fract() == 0.0)
            .filter(|value| *value >= i64::MIN as f64 && *value <= i64::MAX as f64)
            .map(|value| value as i64)
    })
}

pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    number_to_i64(&number).ok_or_else(|| D::Error::custom(format!("{number} is not an integer")))
}

pub(crate) fn lenient_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Number>::deserialize(deserializer)? {
        Some(number) => number_to_i64(&number)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("{number} is not an integer"))),
        None => Ok(None),
    }
}

/// Like [`lenient_optional_i64`], but anything that is not a whole number reads as
/// `None` instead of failing the surrounding value.
pub(crate) fn optional_i64_or_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let parsed = match &value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(number)) => number_to_i64(number),
        Some(_) => None,
    };
    if parsed.is_none() {
        log::debug!(target: LOG_TARGET, "ignoring non-integer value {value:?}");
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Block {
        #[serde(default, deserialize_with = "optional_i64_or_none")]
        size: Option<i64>,
    }

    fn size_of(value: Value) -> Option<i64> {
        serde_json::from_value::<Block>(value).unwrap().size
    }

    #[test]
    fn whole_doubles_read_as_integers() {
        assert_eq!(number_to_i64(&Number::from(7)), Some(7));
        assert_eq!(number_to_i64(&Number::from_f64(2048.0).unwrap()), Some(2048));
        assert_eq!(number_to_i64(&Number::from_f64(1.5).unwrap()), None);
        assert_eq!(number_to_i64(&Number::from_f64(1e300).unwrap()), None);
    }

    #[test]
    fn unusable_values_read_as_none() {
        assert_eq!(size_of(json!({"size": 2048.0})), Some(2048));
        assert_eq!(size_of(json!({"size": 1.5})), None);
        assert_eq!(size_of(json!({"size": "big"})), None);
        assert_eq!(size_of(json!({"size": null})), None);
        assert_eq!(size_of(json!({})), None);
    }
}
