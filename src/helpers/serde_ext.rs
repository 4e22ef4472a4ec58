//! Serde helpers for loosely typed backend fields
//!
//! The backend serializes some years as strings (e.g. `"host_year": "2004"`)
//! and medal counts as `null` for editions without data.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Str(String),
}

impl NumberOrString {
    fn into_i64<E: de::Error>(self) -> Result<i64, E> {
        match self {
            NumberOrString::Int(v) => Ok(v),
            NumberOrString::Float(v) if v.fract() == 0.0 => Ok(v as i64),
            NumberOrString::Float(v) => Err(E::custom(format!("expected an integer, got {v}"))),
            NumberOrString::Str(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| E::custom(format!("expected an integer, got {s:?}"))),
        }
    }
}

/// Deserialize a year given as a number or a numeric string
pub fn de_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = NumberOrString::deserialize(deserializer)?.into_i64::<D::Error>()?;
    i32::try_from(value).map_err(|_| de::Error::custom(format!("year out of range: {value}")))
}

/// Deserialize a nullable, non-negative count
pub fn de_opt_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => {
            let value = raw.into_i64::<D::Error>()?;
            u32::try_from(value)
                .map(Some)
                .map_err(|_| de::Error::custom(format!("count must be non-negative: {value}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "de_year")]
        year: i32,
        #[serde(default, deserialize_with = "de_opt_count")]
        gold: Option<u32>,
    }

    #[test]
    fn test_year_from_string_and_number() {
        let a: Row = serde_json::from_str(r#"{"year":"1996","gold":null}"#).expect("string year");
        let b: Row = serde_json::from_str(r#"{"year":1996,"gold":7}"#).expect("number year");
        assert_eq!(a.year, 1996);
        assert_eq!(a.gold, None);
        assert_eq!(b.gold, Some(7));
    }

    #[test]
    fn test_negative_count_rejected() {
        assert!(serde_json::from_str::<Row>(r#"{"year":1996,"gold":-1}"#).is_err());
    }

    #[test]
    fn test_missing_count_defaults_to_none() {
        let row: Row = serde_json::from_str(r#"{"year":2000}"#).expect("missing gold");
        assert_eq!(row.gold, None);
    }
}
