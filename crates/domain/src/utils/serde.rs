//! Serialization helpers for loosely typed upstream fields
//!
//! Legacy endpoints are inconsistent about scalar types: identifiers come
//! back as `123` or `"123"`, flags as `true` or `"true"`. These modules accept
//! either spelling and always serialize the canonical one.

use serde::{Deserialize, Deserializer, Serializer};

/// Serde serialization result type
type SerializeResult<S> = Result<<S as Serializer>::Ok, <S as Serializer>::Error>;

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrString {
    Bool(bool),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum U64OrString {
    Number(u64),
    Text(String),
}

/// `bool` that may arrive as `true` or `"true"`.
///
/// # Usage
/// ```rust
/// use incapsula_domain::utils::serde::bool_or_string;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Example {
///     #[serde(with = "bool_or_string")]
///     enabled: bool,
/// }
///
/// let parsed: Example = serde_json::from_str(r#"{"enabled": "true"}"#).unwrap();
/// assert!(parsed.enabled);
/// ```
pub mod bool_or_string {
    use super::*;

    pub fn serialize<S>(value: &bool, serializer: S) -> SerializeResult<S>
    where
        S: Serializer,
    {
        serializer.serialize_bool(*value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        match BoolOrString::deserialize(deserializer)? {
            BoolOrString::Bool(value) => Ok(value),
            BoolOrString::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" | "" => Ok(false),
                other => Err(serde::de::Error::custom(format!("invalid boolean: {other}"))),
            },
        }
    }
}

/// `u64` identifier that may arrive as `123` or `"123"`.
pub mod u64_or_string {
    use super::*;

    pub fn serialize<S>(value: &u64, serializer: S) -> SerializeResult<S>
    where
        S: Serializer,
    {
        serializer.serialize_u64(*value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match U64OrString::deserialize(deserializer)? {
            U64OrString::Number(value) => Ok(value),
            U64OrString::Text(text) => text
                .trim()
                .parse()
                .map_err(|e| serde::de::Error::custom(format!("invalid identifier {text:?}: {e}"))),
        }
    }
}
