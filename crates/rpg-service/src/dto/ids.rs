//! Lenient id parsing
//!
//! The client sends ids both as JSON numbers and as numeric strings
//! (`"usuarioId": "12"`), so every id field goes through these helpers.

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    fn into_id<E: de::Error>(self) -> Result<i64, E> {
        match self {
            Self::Number(id) => Ok(id),
            Self::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid id: {text:?}"))),
        }
    }
}

/// Id from a JSON value, accepting numbers and numeric strings
pub fn id_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn deserialize_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer)?.into_id()
}

/// Optional id. `null`, `0` and `""` all count as absent.
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(raw) => raw.into_id().map(|id| (id != 0).then_some(id)),
    }
}

/// List of ids. Entries that are not ids are dropped.
pub fn deserialize_id_list<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values
        .iter()
        .filter_map(id_from_value)
        .filter(|id| *id != 0)
        .collect())
}
