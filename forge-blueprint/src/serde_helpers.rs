//! Serde helpers for lenient editor input.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;

/// Deserialize an environment map, accepting scalar values of any kind.
///
/// The editor sometimes emits `"PORT": 5432` instead of `"PORT": "5432"`.
pub fn string_map<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => String::new(),
                other => {
                    return Err(D::Error::custom(format!(
                        "environment variable '{key}' must be a scalar, found {other}"
                    )));
                }
            };
            Ok((key, value))
        })
        .collect()
}
