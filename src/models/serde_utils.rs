//! Serde helpers for loosely typed backend payloads.

use serde::Deserializer;
use std::fmt;

/// Deserialize an identifier that the backend may send as a JSON string or
/// as a JSON number into a `String`.
///
/// Usage:
/// ```ignore
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Example {
///     #[serde(deserialize_with = "crate::models::serde_utils::string_or_number")]
///     id: String,
/// }
/// ```
pub fn string_or_number<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdVisitor;

    impl serde::de::Visitor<'_> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer identifier")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(v)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(v.to_string())
        }
    }

    de.deserialize_any(IdVisitor)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "super::string_or_number")]
        id: String,
    }

    #[test]
    fn accepts_numeric_and_string_ids() {
        let numeric: Row = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        let text: Row = serde_json::from_str(r#"{"id": "a1b2"}"#).unwrap();
        assert_eq!(numeric.id, "42");
        assert_eq!(text.id, "a1b2");
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(serde_json::from_str::<Row>(r#"{"id": [1]}"#).is_err());
    }
}
