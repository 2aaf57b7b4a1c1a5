/// Serde helpers for partial-update payloads
///
/// Partial updates need three states per nullable column: "leave it
/// alone", "set it to null", and "set it to a value". A plain
/// `Option<Option<T>>` field loses the first distinction because serde
/// deserializes both a missing key and an explicit `null` to the outer
/// `None`. Annotating the field with `#[serde(default, deserialize_with =
/// "double_option")]` restores it:
///
/// - key missing      → `None`            (field untouched)
/// - key set to null  → `Some(None)`      (column cleared)
/// - key set to value → `Some(Some(v))`   (column updated)

use serde::{Deserialize, Deserializer};

/// Deserializer for `Option<Option<T>>` update fields.
///
/// Wraps whatever value is present (including `null`) in the outer
/// `Some`; the `default` attribute supplies `None` when the key is
/// missing entirely.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        link: Option<Option<String>>,
    }

    #[test]
    fn test_missing_key_is_untouched() {
        let patch: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(patch.link, None);
    }

    #[test]
    fn test_null_clears() {
        let patch: Patch = serde_json::from_str(r#"{"link": null}"#).unwrap();
        assert_eq!(patch.link, Some(None));
    }

    #[test]
    fn test_value_sets() {
        let patch: Patch = serde_json::from_str(r#"{"link": "https://example.com"}"#).unwrap();
        assert_eq!(patch.link, Some(Some("https://example.com".to_string())));
    }
}
