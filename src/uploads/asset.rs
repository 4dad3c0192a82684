//! Asset path input type.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A reference to an uploaded file, as found in stored content or API payloads.
///
/// Producers are inconsistent: most send a string, legacy records send an
/// object with a `url` field, and some send garbage. Deserializes from any JSON value:
///
/// | JSON                     | Variant                         |
/// |--------------------------|---------------------------------|
/// | `"a.png"`                | `Plain("a.png")`                |
/// | `{"url": "a.png"}`       | `Wrapped { url: Some(Plain) }`  |
/// | `{"url": {"url": "a"}}`  | `Wrapped { url: Some(Wrapped) }`|
/// | `{"name": "a.png"}`      | `Wrapped { url: None }`         |
/// | `42`, `[..]`, `true`     | `Unsupported(..)`               |
///
/// `null` is the absent case: read it as `Option<AssetPath>`. Arrays are
/// `Unsupported`, never a struct sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AssetPath {
    /// Any string form of the path.
    Plain(String),
    /// Legacy object shape carrying the path in `url`.
    Wrapped { url: Option<Box<AssetPath>> },
    /// Any other JSON value.
    Unsupported(Value),
}

impl<'de> Deserialize<'de> for AssetPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

impl AssetPath {
    /// Wrap a path in the legacy object shape.
    pub fn wrapped(inner: impl Into<AssetPath>) -> Self {
        Self::Wrapped {
            url: Some(Box::new(inner.into())),
        }
    }

    /// Classify an already-parsed JSON value.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Plain(s),
            Value::Object(mut map) => Self::Wrapped {
                url: match map.remove("url") {
                    None | Some(Value::Null) => None,
                    Some(inner) => Some(Box::new(Self::from_value(inner))),
                },
            },
            other => Self::Unsupported(other),
        }
    }

    /// Parse a JSON document into an optional asset path.
    ///
    /// Malformed JSON is treated as a plain string, since the caller asked to
    /// resolve it either way.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str::<Option<Self>>(raw).unwrap_or_else(|_| Some(Self::Plain(raw.into())))
    }
}

impl From<&str> for AssetPath {
    fn from(s: &str) -> Self {
        Self::Plain(s.to_string())
    }
}

impl From<String> for AssetPath {
    fn from(s: String) -> Self {
        Self::Plain(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_plain() {
        let path: AssetPath = serde_json::from_str(r#""uploads/a.png""#).unwrap();
        assert_eq!(path, AssetPath::Plain("uploads/a.png".into()));
    }

    #[test]
    fn test_deserialize_wrapped() {
        let path: AssetPath = serde_json::from_str(r#"{"url": "banner.svg"}"#).unwrap();
        assert_eq!(path, AssetPath::wrapped("banner.svg"));

        let nested: AssetPath = serde_json::from_str(r#"{"url": {"url": "a.png"}}"#).unwrap();
        assert_eq!(nested, AssetPath::wrapped(AssetPath::wrapped("a.png")));
    }

    #[test]
    fn test_deserialize_object_without_url() {
        let path: AssetPath = serde_json::from_str(r#"{"name": "a.png"}"#).unwrap();
        assert_eq!(path, AssetPath::Wrapped { url: None });

        let null_url: AssetPath = serde_json::from_str(r#"{"url": null}"#).unwrap();
        assert_eq!(null_url, AssetPath::Wrapped { url: None });
    }

    #[test]
    fn test_deserialize_unsupported() {
        let path: AssetPath = serde_json::from_str("42").unwrap();
        assert_eq!(path, AssetPath::Unsupported(serde_json::json!(42)));

        let path: AssetPath = serde_json::from_str(r#"["a.png"]"#).unwrap();
        assert!(matches!(path, AssetPath::Unsupported(_)));

        let path: AssetPath = serde_json::from_str(r#"{"url": 7}"#).unwrap();
        assert_eq!(
            path,
            AssetPath::Wrapped {
                url: Some(Box::new(AssetPath::Unsupported(serde_json::json!(7))))
            }
        );
    }

    #[test]
    fn test_null_is_absent() {
        let path: Option<AssetPath> = serde_json::from_str("null").unwrap();
        assert!(path.is_none());
    }

    #[test]
    fn test_from_json() {
        assert_eq!(AssetPath::from_json("null"), None);
        assert_eq!(
            AssetPath::from_json(r#"{"url":"a.png"}"#),
            Some(AssetPath::wrapped("a.png"))
        );
        // Not JSON at all: keep the raw text
        assert_eq!(
            AssetPath::from_json("uploads/a.png"),
            Some(AssetPath::Plain("uploads/a.png".into()))
        );
    }
}
