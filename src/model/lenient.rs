//! Tolerant field types for hand-edited or tool-specific SBOMs.
//!
//! Modelled fields must never fail a document the checker does not need to
//! understand, and must be written back exactly as they were read.
//! [`LenientText`] keeps the original JSON value behind a text view;
//! [`Lenient`] falls back to the raw value when a container has the wrong
//! shape.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A string-like field that remembers the JSON value it was read from.
///
/// Strings are the common case. Numbers and booleans are readable as text
/// (`"version": 2` is common) but are written back as numbers and booleans.
/// Any other value (null, arrays, objects) has no text and is written back
/// unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum LenientText {
    Text(String),
    Other { raw: Value, text: Option<String> },
}

impl LenientText {
    /// Classify a JSON value
    #[must_use]
    pub fn from_value(raw: Value) -> Self {
        match raw {
            Value::String(s) => Self::Text(s),
            Value::Number(ref n) => Self::Other {
                text: Some(n.to_string()),
                raw,
            },
            Value::Bool(b) => Self::Other {
                text: Some(b.to_string()),
                raw,
            },
            raw => Self::Other { raw, text: None },
        }
    }

    /// The text view, if the value is a string, number or boolean
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Other { text, .. } => text.as_deref(),
        }
    }
}

impl From<String> for LenientText {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for LenientText {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl Serialize for LenientText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Other { raw, .. } => raw.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for LenientText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// A typed value, or the raw JSON when it does not fit the type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Parsed(T),
    Raw(Value),
}

impl<T> Lenient<T> {
    /// The typed value, if the JSON had the expected shape
    #[must_use]
    pub const fn parsed(&self) -> Option<&T> {
        match self {
            Self::Parsed(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    /// Mutable access to the typed value
    pub fn parsed_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Parsed(value) => Some(value),
            Self::Raw(_) => None,
        }
    }
}

impl<T> From<T> for Lenient<T> {
    fn from(value: T) -> Self {
        Self::Parsed(value)
    }
}

/// A list whose entries are each kept raw when they do not fit `T`.
pub type LenientList<T> = Lenient<Vec<Lenient<T>>>;

impl<T> Lenient<Vec<Lenient<T>>> {
    /// Build a list of typed entries
    #[must_use]
    pub fn from_items(items: Vec<T>) -> Self {
        Self::Parsed(items.into_iter().map(Lenient::Parsed).collect())
    }

    /// The entries that have the expected shape, in order
    pub fn entries(&self) -> impl Iterator<Item = &T> {
        self.parsed()
            .into_iter()
            .flatten()
            .filter_map(Lenient::parsed)
    }
}

/// Deserialize a present key as `Some`, including an explicit `null`.
///
/// Paired with `#[serde(default)]`, an absent key stays `None` and is not
/// written back, while `"key": null` survives a round trip.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Text view of an optional lenient field
pub(crate) fn text(field: Option<&LenientText>) -> Option<&str> {
    field.and_then(LenientText::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize, Serialize)]
    struct Holder {
        #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
        field: Option<LenientText>,
        #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
        list: Option<Lenient<Vec<String>>>,
    }

    fn holder(value: Value) -> Holder {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_text_view_variants() {
        let view = |v: Value| text(holder(json!({"field": v})).field.as_ref()).map(str::to_string);
        assert_eq!(view(json!("1.0")).as_deref(), Some("1.0"));
        assert_eq!(view(json!(2)).as_deref(), Some("2"));
        assert_eq!(view(json!(true)).as_deref(), Some("true"));
        assert_eq!(view(json!(null)), None);
        assert_eq!(view(json!({"nested": 1})), None);
        assert!(holder(json!({})).field.is_none());
    }

    #[test]
    fn test_raw_values_round_trip() {
        let input = json!({"field": 2, "list": {"not": "a list"}});
        let back = serde_json::to_value(holder(input.clone())).unwrap();
        assert_eq!(back, input);

        let input = json!({"field": null, "list": null});
        let back = serde_json::to_value(holder(input.clone())).unwrap();
        assert_eq!(back, input);

        let input = json!({"field": ["a"], "list": ["x", 1]});
        let back = serde_json::to_value(holder(input.clone())).unwrap();
        assert_eq!(back, input);
    }

    #[test]
    fn test_list_keeps_odd_entries() {
        let list: LenientList<String> = serde_json::from_value(json!(["a", 1, "b"])).unwrap();
        assert_eq!(list.entries().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(serde_json::to_value(&list).unwrap(), json!(["a", 1, "b"]));

        let list = LenientList::from_items(vec!["x".to_string()]);
        assert_eq!(list.entries().count(), 1);
    }

    #[test]
    fn test_lenient_parses_when_shape_fits() {
        let h = holder(json!({"list": ["a", "b"]}));
        assert_eq!(h.list.unwrap().parsed().map(Vec::len), Some(2));

        let h = holder(json!({"list": "a"}));
        assert!(h.list.unwrap().parsed().is_none());
    }
}
