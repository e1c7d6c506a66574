//! Open Graph property schema and the metadata table.
//!
//! Core properties form a closed, ordered set ([`Property::ALL`]). Anything
//! else (e.g. `profile:username`, `fb:app_id`) lives in the same ordered
//! [`Metadata`] table as a free-form key.
//!
//! # Declaration Order
//!
//! | # | Property      | Key            | Required |
//! |---|---------------|----------------|----------|
//! | 1 | `title`       | `og:title`     | yes      |
//! | 2 | `type`        | `og:type`      | yes      |
//! | 3 | `image`       | `og:image`     | yes      |
//! | 4 | `url`         | `og:url`       | yes      |
//! | 5 | `description` | `og:description` | no     |
//! | 6 | `locale`      | `og:locale`    | no       |
//! | 7 | `site_name`   | `og:site_name` | no       |

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

// ============================================================================
// Property Schema
// ============================================================================

/// A core Open Graph property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Title,
    Type,
    Image,
    Url,
    Description,
    Locale,
    SiteName,
}

impl Property {
    /// All core properties in declaration order (required first).
    pub const ALL: [Self; 7] = [
        Self::Title,
        Self::Type,
        Self::Image,
        Self::Url,
        Self::Description,
        Self::Locale,
        Self::SiteName,
    ];

    /// Bare property name, e.g. `site_name`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Type => "type",
            Self::Image => "image",
            Self::Url => "url",
            Self::Description => "description",
            Self::Locale => "locale",
            Self::SiteName => "site_name",
        }
    }

    /// Namespaced key used in markup, e.g. `og:site_name`.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Title => "og:title",
            Self::Type => "og:type",
            Self::Image => "og:image",
            Self::Url => "og:url",
            Self::Description => "og:description",
            Self::Locale => "og:locale",
            Self::SiteName => "og:site_name",
        }
    }

    /// Whether the protocol requires this property on every page.
    pub const fn is_required(self) -> bool {
        matches!(self, Self::Title | Self::Type | Self::Image | Self::Url)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Property {
    type Err = String;

    /// Accepts both `title` and `og:title`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix("og:").unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| format!("unknown Open Graph property `{s}`"))
    }
}

// ============================================================================
// Values
// ============================================================================

/// A metadata value: a single string or an ordered list (e.g. several images).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    One(String),
    Many(Vec<String>),
}

impl Default for Value {
    fn default() -> Self {
        Self::One(String::new())
    }
}

impl Value {
    /// An empty string and a list without any non-empty item are both empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(s) => s.is_empty(),
            Self::Many(items) => items.iter().all(String::is_empty),
        }
    }

    /// Non-empty items in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let items: &[String] = match self {
            Self::One(s) => std::slice::from_ref(s),
            Self::Many(items) => items,
        };
        items.iter().map(String::as_str).filter(|s| !s.is_empty())
    }

    /// `None` when empty.
    pub fn non_empty(self) -> Option<Self> {
        (!self.is_empty()).then_some(self)
    }

    /// First non-empty item.
    pub fn first(&self) -> Option<&str> {
        self.iter().next()
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::One(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::One(s.to_owned())
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Self::Many(items)
    }
}

/// `true` when the slot holds a non-empty value.
pub fn is_present(value: &Option<Value>) -> bool {
    value.as_ref().is_some_and(|v| !v.is_empty())
}

// ============================================================================
// Metadata Table
// ============================================================================

/// Insertion-ordered key/value table for one render.
///
/// Keys are unique; inserting an existing key replaces the value in place
/// and keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(IndexMap<String, Value>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Insert only if the key is missing or currently empty.
    pub fn insert_if_empty(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        if self.get(&key).is_none_or(Value::is_empty) {
            self.0.insert(key, value.into());
        }
    }

    /// Remove a key, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn property(&self, property: Property) -> Option<&Value> {
        self.get(property.key())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_order_required_first() {
        let required: Vec<_> = Property::ALL.iter().map(|p| p.is_required()).collect();
        assert_eq!(required, [true, true, true, true, false, false, false]);
    }

    #[test]
    fn test_property_keys() {
        assert_eq!(Property::Title.key(), "og:title");
        assert_eq!(Property::SiteName.key(), "og:site_name");
        assert_eq!(Property::SiteName.name(), "site_name");
        assert_eq!(Property::Image.to_string(), "og:image");
    }

    #[test]
    fn test_property_from_str() {
        assert_eq!("title".parse::<Property>(), Ok(Property::Title));
        assert_eq!("og:locale".parse::<Property>(), Ok(Property::Locale));
        assert!("profile:username".parse::<Property>().is_err());
        assert!("".parse::<Property>().is_err());
    }

    #[test]
    fn test_value_empty() {
        assert!(Value::default().is_empty());
        assert!(Value::Many(vec![]).is_empty());
        assert!(Value::Many(vec![String::new(), String::new()]).is_empty());
        assert!(!Value::from("x").is_empty());
        assert!(!Value::Many(vec![String::new(), "a".into()]).is_empty());
    }

    #[test]
    fn test_value_iter_skips_empty_items() {
        let value = Value::Many(vec!["a".into(), String::new(), "b".into()]);
        assert_eq!(value.iter().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(value.first(), Some("a"));
        assert_eq!(Value::default().iter().count(), 0);
    }

    #[test]
    fn test_value_non_empty() {
        assert_eq!(Value::default().non_empty(), None);
        assert_eq!(Value::from("a").non_empty(), Some(Value::from("a")));
    }

    #[test]
    fn test_is_present() {
        assert!(!is_present(&None));
        assert!(!is_present(&Some(Value::default())));
        assert!(is_present(&Some(Value::from("x"))));
    }

    #[test]
    fn test_metadata_keeps_insertion_order() {
        let mut metadata = Metadata::new();
        metadata.insert("og:title", "T");
        metadata.insert("og:type", "blog");
        metadata.insert("og:url", "U");
        metadata.insert("og:title", "T2");

        let keys: Vec<_> = metadata.keys().collect();
        assert_eq!(keys, ["og:title", "og:type", "og:url"]);
        assert_eq!(metadata.get("og:title"), Some(&Value::from("T2")));
    }

    #[test]
    fn test_metadata_remove_preserves_order() {
        let mut metadata: Metadata = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();
        assert_eq!(metadata.remove("b"), Some(Value::from("2")));
        assert_eq!(metadata.keys().collect::<Vec<_>>(), ["a", "c"]);
        assert_eq!(metadata.remove("missing"), None);
    }

    #[test]
    fn test_metadata_insert_if_empty() {
        let mut metadata = Metadata::new();
        metadata.insert("og:title", "");
        metadata.insert_if_empty("og:title", "filled");
        metadata.insert_if_empty("og:title", "ignored");
        assert_eq!(metadata.get("og:title"), Some(&Value::from("filled")));
    }

    #[test]
    fn test_value_deserialize_untagged() {
        let one: Value = serde_json::from_str(r#""x""#).unwrap();
        assert_eq!(one, Value::from("x"));
        let many: Value = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(many, Value::Many(vec!["a".into(), "b".into()]));
    }
}
