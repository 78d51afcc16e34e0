//! Typed, possibly nested event properties

use serde::Serialize;
use std::collections::BTreeMap;

/// Value of a single property
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Property {
    String(String),
    Int(i32),
    Long(i64),
    Float(f64),
    Bool(bool),
    Map(Properties),
}

impl From<&str> for Property {
    fn from(value: &str) -> Self {
        Property::String(value.to_string())
    }
}

impl From<String> for Property {
    fn from(value: String) -> Self {
        Property::String(value)
    }
}

impl From<i32> for Property {
    fn from(value: i32) -> Self {
        Property::Int(value)
    }
}

impl From<i64> for Property {
    fn from(value: i64) -> Self {
        Property::Long(value)
    }
}

impl From<f64> for Property {
    fn from(value: f64) -> Self {
        Property::Float(value)
    }
}

impl From<bool> for Property {
    fn from(value: bool) -> Self {
        Property::Bool(value)
    }
}

impl From<Properties> for Property {
    fn from(value: Properties) -> Self {
        Property::Map(value)
    }
}

/// Map of uniquely named properties, serialized as a JSON object
///
/// Keys are kept sorted so the serialized order is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Properties(BTreeMap<String, Property>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Property>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a property, replacing any previous value under `key`
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Property>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Property> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Property)> {
        self.0.iter()
    }

    /// Combine two maps; on conflicting keys `other` wins
    pub fn merge(&self, other: &Properties) -> Properties {
        let mut merged = self.clone();
        merged.extend(other.clone());
        merged
    }

    /// Flatten maps left to right, later keys overwriting earlier ones
    pub fn merge_all<'a>(maps: impl IntoIterator<Item = &'a Properties>) -> Properties {
        maps.into_iter()
            .fold(Properties::new(), |acc, map| acc.merge(map))
    }
}

impl<K: Into<String>, V: Into<Property>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Properties::new();
        properties.extend(iter);
        properties
    }
}

impl<K: Into<String>, V: Into<Property>> Extend<(K, V)> for Properties {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for Properties {
    type Item = (String, Property);
    type IntoIter = std::collections::btree_map::IntoIter<String, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
