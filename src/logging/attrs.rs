/*!
 * Record Attributes
 * Key-sorted JSON attribute map appended to log lines
 */

use crate::core::LogResult;
use serde::Serialize;
use serde_json::{Map, Value};

/// Structured attributes attached to a record
///
/// Keys render in sorted order, so output is stable regardless of insertion
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attrs {
    values: Map<String, Value>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert for values already convertible to JSON
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Insert any serializable value
    pub fn insert_serialized<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> LogResult<()> {
        self.values.insert(key.into(), serde_json::to_value(value)?);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fill in keys from `base` that this map does not already define
    pub(crate) fn merge_missing(&mut self, base: &Attrs) {
        for (key, value) in &base.values {
            if !self.values.contains_key(key) {
                self.values.insert(key.clone(), value.clone());
            }
        }
    }

    /// Compact JSON object encoding
    pub fn to_json(&self) -> LogResult<String> {
        Ok(serde_json::to_string(&self.values)?)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Attrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attrs::new();
        for (key, value) in iter {
            attrs.insert(key, value);
        }
        attrs
    }
}
