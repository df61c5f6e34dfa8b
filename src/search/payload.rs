//! Request Payload
//!
//! Ordered mapping from query parameter name to value. Multi-valued
//! parameters (`field[]`, `filter[]`, `facet[]`, `id[]`) are expanded into
//! repeated keys when the payload is flattened for the URL, never joined
//! into one comma-separated value.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    Multi(Vec<String>),
}

impl ParamValue {
    /// Values in the order they will appear on the wire.
    pub fn values(&self) -> Vec<&str> {
        match self {
            ParamValue::Single(v) => vec![v.as_str()],
            ParamValue::Multi(vs) => vs.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Single(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Single(s)
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        ParamValue::Single(n.to_string())
    }
}

impl From<u64> for ParamValue {
    fn from(n: u64) -> Self {
        ParamValue::Single(n.to_string())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(vs: Vec<String>) -> Self {
        ParamValue::Multi(vs)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(vs: Vec<&str>) -> Self {
        ParamValue::Multi(vs.into_iter().map(String::from).collect())
    }
}

/// Additional named parameters passed through to the API verbatim.
pub type ExtraParams = IndexMap<String, ParamValue>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    params: IndexMap<String, ParamValue>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter. An existing key keeps its position and takes the
    /// new value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Set a parameter only when a value is present.
    pub fn set_opt<V: Into<ParamValue>>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(v) = value {
            self.set(key, v);
        }
        self
    }

    /// Merge extra parameters last; they win over anything already set.
    pub fn merge(&mut self, extra: &ExtraParams) -> &mut Self {
        for (key, value) in extra {
            self.params.insert(key.clone(), value.clone());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Flatten into URL query pairs, one pair per value.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (key, value) in &self.params {
            for v in value.values() {
                pairs.push((key.clone(), v.to_string()));
            }
        }
        pairs
    }
}
