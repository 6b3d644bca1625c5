use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::rum::constants::TIMESTAMP_KEY;

/// Loosely-typed attribute mapping delivered by the host runtime.
pub type Context = Map<String, Value>;

/// Strongly-typed attribute set handed to the native SDK.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// Uniform wrapper around a caller-supplied value so heterogeneous attributes
/// serialize the same way downstream.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnyEncodable(Value);

impl AnyEncodable {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for AnyEncodable {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A caller attribute, passed through untouched.
    Encodable(AnyEncodable),
    /// A value injected by the bridge itself.
    Int64(i64),
}

impl AttributeValue {
    pub fn as_encodable(&self) -> Option<&AnyEncodable> {
        match self {
            AttributeValue::Encodable(value) => Some(value),
            AttributeValue::Int64(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Int64(value) => Some(*value),
            AttributeValue::Encodable(_) => None,
        }
    }
}

/// Wraps every entry of `raw` and adds [`TIMESTAMP_KEY`] holding `timestamp_ms`.
///
/// The reserved key always wins over a caller entry with the same name. Values are
/// not validated; anything the native layer cannot encode is its concern.
pub fn encode(raw: Context, timestamp_ms: i64) -> Attributes {
    let mut attributes: Attributes = raw
        .into_iter()
        .map(|(key, value)| (key, AttributeValue::Encodable(AnyEncodable::new(value))))
        .collect();
    attributes.insert(
        TIMESTAMP_KEY.to_string(),
        AttributeValue::Int64(timestamp_ms),
    );
    attributes
}
