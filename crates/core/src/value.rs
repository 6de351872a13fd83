use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The provider's representation of any generic resource value.
///
/// At most one field is populated at a given time; a `Value` with every
/// field unset is the canonical "unset" value. Each collection case is
/// wrapped in `Option` because there is a difference between an unset
/// collection and an empty one, and that difference must survive every
/// round trip through the codec and the persisted JSON form.
///
/// Serializes to the tagged-union wire shape, e.g. `{"boolean": true}` or
/// `{"list": [...]}`; unset fields are omitted so the persisted documents
/// stay small and readable. Numbers ride the wire as decimal strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Value {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set: Option<Vec<Value>>,
}

impl Value {
    /// The unset value (no case populated).
    pub fn unset() -> Self {
        Value::default()
    }

    pub fn bool(value: bool) -> Self {
        Value {
            boolean: Some(value),
            ..Value::default()
        }
    }

    pub fn number(value: Decimal) -> Self {
        Value {
            number: Some(value),
            ..Value::default()
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Value {
            string: Some(value.into()),
            ..Value::default()
        }
    }

    pub fn list(values: Vec<Value>) -> Self {
        Value {
            list: Some(values),
            ..Value::default()
        }
    }

    pub fn map(values: BTreeMap<String, Value>) -> Self {
        Value {
            map: Some(values),
            ..Value::default()
        }
    }

    pub fn object(values: BTreeMap<String, Value>) -> Self {
        Value {
            object: Some(values),
            ..Value::default()
        }
    }

    pub fn set(values: Vec<Value>) -> Self {
        Value {
            set: Some(values),
            ..Value::default()
        }
    }

    /// True when no case is populated.
    pub fn is_unset(&self) -> bool {
        self.populated_case().is_none()
    }

    /// The name of the populated case, if any. Used for mismatch reporting.
    pub fn populated_case(&self) -> Option<&'static str> {
        if self.boolean.is_some() {
            Some("boolean")
        } else if self.number.is_some() {
            Some("number")
        } else if self.string.is_some() {
            Some("string")
        } else if self.list.is_some() {
            Some("list")
        } else if self.map.is_some() {
            Some("map")
        } else if self.object.is_some() {
            Some("object")
        } else if self.set.is_some() {
            Some("set")
        } else {
            None
        }
    }
}
