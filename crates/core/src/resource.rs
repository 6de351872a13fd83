use std::collections::BTreeMap;

use resmock_proto::{HostType, HostValue};
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::ConversionError;
use crate::value::Value;

/// One instance of a schema-described entity; the structure that is
/// actually written into the data stores.
///
/// A `Resource` bridges the host's typed representation and the generic
/// JSON form that can be read and written externally. The host object type
/// is attached transiently, only when conversion toward the host is about
/// to happen; it is not part of the persisted JSON form. Converting from a
/// host value attaches the type automatically, so [`Resource::with_type`]
/// only needs calling on resources built from persisted JSON or fresh
/// value maps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub values: BTreeMap<String, Value>,

    /// The resource type name this instance belongs to. Used by list
    /// filtering; omitted from documents written before it existed.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    #[serde(skip)]
    object_type: Option<HostType>,
}

impl Resource {
    pub fn new(values: BTreeMap<String, Value>) -> Self {
        Resource {
            values,
            resource_type: None,
            object_type: None,
        }
    }

    /// The resource identifier, when the `id` value exists and is a string.
    pub fn id(&self) -> Option<&str> {
        self.values.get("id").and_then(|value| value.string.as_deref())
    }

    /// Attach the host object type ahead of a conversion toward the host
    /// representation.
    pub fn with_type(mut self, object_type: HostType) -> Self {
        self.object_type = Some(object_type);
        self
    }

    pub fn object_type(&self) -> Option<&HostType> {
        self.object_type.as_ref()
    }

    /// Convert this resource into the host's typed representation. The
    /// object type must have been attached first.
    pub fn to_host_value(&self) -> Result<HostValue, ConversionError> {
        let object_type = self
            .object_type
            .as_ref()
            .ok_or(ConversionError::MissingTypeInfo)?;
        codec::to_host_value(&Value::object(self.values.clone()), object_type)
    }

    /// Build a resource from the host's typed representation. Only object
    /// values convert; the host type is captured for the return trip.
    pub fn from_host_value(value: &HostValue) -> Result<Resource, ConversionError> {
        if !matches!(value.ty(), HostType::Object(_)) {
            return Err(ConversionError::Mismatch {
                expected: "object".to_string(),
                got: value.ty().name().to_string(),
            });
        }

        let decoded = codec::from_host_value(value)?;
        Ok(Resource {
            values: decoded.object.unwrap_or_default(),
            resource_type: None,
            object_type: Some(value.ty().clone()),
        })
    }
}
