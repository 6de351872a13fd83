use std::collections::BTreeMap;

use resmock_proto::HostType;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::kind::Kind;
use crate::value::Value;

/// An internal representation of one attribute in a resource schema.
///
/// It is designed to be read dynamically from a JSON object, allowing
/// schemas, blocks and attributes to be defined by the user of the provider
/// rather than compiled in. Collection kinds carry exactly one child
/// descriptor: `list`/`map`/`set` point at a single element attribute,
/// `object` at a field-name-to-attribute map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub kind: Kind,

    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub computed: bool,

    /// Literal default used when the attribute is computed and the caller
    /// supplied no value. Only legal alongside `computed: true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<Box<Attribute>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<Box<Attribute>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<BTreeMap<String, Attribute>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set: Option<Box<Attribute>>,
}

impl Attribute {
    /// A plain attribute of the given kind with no flags and no children.
    pub fn new(kind: Kind) -> Self {
        Attribute {
            kind,
            optional: false,
            required: false,
            computed: false,
            value: None,
            list: None,
            map: None,
            object: None,
            set: None,
        }
    }

    /// Derive the host type descriptor this attribute converts into.
    ///
    /// `name` is carried for error context only.
    pub fn host_type(&self, name: &str) -> Result<HostType, SchemaError> {
        match self.kind {
            Kind::Boolean => Ok(HostType::Bool),
            Kind::Float | Kind::Integer | Kind::Number => Ok(HostType::Number),
            Kind::String => Ok(HostType::String),
            Kind::List => {
                let element = self.element(name, &self.list)?;
                Ok(HostType::List(Box::new(element.host_type(name)?)))
            }
            Kind::Map => {
                let element = self.element(name, &self.map)?;
                Ok(HostType::Map(Box::new(element.host_type(name)?)))
            }
            Kind::Set => {
                let element = self.element(name, &self.set)?;
                Ok(HostType::Set(Box::new(element.host_type(name)?)))
            }
            Kind::Object => {
                let children = self.object.as_ref().ok_or(SchemaError::MissingElement {
                    attribute: name.to_string(),
                    kind: self.kind,
                })?;
                let mut fields = BTreeMap::new();
                for (child_name, child) in children {
                    fields.insert(child_name.clone(), child.host_type(child_name)?);
                }
                Ok(HostType::Object(fields))
            }
        }
    }

    /// Check the structural invariants of this node and everything below it.
    pub fn validate(&self, name: &str) -> Result<(), SchemaError> {
        if self.value.is_some() && !self.computed {
            return Err(SchemaError::DefaultWithoutComputed {
                attribute: name.to_string(),
            });
        }

        match self.kind {
            Kind::Boolean | Kind::Float | Kind::Integer | Kind::Number | Kind::String => {
                self.no_children_except(name, None)
            }
            Kind::List => {
                self.no_children_except(name, Some("list"))?;
                self.element(name, &self.list)?.validate(name)
            }
            Kind::Map => {
                self.no_children_except(name, Some("map"))?;
                self.element(name, &self.map)?.validate(name)
            }
            Kind::Set => {
                self.no_children_except(name, Some("set"))?;
                self.element(name, &self.set)?.validate(name)
            }
            Kind::Object => {
                self.no_children_except(name, Some("object"))?;
                let children = self.object.as_ref().ok_or(SchemaError::MissingElement {
                    attribute: name.to_string(),
                    kind: self.kind,
                })?;
                for (child_name, child) in children {
                    child.validate(child_name)?;
                }
                Ok(())
            }
        }
    }

    fn element<'a>(
        &self,
        name: &str,
        child: &'a Option<Box<Attribute>>,
    ) -> Result<&'a Attribute, SchemaError> {
        child.as_deref().ok_or(SchemaError::MissingElement {
            attribute: name.to_string(),
            kind: self.kind,
        })
    }

    /// Exactly one child descriptor may be present, and only the one the
    /// kind calls for.
    fn no_children_except(&self, name: &str, allowed: Option<&str>) -> Result<(), SchemaError> {
        let present = [
            ("list", self.list.is_some()),
            ("map", self.map.is_some()),
            ("object", self.object.is_some()),
            ("set", self.set.is_some()),
        ];
        for (field, set) in present {
            if set && Some(field) != allowed {
                return Err(SchemaError::UnexpectedElement {
                    attribute: name.to_string(),
                    kind: self.kind,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_json_shape() {
        let json = r#"{
            "type": "list",
            "optional": true,
            "list": { "type": "string" }
        }"#;
        let attribute: Attribute = serde_json::from_str(json).unwrap();
        assert_eq!(attribute.kind, Kind::List);
        assert!(attribute.optional);
        assert_eq!(attribute.list.as_deref().unwrap().kind, Kind::String);
    }

    #[test]
    fn host_type_maps_numeric_kinds_to_number() {
        for kind in [Kind::Float, Kind::Integer, Kind::Number] {
            let attribute = Attribute::new(kind);
            assert_eq!(attribute.host_type("n").unwrap(), HostType::Number);
        }
    }

    #[test]
    fn host_type_requires_element_descriptor() {
        let attribute = Attribute::new(Kind::Set);
        let err = attribute.host_type("tags").unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingElement {
                attribute: "tags".to_string(),
                kind: Kind::Set,
            }
        );
    }

    #[test]
    fn validate_rejects_default_without_computed() {
        let mut attribute = Attribute::new(Kind::String);
        attribute.value = Some(Value::string("fixed"));
        let err = attribute.validate("name").unwrap_err();
        assert_eq!(
            err,
            SchemaError::DefaultWithoutComputed {
                attribute: "name".to_string(),
            }
        );

        attribute.computed = true;
        assert!(attribute.validate("name").is_ok());
    }

    #[test]
    fn validate_rejects_child_on_primitive_kind() {
        let mut attribute = Attribute::new(Kind::Boolean);
        attribute.list = Some(Box::new(Attribute::new(Kind::String)));
        let err = attribute.validate("flag").unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnexpectedElement {
                attribute: "flag".to_string(),
                kind: Kind::Boolean,
            }
        );
    }

    #[test]
    fn validate_recurses_into_nested_objects() {
        let mut inner = Attribute::new(Kind::Integer);
        inner.value = Some(Value::number(7.into()));

        let mut children = BTreeMap::new();
        children.insert("count".to_string(), inner);
        let mut attribute = Attribute::new(Kind::Object);
        attribute.object = Some(children);

        let err = attribute.validate("settings").unwrap_err();
        assert_eq!(
            err,
            SchemaError::DefaultWithoutComputed {
                attribute: "count".to_string(),
            }
        );
    }
}
