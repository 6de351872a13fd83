use std::collections::BTreeMap;

use resmock_proto::HostType;
use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::block::Block;
use crate::error::SchemaError;
use crate::kind::Kind;

/// An internal representation of a resource schema: named attributes plus
/// named blocks.
///
/// It is designed to be read dynamically from a JSON object, allowing
/// schemas, blocks and attributes to be defined by the user of the
/// provider. Schema nodes are inert; the codec and the computed-value
/// generator accept them as traversal guides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub attributes: BTreeMap<String, Attribute>,
    #[serde(default)]
    pub blocks: BTreeMap<String, Block>,
}

impl Schema {
    /// The declared attributes plus the implicit `id` attribute every
    /// resource carries (string, computed, not user-settable).
    ///
    /// Fails when the caller's schema already declares a top-level `id`;
    /// the generator owns identifier assignment.
    pub fn all_attributes(&self) -> Result<BTreeMap<String, Attribute>, SchemaError> {
        if self.attributes.contains_key("id") {
            return Err(SchemaError::ReservedId);
        }

        let mut attributes = self.attributes.clone();
        let mut id = Attribute::new(Kind::String);
        id.computed = true;
        attributes.insert("id".to_string(), id);
        Ok(attributes)
    }

    /// Check every structural invariant of the schema, including the
    /// reserved `id` rule. Any error here is fatal to the schema load and
    /// surfaces before any resource processing occurs.
    pub fn validate(&self) -> Result<(), SchemaError> {
        self.all_attributes()?;
        for (name, attribute) in &self.attributes {
            attribute.validate(name)?;
        }
        for block in self.blocks.values() {
            block.validate()?;
        }
        Ok(())
    }

    /// The host object type for a whole resource of this schema, covering
    /// the declared attributes, the implicit `id`, and the blocks.
    pub fn host_type(&self) -> Result<HostType, SchemaError> {
        let mut fields = BTreeMap::new();
        for (name, attribute) in self.all_attributes()? {
            fields.insert(name.clone(), attribute.host_type(&name)?);
        }
        for (name, block) in &self.blocks {
            fields.insert(name.clone(), block.host_type()?);
        }
        Ok(HostType::Object(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_attributes_adds_computed_string_id() {
        let mut schema = Schema::default();
        schema
            .attributes
            .insert("name".to_string(), Attribute::new(Kind::String));

        let attributes = schema.all_attributes().unwrap();
        assert_eq!(attributes.len(), 2);
        let id = &attributes["id"];
        assert_eq!(id.kind, Kind::String);
        assert!(id.computed);
        assert!(!id.required);
        assert!(!id.optional);
    }

    #[test]
    fn declaring_id_is_rejected() {
        let mut schema = Schema::default();
        schema
            .attributes
            .insert("id".to_string(), Attribute::new(Kind::String));

        assert_eq!(schema.all_attributes().unwrap_err(), SchemaError::ReservedId);
        assert_eq!(schema.validate().unwrap_err(), SchemaError::ReservedId);
    }

    #[test]
    fn host_type_covers_attributes_id_and_blocks() {
        let json = r#"{
            "attributes": {
                "enabled": { "type": "boolean", "optional": true }
            },
            "blocks": {
                "rule": {
                    "attributes": { "pattern": { "type": "string", "required": true } },
                    "mode": "set"
                }
            }
        }"#;
        let schema: Schema = serde_json::from_str(json).unwrap();
        match schema.host_type().unwrap() {
            HostType::Object(fields) => {
                assert_eq!(fields["enabled"], HostType::Bool);
                assert_eq!(fields["id"], HostType::String);
                assert!(matches!(fields["rule"], HostType::Set(_)));
            }
            other => panic!("unexpected type: {:?}", other),
        }
    }

    #[test]
    fn validate_reports_nested_inconsistency() {
        let json = r#"{
            "attributes": {
                "settings": {
                    "type": "object",
                    "computed": true,
                    "object": {
                        "retries": { "type": "integer", "value": {"number": "3"} }
                    }
                }
            }
        }"#;
        let schema: Schema = serde_json::from_str(json).unwrap();
        assert_eq!(
            schema.validate().unwrap_err(),
            SchemaError::DefaultWithoutComputed {
                attribute: "retries".to_string(),
            }
        );
    }
}
