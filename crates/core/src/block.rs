use std::collections::BTreeMap;

use resmock_proto::HostType;
use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::error::SchemaError;

/// How a block nests inside its parent: a list of objects, a set of
/// objects, or a single object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NestingMode {
    #[default]
    List,
    Set,
    Single,
}

/// An internal representation of one block in a resource schema.
///
/// Blocks are structurally separate from attributes because blocks nest
/// blocks: each block groups named attributes together with further named
/// blocks, under a list/set/single cardinality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub attributes: BTreeMap<String, Attribute>,
    #[serde(default)]
    pub blocks: BTreeMap<String, Block>,
    #[serde(default)]
    pub mode: NestingMode,
}

impl Block {
    /// The host type of one element of this block: an object over the
    /// block's attributes and nested blocks.
    pub fn element_type(&self) -> Result<HostType, SchemaError> {
        let mut fields = BTreeMap::new();
        for (name, attribute) in &self.attributes {
            fields.insert(name.clone(), attribute.host_type(name)?);
        }
        for (name, block) in &self.blocks {
            fields.insert(name.clone(), block.host_type()?);
        }
        Ok(HostType::Object(fields))
    }

    /// The host type this block contributes to its parent, wrapped
    /// according to the nesting mode.
    pub fn host_type(&self) -> Result<HostType, SchemaError> {
        let element = self.element_type()?;
        Ok(match self.mode {
            NestingMode::List => HostType::List(Box::new(element)),
            NestingMode::Set => HostType::Set(Box::new(element)),
            NestingMode::Single => element,
        })
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        for (name, attribute) in &self.attributes {
            attribute.validate(name)?;
        }
        for block in self.blocks.values() {
            block.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Kind;

    #[test]
    fn mode_defaults_to_list() {
        let block: Block = serde_json::from_str("{}").unwrap();
        assert_eq!(block.mode, NestingMode::List);
    }

    #[test]
    fn host_type_wraps_element_by_mode() {
        let mut block = Block::default();
        block
            .attributes
            .insert("name".to_string(), Attribute::new(Kind::String));

        let element = block.element_type().unwrap();
        assert_eq!(block.host_type().unwrap(), HostType::List(Box::new(element.clone())));

        block.mode = NestingMode::Set;
        assert_eq!(block.host_type().unwrap(), HostType::Set(Box::new(element.clone())));

        block.mode = NestingMode::Single;
        assert_eq!(block.host_type().unwrap(), element);
    }

    #[test]
    fn element_type_includes_nested_blocks() {
        let mut inner = Block::default();
        inner
            .attributes
            .insert("port".to_string(), Attribute::new(Kind::Integer));

        let mut block = Block::default();
        block
            .attributes
            .insert("address".to_string(), Attribute::new(Kind::String));
        block.blocks.insert("listener".to_string(), inner);

        match block.element_type().unwrap() {
            HostType::Object(fields) => {
                assert!(fields.contains_key("address"));
                assert!(matches!(fields["listener"], HostType::List(_)));
            }
            other => panic!("unexpected type: {:?}", other),
        }
    }

    #[test]
    fn unknown_mode_string_is_rejected() {
        let result: Result<Block, _> = serde_json::from_str(r#"{"mode": "tuple"}"#);
        assert!(result.is_err());
    }
}
