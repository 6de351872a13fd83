//! The built-in static resource schemas.
//!
//! Every schema the provider serves is data, including these: the simple
//! and complex resources are just pre-canned [`Schema`] values, so they
//! flow through the exact same codec and generator paths as user-defined
//! dynamic resources.

use std::collections::BTreeMap;

use resmock_core::{Attribute, Block, Kind, NestingMode, Schema};

/// Nesting depth of the complex resource. The schema model is recursive,
/// so the depth has to be bounded somewhere to keep the type finite.
pub const COMPLEX_RESOURCE_DEPTH: u32 = 3;

fn optional(kind: Kind) -> Attribute {
    let mut attribute = Attribute::new(kind);
    attribute.optional = true;
    attribute
}

fn simple_attributes() -> BTreeMap<String, Attribute> {
    let mut attributes = BTreeMap::new();
    attributes.insert("bool".to_string(), optional(Kind::Boolean));
    attributes.insert("number".to_string(), optional(Kind::Number));
    attributes.insert("string".to_string(), optional(Kind::String));
    attributes.insert("float".to_string(), optional(Kind::Float));
    attributes.insert("integer".to_string(), optional(Kind::Integer));
    attributes
}

/// A simple resource holding optional attributes for the five basic kinds:
/// bool, number, string, float and integer.
pub fn simple_resource() -> Schema {
    Schema {
        attributes: simple_attributes(),
        blocks: BTreeMap::new(),
    }
}

/// A complex resource with the five basic attributes, four collection
/// attributes whose objects repeat the root attribute set, and nested
/// list/set blocks that repeat the whole structure. Nesting stops at
/// [`COMPLEX_RESOURCE_DEPTH`]; at the leaf level only the simple attributes
/// remain.
pub fn complex_resource(max_depth: u32) -> Schema {
    Schema {
        attributes: complex_attributes(0, max_depth),
        blocks: complex_blocks(0, max_depth),
    }
}

fn complex_attributes(depth: u32, max_depth: u32) -> BTreeMap<String, Attribute> {
    let mut attributes = simple_attributes();
    if depth < max_depth {
        let nested_object = || {
            let mut object = Attribute::new(Kind::Object);
            object.object = Some(complex_attributes(depth + 1, max_depth));
            object
        };

        let mut list = optional(Kind::List);
        list.list = Some(Box::new(nested_object()));
        attributes.insert("list".to_string(), list);

        let mut map = optional(Kind::Map);
        map.map = Some(Box::new(nested_object()));
        attributes.insert("map".to_string(), map);

        let mut set = optional(Kind::Set);
        set.set = Some(Box::new(nested_object()));
        attributes.insert("set".to_string(), set);

        let mut object = optional(Kind::Object);
        object.object = Some(complex_attributes(depth + 1, max_depth));
        attributes.insert("object".to_string(), object);
    }
    attributes
}

fn complex_blocks(depth: u32, max_depth: u32) -> BTreeMap<String, Block> {
    let mut blocks = BTreeMap::new();
    if depth == max_depth {
        return blocks;
    }

    blocks.insert(
        "list_block".to_string(),
        Block {
            attributes: complex_attributes(depth + 1, max_depth),
            blocks: complex_blocks(depth + 1, max_depth),
            mode: NestingMode::List,
        },
    );
    blocks.insert(
        "set_block".to_string(),
        Block {
            attributes: complex_attributes(depth + 1, max_depth),
            blocks: complex_blocks(depth + 1, max_depth),
            mode: NestingMode::Set,
        },
    );
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_schemas_pass_validation() {
        simple_resource().validate().unwrap();
        complex_resource(COMPLEX_RESOURCE_DEPTH).validate().unwrap();
    }

    #[test]
    fn complex_nesting_terminates_at_the_depth_bound() {
        let schema = complex_resource(1);
        let object = schema.attributes["object"].object.as_ref().unwrap();
        // Depth 1: the nested object only has the simple attributes left.
        assert!(!object.contains_key("object"));
        assert!(object.contains_key("bool"));

        let block = &schema.blocks["list_block"];
        assert!(block.blocks.is_empty());
    }

    #[test]
    fn complex_schema_has_a_finite_host_type() {
        let schema = complex_resource(COMPLEX_RESOURCE_DEPTH);
        // Deriving the host type forces the full recursive traversal.
        schema.host_type().unwrap();
    }
}
