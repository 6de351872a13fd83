//! Computed-value generation: walk a schema against a partially-populated
//! value tree and fill every computed attribute that the caller left
//! unset. Required attributes are not enforced here; they only get filled
//! as children of objects the generator itself synthesizes, which are
//! never allowed to be partial.
//!
//! Computed values have a sensible default for all primitive kinds, and a
//! literal default can be specified on the attribute as part of the dynamic
//! schema. Objects are the complicated case: a computed object must come
//! back complete, so its default is an object with every required and
//! computed child populated recursively.
//!
//! The walk never mutates a map while iterating it. Every level consumes
//! its input map and builds a replacement, and the resource is only updated
//! once the whole pass has succeeded, so a failed pass leaves no partial
//! mutation behind.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::attribute::Attribute;
use crate::block::{Block, NestingMode};
use crate::error::{GenerateError, SchemaError};
use crate::kind::Kind;
use crate::resource::Resource;
use crate::schema::Schema;
use crate::value::Value;

/// Fill every computed attribute of `resource` that the caller did not
/// supply, recursing through nested objects, collections and blocks.
/// Values the caller supplied are never overwritten, though nested
/// computed attributes inside them are still filled.
///
/// The implicit `id` attribute is computed, so a fresh identifier is
/// generated here when the caller did not set one.
pub fn generate_computed_values(
    resource: &mut Resource,
    schema: &Schema,
) -> Result<(), GenerateError> {
    let attributes = schema.all_attributes()?;
    let values = fill_object(resource.values.clone(), &attributes, Fill::Partial)?;
    let values = fill_blocks(values, &schema.blocks)?;
    resource.values = values;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fill {
    /// Filling a caller-supplied tree: only computed attributes are
    /// synthesized. Required-but-not-computed attributes stay absent;
    /// enforcing that the configuration supplied them belongs upstream.
    Partial,
    /// Synthesizing a complete object from nothing: required attributes
    /// must resolve too, because objects are never partial.
    Complete,
}

fn fill_object(
    values: BTreeMap<String, Value>,
    attributes: &BTreeMap<String, Attribute>,
    mode: Fill,
) -> Result<BTreeMap<String, Value>, GenerateError> {
    let mut rest = values;
    let mut out = BTreeMap::new();

    for (name, attribute) in attributes {
        if let Some(existing) = rest.remove(name) {
            // A value exists, but nested computed attributes inside it may
            // still be missing.
            out.insert(name.clone(), fill_value(existing, attribute, name)?);
            continue;
        }

        if let Some(default) = &attribute.value {
            if !attribute.computed {
                // This would only cause a confusing failure later, so catch
                // it here with a precise message.
                return Err(SchemaError::DefaultWithoutComputed {
                    attribute: name.clone(),
                }
                .into());
            }
            // Literal defaults can themselves contain objects with unset
            // computed children, so they go through the same fill.
            out.insert(name.clone(), fill_value(default.clone(), attribute, name)?);
            continue;
        }

        if attribute.computed || (mode == Fill::Complete && attribute.required) {
            out.insert(name.clone(), synthesized_value(attribute, name)?);
        }
    }

    // Values the schema does not describe pass through untouched.
    out.append(&mut rest);
    Ok(out)
}

/// Recurse into one existing value, filling any unset computed attributes
/// nested inside it. Primitives already hold a concrete value and are
/// returned unchanged.
fn fill_value(value: Value, attribute: &Attribute, name: &str) -> Result<Value, GenerateError> {
    match attribute.kind {
        Kind::Boolean | Kind::Float | Kind::Integer | Kind::Number | Kind::String => Ok(value),
        Kind::List => {
            let element = element_of(attribute, &attribute.list, name)?;
            match value.list {
                Some(values) => Ok(Value::list(fill_elements(values, element, name)?)),
                None => Ok(value),
            }
        }
        Kind::Set => {
            let element = element_of(attribute, &attribute.set, name)?;
            match value.set {
                Some(values) => Ok(Value::set(fill_elements(values, element, name)?)),
                None => Ok(value),
            }
        }
        Kind::Map => {
            let element = element_of(attribute, &attribute.map, name)?;
            match value.map {
                Some(values) => {
                    let mut out = BTreeMap::new();
                    for (key, child) in values {
                        out.insert(key, fill_value(child, element, name)?);
                    }
                    Ok(Value::map(out))
                }
                None => Ok(value),
            }
        }
        Kind::Object => {
            let children = object_children(attribute, name)?;
            let inner = value.object.unwrap_or_default();
            Ok(Value::object(fill_object(inner, children, Fill::Partial)?))
        }
    }
}

fn fill_elements(
    values: Vec<Value>,
    element: &Attribute,
    name: &str,
) -> Result<Vec<Value>, GenerateError> {
    values
        .into_iter()
        .map(|value| fill_value(value, element, name))
        .collect()
}

/// The zero-ish default for a required or computed attribute with no user
/// value and no literal default.
fn synthesized_value(attribute: &Attribute, name: &str) -> Result<Value, GenerateError> {
    match attribute.kind {
        Kind::Boolean => Ok(Value::bool(false)),
        Kind::Float | Kind::Integer | Kind::Number => Ok(Value::number(Decimal::ZERO)),
        Kind::String => Ok(Value::string(Uuid::new_v4().to_string())),
        Kind::List => Ok(Value::list(Vec::new())),
        Kind::Set => Ok(Value::set(Vec::new())),
        Kind::Map => Ok(Value::map(BTreeMap::new())),
        Kind::Object => {
            // Objects cannot be emptied: every required or computed leaf
            // underneath must resolve, all the way down.
            let children = object_children(attribute, name)?;
            Ok(Value::object(fill_object(
                BTreeMap::new(),
                children,
                Fill::Complete,
            )?))
        }
    }
}

fn fill_blocks(
    values: BTreeMap<String, Value>,
    blocks: &BTreeMap<String, Block>,
) -> Result<BTreeMap<String, Value>, GenerateError> {
    let mut out = values;
    for (name, block) in blocks {
        // Absent blocks are not synthesized; only attributes within the
        // elements the caller supplied are filled.
        let Some(value) = out.remove(name) else {
            continue;
        };
        out.insert(name.clone(), fill_block_value(value, block)?);
    }
    Ok(out)
}

fn fill_block_value(value: Value, block: &Block) -> Result<Value, GenerateError> {
    match block.mode {
        NestingMode::List => match value.list {
            Some(values) => Ok(Value::list(fill_block_elements(values, block)?)),
            None => Ok(value),
        },
        NestingMode::Set => match value.set {
            Some(values) => Ok(Value::set(fill_block_elements(values, block)?)),
            None => Ok(value),
        },
        // A single block holds the one object directly; treat it as a
        // singleton.
        NestingMode::Single => fill_block_element(value, block),
    }
}

fn fill_block_elements(values: Vec<Value>, block: &Block) -> Result<Vec<Value>, GenerateError> {
    values
        .into_iter()
        .map(|value| fill_block_element(value, block))
        .collect()
}

fn fill_block_element(value: Value, block: &Block) -> Result<Value, GenerateError> {
    let Some(inner) = value.object else {
        return Ok(value);
    };
    let inner = fill_object(inner, &block.attributes, Fill::Partial)?;
    let inner = fill_blocks(inner, &block.blocks)?;
    Ok(Value::object(inner))
}

fn element_of<'a>(
    attribute: &Attribute,
    child: &'a Option<Box<Attribute>>,
    name: &str,
) -> Result<&'a Attribute, GenerateError> {
    child.as_deref().ok_or_else(|| {
        SchemaError::MissingElement {
            attribute: name.to_string(),
            kind: attribute.kind,
        }
        .into()
    })
}

fn object_children<'a>(
    attribute: &'a Attribute,
    name: &str,
) -> Result<&'a BTreeMap<String, Attribute>, GenerateError> {
    attribute.object.as_ref().ok_or_else(|| {
        SchemaError::MissingElement {
            attribute: name.to_string(),
            kind: attribute.kind,
        }
        .into()
    })
}
