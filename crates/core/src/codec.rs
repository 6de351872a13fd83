//! Bidirectional, type-directed conversion between the generic [`Value`]
//! and the host engine's typed representation.
//!
//! Encoding requires a [`HostType`] descriptor because the generic value
//! does not embed type information; decoding reads the descriptor off the
//! host value itself, which always carries one.

use std::collections::BTreeMap;

use resmock_proto::{HostContent, HostType, HostValue};

use crate::error::ConversionError;
use crate::value::Value;

/// Encode a generic value into the host's typed representation, directed by
/// the target type descriptor.
pub fn to_host_value(value: &Value, ty: &HostType) -> Result<HostValue, ConversionError> {
    match ty {
        HostType::Bool => match value.boolean {
            Some(b) => Ok(HostValue::bool(b)),
            None => null_or_mismatch(value, ty),
        },
        HostType::Number => match value.number {
            Some(n) => Ok(HostValue::number(n)),
            None => null_or_mismatch(value, ty),
        },
        HostType::String => match &value.string {
            Some(s) => Ok(HostValue::string(s.clone())),
            None => null_or_mismatch(value, ty),
        },
        HostType::List(element) => match &value.list {
            Some(values) => elements_to_host_value(values, element, ty),
            None => null_or_mismatch(value, ty),
        },
        HostType::Set(element) => match &value.set {
            // No deduplication is performed here; the host layer owns set
            // semantics and the encoded sequence keeps its cardinality.
            Some(values) => elements_to_host_value(values, element, ty),
            None => null_or_mismatch(value, ty),
        },
        HostType::Map(element) => match &value.map {
            Some(values) => {
                let mut entries = BTreeMap::new();
                for (name, child) in values {
                    entries.insert(name.clone(), to_host_value(child, element)?);
                }
                Ok(HostValue::known(ty.clone(), HostContent::Entries(entries)))
            }
            None => null_or_mismatch(value, ty),
        },
        HostType::Object(fields) => match &value.object {
            Some(values) => {
                // Objects are not partial on the host side: every field in
                // the type descriptor gets a value. Fields absent from the
                // generic value become null children of the declared type.
                let mut entries = BTreeMap::new();
                for (name, field_ty) in fields {
                    match values.get(name) {
                        Some(child) => {
                            entries.insert(name.clone(), to_host_value(child, field_ty)?);
                        }
                        None => {
                            entries.insert(name.clone(), HostValue::null(field_ty.clone()));
                        }
                    }
                }
                Ok(HostValue::known(ty.clone(), HostContent::Entries(entries)))
            }
            None => null_or_mismatch(value, ty),
        },
    }
}

/// Decode a host value into the generic representation.
///
/// The unset-vs-empty distinction for a null host collection is owned by the
/// caller: callers that care check `is_null()` on the host value before
/// decoding. Here a null or unknown collection decodes to an empty (never
/// unset) collection, because the generic representation treats "empty" as
/// informative.
pub fn from_host_value(value: &HostValue) -> Result<Value, ConversionError> {
    match value.ty() {
        HostType::Bool => match value.content() {
            None => Ok(Value::unset()),
            Some(HostContent::Bool(b)) => Ok(Value::bool(*b)),
            Some(other) => Err(content_mismatch("bool", other)),
        },
        HostType::Number => match value.content() {
            None => Ok(Value::unset()),
            Some(HostContent::Number(n)) => Ok(Value::number(*n)),
            Some(other) => Err(content_mismatch("number", other)),
        },
        HostType::String => match value.content() {
            None => Ok(Value::unset()),
            Some(HostContent::String(s)) => Ok(Value::string(s.clone())),
            Some(other) => Err(content_mismatch("string", other)),
        },
        HostType::List(_) => match value.content() {
            None => Ok(Value::list(Vec::new())),
            Some(HostContent::Elements(children)) => {
                Ok(Value::list(elements_from_host_value(children)?))
            }
            Some(other) => Err(content_mismatch("list", other)),
        },
        HostType::Set(_) => match value.content() {
            None => Ok(Value::set(Vec::new())),
            Some(HostContent::Elements(children)) => {
                Ok(Value::set(elements_from_host_value(children)?))
            }
            Some(other) => Err(content_mismatch("set", other)),
        },
        HostType::Map(_) => match value.content() {
            None => Ok(Value::map(BTreeMap::new())),
            Some(HostContent::Entries(children)) => {
                // Null entries are preserved as unset values rather than
                // dropped; the key set of a map is caller-supplied
                // information.
                let mut values = BTreeMap::new();
                for (name, child) in children {
                    values.insert(name.clone(), from_host_value(child)?);
                }
                Ok(Value::map(values))
            }
            Some(other) => Err(content_mismatch("map", other)),
        },
        HostType::Object(_) => match value.content() {
            None => Ok(Value::object(BTreeMap::new())),
            Some(HostContent::Entries(children)) => {
                let mut values = BTreeMap::new();
                for (name, child) in children {
                    if child.is_null() || child.is_unknown() {
                        // The host carries every declared field, null when
                        // unset. Our objects record absence by omission, so
                        // null and unknown children are skipped here and
                        // resynthesized as null on the way back out. Unknown
                        // children are computed values that get filled later.
                        continue;
                    }
                    values.insert(name.clone(), from_host_value(child)?);
                }
                Ok(Value::object(values))
            }
            Some(other) => Err(content_mismatch("object", other)),
        },
    }
}

fn elements_to_host_value(
    values: &[Value],
    element: &HostType,
    ty: &HostType,
) -> Result<HostValue, ConversionError> {
    let mut children = Vec::with_capacity(values.len());
    for child in values {
        children.push(to_host_value(child, element)?);
    }
    Ok(HostValue::known(ty.clone(), HostContent::Elements(children)))
}

fn elements_from_host_value(children: &[HostValue]) -> Result<Vec<Value>, ConversionError> {
    let mut values = Vec::with_capacity(children.len());
    for child in children {
        values.push(from_host_value(child)?);
    }
    Ok(values)
}

/// A populated generic value whose case does not match the target type: an
/// unset value encodes as host null instead.
fn null_or_mismatch(value: &Value, ty: &HostType) -> Result<HostValue, ConversionError> {
    match value.populated_case() {
        None => Ok(HostValue::null(ty.clone())),
        Some(case) => Err(ConversionError::Mismatch {
            expected: ty.to_string(),
            got: case.to_string(),
        }),
    }
}

fn content_mismatch(expected: &str, got: &HostContent) -> ConversionError {
    let got = match got {
        HostContent::Bool(_) => "bool",
        HostContent::Number(_) => "number",
        HostContent::String(_) => "string",
        HostContent::Elements(_) => "elements",
        HostContent::Entries(_) => "entries",
    };
    ConversionError::Mismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object_type(fields: Vec<(&str, HostType)>) -> HostType {
        HostType::Object(
            fields
                .into_iter()
                .map(|(name, ty)| (name.to_string(), ty))
                .collect(),
        )
    }

    #[test]
    fn primitives_round_trip() {
        for (value, ty) in [
            (Value::bool(true), HostType::Bool),
            (Value::number("12.75".parse().unwrap()), HostType::Number),
            (Value::string("hello"), HostType::String),
        ] {
            let host = to_host_value(&value, &ty).unwrap();
            assert_eq!(from_host_value(&host).unwrap(), value);
        }
    }

    #[test]
    fn unset_list_encodes_as_host_null() {
        let ty = HostType::List(Box::new(HostType::String));
        let host = to_host_value(&Value::unset(), &ty).unwrap();
        assert!(host.is_null());
        assert_eq!(host.ty(), &ty);
    }

    #[test]
    fn empty_list_encodes_as_empty_host_collection() {
        let ty = HostType::List(Box::new(HostType::String));
        let host = to_host_value(&Value::list(Vec::new()), &ty).unwrap();
        assert!(!host.is_null());
        assert_eq!(host.content(), Some(&HostContent::Elements(Vec::new())));
    }

    #[test]
    fn null_host_list_decodes_to_empty_list() {
        // The null-vs-empty information for collections is captured by the
        // caller checking the host value before decoding; the generic side
        // always gets a concrete (possibly empty) collection.
        let ty = HostType::List(Box::new(HostType::Number));
        let decoded = from_host_value(&HostValue::null(ty)).unwrap();
        assert_eq!(decoded, Value::list(Vec::new()));
    }

    #[test]
    fn sets_are_not_deduplicated() {
        let ty = HostType::Set(Box::new(HostType::String));
        let value = Value::set(vec![Value::string("a"), Value::string("a")]);
        let host = to_host_value(&value, &ty).unwrap();
        match host.content() {
            Some(HostContent::Elements(children)) => assert_eq!(children.len(), 2),
            other => panic!("unexpected content: {:?}", other),
        }
        assert_eq!(from_host_value(&host).unwrap(), value);
    }

    #[test]
    fn object_encode_fills_missing_fields_with_null() {
        let ty = object_type(vec![
            ("present", HostType::Bool),
            ("absent", HostType::String),
        ]);
        let mut values = std::collections::BTreeMap::new();
        values.insert("present".to_string(), Value::bool(false));
        let host = to_host_value(&Value::object(values), &ty).unwrap();

        match host.content() {
            Some(HostContent::Entries(entries)) => {
                assert_eq!(entries.len(), 2);
                assert!(entries["absent"].is_null());
                assert_eq!(entries["absent"].ty(), &HostType::String);
                assert!(!entries["present"].is_null());
            }
            other => panic!("unexpected content: {:?}", other),
        }
    }

    #[test]
    fn object_decode_skips_null_and_unknown_children() {
        let fields = vec![
            ("known", HostType::String),
            ("nulled", HostType::Bool),
            ("pending", HostType::Number),
        ];
        let mut entries = std::collections::BTreeMap::new();
        entries.insert("known".to_string(), HostValue::string("x"));
        entries.insert("nulled".to_string(), HostValue::null(HostType::Bool));
        entries.insert("pending".to_string(), HostValue::unknown(HostType::Number));
        let host = HostValue::known(
            object_type(fields),
            HostContent::Entries(entries),
        );

        let decoded = from_host_value(&host).unwrap();
        let object = decoded.object.unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["known"], Value::string("x"));
    }

    #[test]
    fn round_trip_three_levels_deep() {
        let leaf = object_type(vec![
            ("tags", HostType::Set(Box::new(HostType::String))),
            ("weights", HostType::Map(Box::new(HostType::Number))),
        ]);
        let middle = HostType::List(Box::new(leaf));
        let root = object_type(vec![
            ("children", middle),
            ("name", HostType::String),
        ]);

        let mut weights = std::collections::BTreeMap::new();
        weights.insert("a".to_string(), Value::number(1.into()));
        let mut leaf_values = std::collections::BTreeMap::new();
        leaf_values.insert(
            "tags".to_string(),
            Value::set(vec![Value::string("blue"), Value::string("green")]),
        );
        leaf_values.insert("weights".to_string(), Value::map(weights));
        let mut root_values = std::collections::BTreeMap::new();
        root_values.insert(
            "children".to_string(),
            Value::list(vec![Value::object(leaf_values)]),
        );
        root_values.insert("name".to_string(), Value::string("root"));
        let value = Value::object(root_values);

        let host = to_host_value(&value, &root).unwrap();
        assert_eq!(from_host_value(&host).unwrap(), value);
    }

    #[test]
    fn populated_case_against_wrong_type_is_a_mismatch() {
        let err = to_host_value(&Value::string("oops"), &HostType::Bool).unwrap_err();
        assert_eq!(
            err,
            ConversionError::Mismatch {
                expected: "bool".to_string(),
                got: "string".to_string(),
            }
        );
    }
}
