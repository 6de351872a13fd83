//! resmock-proto: the host orchestration engine's typed value model.
//!
//! These types are DISTINCT from the generic JSON-shaped values the provider
//! persists. They model the strongly-typed representation that crosses the
//! plugin boundary: every value carries its full type descriptor, and a value
//! of any type can be null (set to nothing) or unknown (not yet decided by
//! the host).
//!
//! All numeric values use `rust_decimal::Decimal` -- never `f64`.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A host type descriptor.
///
/// Collection types carry their element type; object types carry the full
/// field-name-to-type map. The descriptor is what drives type-directed
/// encoding on the provider side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostType {
    Bool,
    Number,
    String,
    List(Box<HostType>),
    Map(Box<HostType>),
    Set(Box<HostType>),
    Object(BTreeMap<String, HostType>),
}

impl HostType {
    /// Returns a short type name for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            HostType::Bool => "bool",
            HostType::Number => "number",
            HostType::String => "string",
            HostType::List(_) => "list",
            HostType::Map(_) => "map",
            HostType::Set(_) => "set",
            HostType::Object(_) => "object",
        }
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostType::Bool | HostType::Number | HostType::String => write!(f, "{}", self.name()),
            HostType::List(elem) => write!(f, "list({})", elem),
            HostType::Map(elem) => write!(f, "map({})", elem),
            HostType::Set(elem) => write!(f, "set({})", elem),
            HostType::Object(fields) => {
                write!(f, "object({{")?;
                for (ix, (name, ty)) in fields.iter().enumerate() {
                    if ix > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", name, ty)?;
                }
                write!(f, "}})")
            }
        }
    }
}

/// The content of a known host value.
///
/// Lists and sets share the `Elements` case; maps and objects share the
/// `Entries` case. The owning [`HostValue`]'s type descriptor disambiguates.
#[derive(Debug, Clone, PartialEq)]
pub enum HostContent {
    Bool(bool),
    Number(Decimal),
    String(String),
    Elements(Vec<HostValue>),
    Entries(BTreeMap<String, HostValue>),
}

#[derive(Debug, Clone, PartialEq)]
enum HostState {
    Null,
    Unknown,
    Known(HostContent),
}

/// A typed host value: a type descriptor plus null, unknown, or known content.
///
/// Null and unknown are representable for every type. A known collection
/// value can be empty, and an empty collection is distinct from a null one;
/// the provider's state-drift detection depends on that distinction.
#[derive(Debug, Clone, PartialEq)]
pub struct HostValue {
    ty: HostType,
    state: HostState,
}

impl HostValue {
    /// A null value of the given type.
    pub fn null(ty: HostType) -> Self {
        HostValue {
            ty,
            state: HostState::Null,
        }
    }

    /// An unknown value of the given type.
    pub fn unknown(ty: HostType) -> Self {
        HostValue {
            ty,
            state: HostState::Unknown,
        }
    }

    /// A known value with the given content. The caller is responsible for
    /// content/type agreement; the provider-side codec validates it.
    pub fn known(ty: HostType, content: HostContent) -> Self {
        HostValue {
            ty,
            state: HostState::Known(content),
        }
    }

    pub fn bool(value: bool) -> Self {
        Self::known(HostType::Bool, HostContent::Bool(value))
    }

    pub fn number(value: Decimal) -> Self {
        Self::known(HostType::Number, HostContent::Number(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::known(HostType::String, HostContent::String(value.into()))
    }

    pub fn list(element: HostType, elements: Vec<HostValue>) -> Self {
        Self::known(
            HostType::List(Box::new(element)),
            HostContent::Elements(elements),
        )
    }

    pub fn set(element: HostType, elements: Vec<HostValue>) -> Self {
        Self::known(
            HostType::Set(Box::new(element)),
            HostContent::Elements(elements),
        )
    }

    pub fn map(element: HostType, entries: BTreeMap<String, HostValue>) -> Self {
        Self::known(
            HostType::Map(Box::new(element)),
            HostContent::Entries(entries),
        )
    }

    pub fn object(fields: BTreeMap<String, HostType>, entries: BTreeMap<String, HostValue>) -> Self {
        Self::known(HostType::Object(fields), HostContent::Entries(entries))
    }

    pub fn ty(&self) -> &HostType {
        &self.ty
    }

    pub fn is_null(&self) -> bool {
        matches!(self.state, HostState::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self.state, HostState::Unknown)
    }

    /// The content of a known value; `None` when null or unknown.
    pub fn content(&self) -> Option<&HostContent> {
        match &self.state {
            HostState::Known(content) => Some(content),
            HostState::Null | HostState::Unknown => None,
        }
    }
}
