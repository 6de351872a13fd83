use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of attribute kinds a resource schema can express.
///
/// Float, integer, and number are distinct kinds on the schema side but all
/// share the host's arbitrary-precision number representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Boolean,
    Float,
    Integer,
    Number,
    String,
    List,
    Map,
    Object,
    Set,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Boolean => "boolean",
            Kind::Float => "float",
            Kind::Integer => "integer",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::List => "list",
            Kind::Map => "map",
            Kind::Object => "object",
            Kind::Set => "set",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_deserialize_from_lowercase_strings() {
        let kind: Kind = serde_json::from_str("\"boolean\"").unwrap();
        assert_eq!(kind, Kind::Boolean);
        let kind: Kind = serde_json::from_str("\"set\"").unwrap();
        assert_eq!(kind, Kind::Set);
    }

    #[test]
    fn unknown_kind_string_is_rejected() {
        let result: Result<Kind, _> = serde_json::from_str("\"tuple\"");
        assert!(result.is_err());
    }
}
