use crate::kind::Kind;

/// Schema consistency errors.
///
/// All of these are detectable before any resource processing happens and
/// are fatal to the schema load.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The caller's schema declares a top-level `id` attribute. The provider
    /// owns identifier assignment, so the name is reserved.
    #[error("top level objects cannot define an attribute named `id` as the provider will generate an identifier for them")]
    ReservedId,

    /// An attribute carries a literal default value without being marked
    /// computed. A non-computed default is meaningless.
    #[error("attribute '{attribute}' has specified a value in the schema without being marked as computed")]
    DefaultWithoutComputed { attribute: String },

    /// A collection attribute is missing the child descriptor its kind
    /// requires (`list`, `map`, `set`, or `object`).
    #[error("attribute '{attribute}' of kind '{kind}' is missing its nested descriptor")]
    MissingElement { attribute: String, kind: Kind },

    /// An attribute carries a child descriptor its kind does not allow.
    /// Exactly one of {primitive with no child, list/map/set with one child,
    /// object with a child map} must hold per node.
    #[error("attribute '{attribute}' of kind '{kind}' carries a nested descriptor it cannot use")]
    UnexpectedElement { attribute: String, kind: Kind },
}

/// Conversion errors between the generic value and the host representation.
///
/// Fatal to the single conversion; the codec performs no retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// The populated case of a generic value does not match the target type
    /// descriptor, or known host content disagrees with its own descriptor.
    #[error("type mismatch: expected {expected}, got {got}")]
    Mismatch { expected: String, got: String },

    /// A resource was asked to convert toward the host representation
    /// without a type descriptor attached.
    #[error("no type descriptor attached to resource")]
    MissingTypeInfo,
}

/// Errors aborting a computed-value generation pass.
///
/// The caller must discard the resource rather than persist a half-generated
/// tree; `generate_computed_values` leaves the input untouched on failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
