use resmock_core::{ConversionError, GenerateError, SchemaError};
use resmock_store::StoreError;

/// Errors surfaced by the provider's request handling.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The request names a resource type the provider does not serve.
    #[error("unknown resource type '{name}'")]
    UnknownType { name: String },

    /// A schema failed its consistency checks at load time.
    #[error("failed to build resource schema for '{name}': {source}")]
    Schema {
        name: String,
        #[source]
        source: SchemaError,
    },

    /// The dynamic resources file could not be read or parsed.
    #[error("failed to read dynamic resources from '{path}': {message}")]
    DynamicResources { path: String, message: String },

    /// A dynamic resource definition collides with an already registered
    /// type name.
    #[error("dynamic resource '{name}' collides with an existing resource type")]
    DuplicateType { name: String },

    /// The request carries a resource without a string id.
    #[error("resource has no id")]
    MissingId,

    /// The resource id appears in the matching fail-on list; the failure is
    /// forced so host engines can exercise their error paths.
    #[error("failed to {operation} resource: forced failure")]
    Forced { operation: &'static str },

    #[error("failed to generate computed values: {0}")]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
