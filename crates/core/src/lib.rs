//! resmock-core: schema model, value codec, and computed-value generator.
//!
//! The three layers, leaves first:
//!
//! 1. **Schema model** ([`Schema`], [`Attribute`], [`Block`]) -- a recursive
//!    description of a resource's shape, read dynamically from JSON. Pure
//!    data; its only behavior is structural queries.
//! 2. **Value codec** ([`codec`]) -- lossless, type-directed conversion
//!    between the generic tagged-union [`Value`] and the host engine's
//!    typed representation. Null, empty, and absent are never conflated.
//! 3. **Computed-value generator** ([`computed`]) -- walks a schema against
//!    a partially-populated value tree and fills every computed-but-unset
//!    attribute, recursing through arbitrarily deep nesting.
//!
//! Everything here is a pure tree transform over in-memory structures: no
//! I/O, no logging, no retries. Errors are returned with the failing field
//! and kind attached, and callers decide presentation.

pub mod attribute;
pub mod block;
pub mod codec;
pub mod computed;
pub mod error;
pub mod kind;
pub mod resource;
pub mod schema;
pub mod value;

pub use attribute::Attribute;
pub use block::{Block, NestingMode};
pub use codec::{from_host_value, to_host_value};
pub use computed::generate_computed_values;
pub use error::{ConversionError, GenerateError, SchemaError};
pub use kind::Kind;
pub use resource::Resource;
pub use schema::Schema;
pub use value::Value;
