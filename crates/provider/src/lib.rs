//! resmock-provider: the CRUD lifecycle around the resmock core.
//!
//! A [`Provider`] is built from a [`ProviderConfig`], loads its dynamic
//! resource definitions, and hands out a [`ResourceHandler`] per resource
//! type. Handlers run the create/read/update/delete/list operations:
//! decode the host's values, fill computed gaps with the generator,
//! persist through the store, and convert back for the response.

pub mod config;
pub mod dynamic;
pub mod error;
pub mod handler;
pub mod provider;
pub mod schemas;

pub use config::ProviderConfig;
pub use dynamic::{DynamicResources, DEFAULT_DYNAMIC_RESOURCES_FILE, DYNAMIC_RESOURCES_ENV};
pub use error::ProviderError;
pub use handler::ResourceHandler;
pub use provider::{Provider, COMPLEX_RESOURCE, SIMPLE_RESOURCE};
pub use schemas::{complex_resource, simple_resource, COMPLEX_RESOURCE_DEPTH};
