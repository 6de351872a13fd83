use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use resmock_core::Schema;
use serde::Deserialize;

use crate::error::ProviderError;

/// Environment variable overriding the dynamic resources file location.
pub const DYNAMIC_RESOURCES_ENV: &str = "RESMOCK_DYNAMIC_RESOURCES_FILE";

/// Default file consulted when neither an explicit path nor the env var is
/// set.
pub const DEFAULT_DYNAMIC_RESOURCES_FILE: &str = "dynamic_resources.json";

/// The set of user-defined resource schemas, read from a JSON file placed
/// alongside the host configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DynamicResources {
    #[serde(default)]
    pub dynamic_resources: BTreeMap<String, Schema>,
}

impl DynamicResources {
    /// Load and validate the dynamic resources definitions.
    ///
    /// Resolution order: the explicit `path`, then the
    /// `RESMOCK_DYNAMIC_RESOURCES_FILE` env var, then the default file
    /// name. A missing default file just means no dynamic resources; a
    /// missing explicit or env-var path is an error. Every schema is
    /// validated here so consistency errors surface before any resource
    /// processing occurs.
    pub fn load(path: Option<&Path>) -> Result<Self, ProviderError> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match std::env::var_os(DYNAMIC_RESOURCES_ENV) {
                Some(path) => (PathBuf::from(path), true),
                None => (PathBuf::from(DEFAULT_DYNAMIC_RESOURCES_FILE), false),
            },
        };

        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if !explicit && err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(DynamicResources::default());
            }
            Err(err) => {
                return Err(ProviderError::DynamicResources {
                    path: path.display().to_string(),
                    message: err.to_string(),
                });
            }
        };

        let resources: DynamicResources =
            serde_json::from_str(&data).map_err(|err| ProviderError::DynamicResources {
                path: path.display().to_string(),
                message: err.to_string(),
            })?;
        resources.validate()?;
        Ok(resources)
    }

    pub fn validate(&self) -> Result<(), ProviderError> {
        for (name, schema) in &self.dynamic_resources {
            schema.validate().map_err(|source| ProviderError::Schema {
                name: name.clone(),
                source,
            })?;
        }
        Ok(())
    }
}
