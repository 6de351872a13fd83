use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_RESOURCE_DIRECTORY: &str = "resmock.resource";
pub const DEFAULT_DATA_DIRECTORY: &str = "resmock.data";

/// Provider configuration.
///
/// The fail-on lists hold resource ids whose create/read/update/delete
/// operations fail deterministically, so a host engine can exercise its own
/// error handling against this provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Where created resources are written as human-readable JSON.
    pub resource_directory: PathBuf,

    /// Where data source documents are read from.
    pub data_directory: PathBuf,

    /// Skip the resource directory entirely and let the host's own state be
    /// the only record of resources. Useful when the provider runs
    /// somewhere without a stable working directory.
    pub use_only_state: bool,

    pub fail_on_create: Vec<String>,
    pub fail_on_read: Vec<String>,
    pub fail_on_update: Vec<String>,
    pub fail_on_delete: Vec<String>,

    /// Explicit path to the dynamic resources file. When unset the
    /// `RESMOCK_DYNAMIC_RESOURCES_FILE` env var and then the default
    /// `dynamic_resources.json` are consulted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_resources_file: Option<PathBuf>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            resource_directory: PathBuf::from(DEFAULT_RESOURCE_DIRECTORY),
            data_directory: PathBuf::from(DEFAULT_DATA_DIRECTORY),
            use_only_state: false,
            fail_on_create: Vec::new(),
            fail_on_read: Vec::new(),
            fail_on_update: Vec::new(),
            fail_on_delete: Vec::new(),
            dynamic_resources_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_directories() {
        let config = ProviderConfig::default();
        assert_eq!(
            config.resource_directory,
            PathBuf::from("resmock.resource")
        );
        assert_eq!(config.data_directory, PathBuf::from("resmock.data"));
        assert!(!config.use_only_state);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: ProviderConfig =
            serde_json::from_str(r#"{"use_only_state": true, "fail_on_create": ["abc"]}"#).unwrap();
        assert!(config.use_only_state);
        assert_eq!(config.fail_on_create, vec!["abc".to_string()]);
        assert_eq!(config.data_directory, PathBuf::from("resmock.data"));
    }
}
