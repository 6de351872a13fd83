use std::collections::BTreeMap;
use std::sync::Arc;

use log::info;
use resmock_core::Schema;
use resmock_store::{LocalDisk, StateOnly, Store};

use crate::config::ProviderConfig;
use crate::dynamic::DynamicResources;
use crate::error::ProviderError;
use crate::handler::ResourceHandler;
use crate::schemas::{complex_resource, simple_resource, COMPLEX_RESOURCE_DEPTH};

pub const SIMPLE_RESOURCE: &str = "resmock_simple_resource";
pub const COMPLEX_RESOURCE: &str = "resmock_complex_resource";

/// The provider: a set of named resource types, each bound to one schema,
/// sharing a store built from the configuration.
///
/// The schema registry is populated once at construction and read-only
/// afterwards, so handlers for any number of in-flight requests can borrow
/// it without synchronization.
#[derive(Debug)]
pub struct Provider {
    config: Arc<ProviderConfig>,
    store: Arc<dyn Store>,
    schemas: BTreeMap<String, Schema>,
}

impl Provider {
    /// Build a provider from configuration: pick the store backend, then
    /// register the built-in schemas and the validated dynamic resources.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let dynamic = DynamicResources::load(config.dynamic_resources_file.as_deref())?;

        let store: Arc<dyn Store> = if config.use_only_state {
            Arc::new(StateOnly::new(&config.data_directory))
        } else {
            Arc::new(LocalDisk::new(
                &config.resource_directory,
                &config.data_directory,
            ))
        };

        let mut schemas = BTreeMap::new();
        schemas.insert(SIMPLE_RESOURCE.to_string(), simple_resource());
        schemas.insert(
            COMPLEX_RESOURCE.to_string(),
            complex_resource(COMPLEX_RESOURCE_DEPTH),
        );

        for (name, schema) in dynamic.dynamic_resources {
            if schemas.contains_key(&name) {
                return Err(ProviderError::DuplicateType { name });
            }
            schemas.insert(name, schema);
        }

        info!("provider serving {} resource types", schemas.len());
        Ok(Provider {
            config: Arc::new(config),
            store,
            schemas,
        })
    }

    /// The names of every resource type this provider serves, built-in and
    /// dynamic. Each doubles as a data source.
    pub fn resource_types(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn schema(&self, name: &str) -> Result<&Schema, ProviderError> {
        self.schemas
            .get(name)
            .ok_or_else(|| ProviderError::UnknownType {
                name: name.to_string(),
            })
    }

    /// A handler for one resource type. Handlers are cheap to build and
    /// owned by the request.
    pub fn resource(&self, name: &str) -> Result<ResourceHandler, ProviderError> {
        let schema = self.schema(name)?.clone();
        Ok(ResourceHandler::new(
            name.to_string(),
            schema,
            Arc::clone(&self.store),
            Arc::clone(&self.config),
        ))
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap as Map;

    use resmock_core::{Resource, Value};
    use tempfile::TempDir;

    use super::*;

    fn provider_in(dir: &TempDir) -> Provider {
        let config = ProviderConfig {
            resource_directory: dir.path().join("resource"),
            data_directory: dir.path().join("data"),
            // Point at an empty dynamic resources file so a developer's
            // real one is never picked up through the env var.
            dynamic_resources_file: Some(write_dynamic(dir, r#"{"dynamic_resources": {}}"#)),
            ..ProviderConfig::default()
        };
        Provider::new(config).unwrap()
    }

    fn write_dynamic(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("dynamic_resources.json");
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn simple_values() -> Map<String, Value> {
        let mut values = Map::new();
        values.insert("string".to_string(), Value::string("hello"));
        values
    }

    #[test]
    fn serves_the_built_in_types() {
        let dir = TempDir::new().unwrap();
        let provider = provider_in(&dir);
        let types: Vec<&str> = provider.resource_types().collect();
        assert!(types.contains(&SIMPLE_RESOURCE));
        assert!(types.contains(&COMPLEX_RESOURCE));
        assert!(matches!(
            provider.resource("resmock_unknown").unwrap_err(),
            ProviderError::UnknownType { .. }
        ));
    }

    #[test]
    fn create_read_update_delete_lifecycle() {
        let dir = TempDir::new().unwrap();
        let provider = provider_in(&dir);
        let handler = provider.resource(SIMPLE_RESOURCE).unwrap();

        let created = handler.create(Resource::new(simple_values())).unwrap();
        let id = created.id().unwrap().to_string();
        assert_eq!(created.values["string"], Value::string("hello"));
        assert!(created.object_type().is_some());

        let read = handler.read(created.clone()).unwrap().unwrap();
        assert_eq!(read.values, created.values);

        let mut updated_values = created.values.clone();
        updated_values.insert("string".to_string(), Value::string("changed"));
        let updated = handler.update(Resource::new(updated_values)).unwrap();
        assert_eq!(updated.id(), Some(id.as_str()));
        assert_eq!(updated.values["string"], Value::string("changed"));

        handler.delete(&id).unwrap();
        // The document is gone, so the read reports drift.
        assert!(handler.read(created).unwrap().is_none());
    }

    #[test]
    fn create_persists_a_document_per_id() {
        let dir = TempDir::new().unwrap();
        let provider = provider_in(&dir);
        let handler = provider.resource(SIMPLE_RESOURCE).unwrap();

        let created = handler.create(Resource::new(Map::new())).unwrap();
        let path = dir
            .path()
            .join("resource")
            .join(format!("{}.json", created.id().unwrap()));
        assert!(path.exists());
    }

    #[test]
    fn forced_failures_by_id() {
        let dir = TempDir::new().unwrap();
        let config = ProviderConfig {
            resource_directory: dir.path().join("resource"),
            data_directory: dir.path().join("data"),
            fail_on_create: vec!["doomed".to_string()],
            fail_on_delete: vec!["precious".to_string()],
            dynamic_resources_file: Some(write_dynamic(&dir, r#"{"dynamic_resources": {}}"#)),
            ..ProviderConfig::default()
        };
        let provider = Provider::new(config).unwrap();
        let handler = provider.resource(SIMPLE_RESOURCE).unwrap();

        let mut values = Map::new();
        values.insert("id".to_string(), Value::string("doomed"));
        let err = handler.create(Resource::new(values)).unwrap_err();
        assert!(matches!(err, ProviderError::Forced { operation: "create" }));

        let err = handler.delete("precious").unwrap_err();
        assert!(matches!(err, ProviderError::Forced { operation: "delete" }));
    }

    #[test]
    fn dynamic_resources_register_alongside_built_ins() {
        let dir = TempDir::new().unwrap();
        let dynamic = r#"{
            "dynamic_resources": {
                "resmock_queue": {
                    "attributes": {
                        "depth": { "type": "integer", "computed": true }
                    }
                }
            }
        }"#;
        let config = ProviderConfig {
            resource_directory: dir.path().join("resource"),
            data_directory: dir.path().join("data"),
            dynamic_resources_file: Some(write_dynamic(&dir, dynamic)),
            ..ProviderConfig::default()
        };
        let provider = Provider::new(config).unwrap();

        let handler = provider.resource("resmock_queue").unwrap();
        let created = handler.create(Resource::new(Map::new())).unwrap();
        assert_eq!(created.values["depth"], Value::number(0.into()));
    }

    #[test]
    fn dynamic_resources_cannot_shadow_built_ins() {
        let dir = TempDir::new().unwrap();
        let dynamic = r#"{"dynamic_resources": {"resmock_simple_resource": {}}}"#;
        let config = ProviderConfig {
            resource_directory: dir.path().join("resource"),
            data_directory: dir.path().join("data"),
            dynamic_resources_file: Some(write_dynamic(&dir, dynamic)),
            ..ProviderConfig::default()
        };
        let err = Provider::new(config).unwrap_err();
        assert!(matches!(err, ProviderError::DuplicateType { .. }));
    }

    #[test]
    fn list_yields_only_matching_type() {
        let dir = TempDir::new().unwrap();
        let provider = provider_in(&dir);

        let simple = provider.resource(SIMPLE_RESOURCE).unwrap();
        let complex = provider.resource(COMPLEX_RESOURCE).unwrap();
        simple.create(Resource::new(Map::new())).unwrap();
        simple.create(Resource::new(Map::new())).unwrap();
        complex.create(Resource::new(Map::new())).unwrap();

        let mut count = 0;
        simple
            .list(None, None, &mut |item| {
                assert_eq!(
                    item.unwrap().resource_type.as_deref(),
                    Some(SIMPLE_RESOURCE)
                );
                count += 1;
                true
            })
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn data_sources_read_from_the_data_directory() {
        let dir = TempDir::new().unwrap();
        let provider = provider_in(&dir);
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(
            dir.path().join("data").join("seeded.json"),
            r#"{"values": {"id": {"string": "seeded"}, "string": {"string": "from-disk"}}}"#,
        )
        .unwrap();

        let handler = provider.resource(SIMPLE_RESOURCE).unwrap();
        let resource = handler.read_data_source("seeded").unwrap();
        assert_eq!(resource.values["string"], Value::string("from-disk"));
        assert!(resource.object_type().is_some());
    }

    #[test]
    fn state_only_reads_hand_back_the_state() {
        let dir = TempDir::new().unwrap();
        let config = ProviderConfig {
            resource_directory: dir.path().join("resource"),
            data_directory: dir.path().join("data"),
            use_only_state: true,
            dynamic_resources_file: Some(write_dynamic(&dir, r#"{"dynamic_resources": {}}"#)),
            ..ProviderConfig::default()
        };
        let provider = Provider::new(config).unwrap();
        let handler = provider.resource(SIMPLE_RESOURCE).unwrap();

        let created = handler.create(Resource::new(simple_values())).unwrap();
        // Nothing hit the disk.
        assert!(!dir.path().join("resource").exists());

        let read = handler.read(created.clone()).unwrap().unwrap();
        assert_eq!(read.values, created.values);
    }
}
