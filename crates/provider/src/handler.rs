use std::sync::Arc;

use log::debug;
use resmock_core::{generate_computed_values, Resource, Schema};
use resmock_proto::HostType;
use resmock_store::{Store, StoreError};

use crate::config::ProviderConfig;
use crate::error::ProviderError;

/// One resource type bound to its schema and the shared store: the CRUD
/// lifecycle around the codec and the computed-value generator.
///
/// Each request constructs and owns its own resource value tree; handlers
/// share nothing mutable, so any number of them can run at once.
#[derive(Debug)]
pub struct ResourceHandler {
    name: String,
    schema: Schema,
    store: Arc<dyn Store>,
    config: Arc<ProviderConfig>,
}

impl ResourceHandler {
    pub(crate) fn new(
        name: String,
        schema: Schema,
        store: Arc<dyn Store>,
        config: Arc<ProviderConfig>,
    ) -> Self {
        ResourceHandler {
            name,
            schema,
            store,
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The host object type for resources of this type, derived from the
    /// schema. Attach it before converting toward the host representation.
    pub fn host_type(&self) -> Result<HostType, ProviderError> {
        self.schema
            .host_type()
            .map_err(|source| ProviderError::Schema {
                name: self.name.clone(),
                source,
            })
    }

    /// Create a resource from the planned value map: fill computed values
    /// (including a fresh `id` when unset), then persist.
    pub fn create(&self, mut resource: Resource) -> Result<Resource, ProviderError> {
        debug!("create {}", self.name);
        resource.resource_type = Some(self.name.clone());
        generate_computed_values(&mut resource, &self.schema)?;

        let id = self.id_of(&resource)?;
        if self.config.fail_on_create.contains(&id) {
            return Err(ProviderError::Forced {
                operation: "create",
            });
        }

        self.store.write_resource(&resource)?;
        Ok(resource.with_type(self.host_type()?))
    }

    /// Read a resource back. `state` is what the host currently believes;
    /// backends that do not persist hand it straight back. `Ok(None)`
    /// means the backing document is gone and the host should drop the
    /// resource from its state (drift).
    pub fn read(&self, state: Resource) -> Result<Option<Resource>, ProviderError> {
        debug!("read {}", self.name);
        let id = self.id_of(&state)?;
        if self.config.fail_on_read.contains(&id) {
            return Err(ProviderError::Forced { operation: "read" });
        }

        match self.store.read_resource(&id) {
            Ok(Some(mut resource)) => {
                resource.resource_type = Some(self.name.clone());
                Ok(Some(resource.with_type(self.host_type()?)))
            }
            // The store keeps nothing itself; the state is the record.
            Ok(None) => Ok(Some(state.with_type(self.host_type()?))),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Update an existing resource from the planned value map, filling any
    /// computed values the plan left unset.
    pub fn update(&self, mut resource: Resource) -> Result<Resource, ProviderError> {
        debug!("update {}", self.name);
        resource.resource_type = Some(self.name.clone());
        generate_computed_values(&mut resource, &self.schema)?;

        let id = self.id_of(&resource)?;
        if self.config.fail_on_update.contains(&id) {
            return Err(ProviderError::Forced {
                operation: "update",
            });
        }

        self.store.update_resource(&resource)?;
        Ok(resource.with_type(self.host_type()?))
    }

    pub fn delete(&self, id: &str) -> Result<(), ProviderError> {
        debug!("delete {}", self.name);
        if self.config.fail_on_delete.iter().any(|fail| fail == id) {
            return Err(ProviderError::Forced {
                operation: "delete",
            });
        }
        self.store.delete_resource(id)?;
        Ok(())
    }

    /// Read the data source document for this type.
    pub fn read_data_source(&self, id: &str) -> Result<Resource, ProviderError> {
        debug!("read data source {}", self.name);
        if self.config.fail_on_read.iter().any(|fail| fail == id) {
            return Err(ProviderError::Forced { operation: "read" });
        }

        let mut resource = self.store.read_data_source(id)?;
        resource.resource_type = Some(self.name.clone());
        Ok(resource.with_type(self.host_type()?))
    }

    /// Enumerate persisted resources of this type, optionally narrowed to
    /// one id and bounded by `limit`. Per-item read errors are yielded to
    /// `visit` rather than aborting the enumeration.
    pub fn list(
        &self,
        id_filter: Option<&str>,
        limit: Option<u64>,
        visit: &mut dyn FnMut(Result<Resource, StoreError>) -> bool,
    ) -> Result<(), ProviderError> {
        debug!("list {}", self.name);
        let host_type = self.host_type()?;
        self.store
            .list_resources(Some(&self.name), id_filter, limit, &mut |item| {
                visit(item.map(|resource| resource.with_type(host_type.clone())))
            })?;
        Ok(())
    }

    fn id_of(&self, resource: &Resource) -> Result<String, ProviderError> {
        resource
            .id()
            .map(str::to_string)
            .ok_or(ProviderError::MissingId)
    }
}
