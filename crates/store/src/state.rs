use std::path::PathBuf;

use log::trace;
use resmock_core::Resource;

use crate::error::StoreError;
use crate::local::LocalDisk;
use crate::traits::Store;

/// A store for hosts that keep resource state themselves (the
/// `use_only_state` mode). Writes and deletes are accepted and discarded,
/// reads tell the caller to rely on its own state, and only data sources
/// are still served from disk.
#[derive(Debug, Clone)]
pub struct StateOnly {
    pub data_directory: PathBuf,
}

impl StateOnly {
    pub fn new(data_directory: impl Into<PathBuf>) -> Self {
        StateOnly {
            data_directory: data_directory.into(),
        }
    }
}

impl Store for StateOnly {
    fn read_resource(&self, _id: &str) -> Result<Option<Resource>, StoreError> {
        Ok(None)
    }

    fn write_resource(&self, _resource: &Resource) -> Result<(), StoreError> {
        Ok(())
    }

    fn update_resource(&self, _resource: &Resource) -> Result<(), StoreError> {
        Ok(())
    }

    fn delete_resource(&self, _id: &str) -> Result<(), StoreError> {
        Ok(())
    }

    fn list_resources(
        &self,
        _type_filter: Option<&str>,
        _id_filter: Option<&str>,
        _limit: Option<u64>,
        _visit: &mut dyn FnMut(Result<Resource, StoreError>) -> bool,
    ) -> Result<(), StoreError> {
        Ok(())
    }

    fn read_data_source(&self, id: &str) -> Result<Resource, StoreError> {
        trace!("state store: read data source {}", id);
        LocalDisk::new(PathBuf::new(), self.data_directory.clone()).read_data_source(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_defer_to_caller_state() {
        let store = StateOnly::new("unused");
        assert!(store.read_resource("anything").unwrap().is_none());
    }

    #[test]
    fn writes_are_discarded() {
        let store = StateOnly::new("unused");
        store.write_resource(&Resource::default()).unwrap();
        store.delete_resource("anything").unwrap();

        let mut visited = false;
        store
            .list_resources(None, None, None, &mut |_| {
                visited = true;
                true
            })
            .unwrap();
        assert!(!visited);
    }
}
