use resmock_core::Resource;

use crate::error::StoreError;

/// The persistence boundary the provider's CRUD lifecycle talks to.
///
/// One JSON document per resource id. Implementations are synchronous: the
/// provider core is a set of pure tree transforms and each request owns its
/// resource, so there is nothing to suspend on.
pub trait Store: Send + Sync + std::fmt::Debug {
    /// Read one resource by id.
    ///
    /// `Ok(None)` means this backend does not persist resources and the
    /// caller should rely on the state it already holds. A backend that
    /// does persist returns [`StoreError::NotFound`] (or an IO not-found)
    /// for a missing document, which callers treat as drift.
    fn read_resource(&self, id: &str) -> Result<Option<Resource>, StoreError>;

    /// Persist a freshly created resource. Fails if a document with the
    /// same id already exists.
    fn write_resource(&self, resource: &Resource) -> Result<(), StoreError>;

    /// Overwrite an existing resource document. Fails if none exists.
    fn update_resource(&self, resource: &Resource) -> Result<(), StoreError>;

    /// Remove a resource document.
    fn delete_resource(&self, id: &str) -> Result<(), StoreError>;

    /// Enumerate persisted resources, yielding each to `visit`.
    ///
    /// Read or parse failures of individual documents are yielded as `Err`
    /// items rather than aborting the enumeration. Traversal stops as soon
    /// as `limit` items have been yielded or `visit` returns `false`.
    /// Enumeration order is whatever the backing directory listing yields;
    /// callers must tolerate arbitrary order.
    fn list_resources(
        &self,
        type_filter: Option<&str>,
        id_filter: Option<&str>,
        limit: Option<u64>,
        visit: &mut dyn FnMut(Result<Resource, StoreError>) -> bool,
    ) -> Result<(), StoreError>;

    /// Read one data source document by id. Data sources are always
    /// user-managed files, so every backend reads them from disk.
    fn read_data_source(&self, id: &str) -> Result<Resource, StoreError>;
}
