use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, trace};
use resmock_core::Resource;

use crate::error::StoreError;
use crate::traits::Store;

/// File-backed store: one pretty-printed JSON document per resource id,
/// intended to be read and edited by humans.
#[derive(Debug, Clone)]
pub struct LocalDisk {
    pub resource_directory: PathBuf,
    pub data_directory: PathBuf,
}

impl LocalDisk {
    pub fn new(resource_directory: impl Into<PathBuf>, data_directory: impl Into<PathBuf>) -> Self {
        LocalDisk {
            resource_directory: resource_directory.into(),
            data_directory: data_directory.into(),
        }
    }

    fn document_path(directory: &Path, id: &str) -> PathBuf {
        directory.join(format!("{}.json", id))
    }

    fn read_document(path: &Path) -> Result<Resource, StoreError> {
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|err| StoreError::InvalidDocument {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }

    fn render(resource: &Resource) -> Result<String, StoreError> {
        serde_json::to_string_pretty(resource).map_err(|err| StoreError::InvalidDocument {
            path: resource.id().unwrap_or_default().to_string(),
            message: err.to_string(),
        })
    }

    fn id_of(resource: &Resource) -> Result<&str, StoreError> {
        resource.id().ok_or(StoreError::MissingId)
    }
}

impl Store for LocalDisk {
    fn read_resource(&self, id: &str) -> Result<Option<Resource>, StoreError> {
        trace!("local store: read resource {}", id);
        let path = Self::document_path(&self.resource_directory, id);
        Self::read_document(&path).map(Some)
    }

    fn write_resource(&self, resource: &Resource) -> Result<(), StoreError> {
        trace!("local store: write resource");
        let id = Self::id_of(resource)?;
        let data = Self::render(resource)?;

        fs::create_dir_all(&self.resource_directory)?;
        let path = Self::document_path(&self.resource_directory, id);

        // Sanity check: create must never overwrite. Anything other than
        // not-found from the stat means something strange is happening.
        match fs::metadata(&path) {
            Ok(_) => {
                return Err(StoreError::AlreadyExists { id: id.to_string() });
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        fs::write(&path, data)?;
        Ok(())
    }

    fn update_resource(&self, resource: &Resource) -> Result<(), StoreError> {
        trace!("local store: update resource");
        let id = Self::id_of(resource)?;
        let data = Self::render(resource)?;

        let path = Self::document_path(&self.resource_directory, id);
        if fs::metadata(&path).is_err() {
            return Err(StoreError::NotFound { id: id.to_string() });
        }

        fs::write(&path, data)?;
        Ok(())
    }

    fn delete_resource(&self, id: &str) -> Result<(), StoreError> {
        trace!("local store: delete resource {}", id);
        let path = Self::document_path(&self.resource_directory, id);
        fs::remove_file(&path)?;

        // If the directory is empty after this delete, tidy it up as well.
        // A failure here never fails the delete itself.
        match fs::read_dir(&self.resource_directory) {
            Ok(mut entries) => {
                if entries.next().is_none() {
                    let _ = fs::remove_dir(&self.resource_directory);
                }
            }
            Err(err) => {
                info!(
                    "couldn't open resource directory at ({}) to tidy up: {}",
                    self.resource_directory.display(),
                    err
                );
            }
        }
        Ok(())
    }

    fn list_resources(
        &self,
        type_filter: Option<&str>,
        id_filter: Option<&str>,
        limit: Option<u64>,
        visit: &mut dyn FnMut(Result<Resource, StoreError>) -> bool,
    ) -> Result<(), StoreError> {
        trace!("local store: list resources");
        let entries = match fs::read_dir(&self.resource_directory) {
            Ok(entries) => entries,
            // No directory means nothing has been written yet.
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(err.into()),
        };

        let mut yielded: u64 = 0;
        for entry in entries {
            if limit.is_some_and(|limit| yielded >= limit) {
                return Ok(());
            }

            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            if let Some(id) = id_filter {
                if path.file_stem().and_then(|stem| stem.to_str()) != Some(id) {
                    continue;
                }
            }

            let item = Self::read_document(&path).map(|resource| {
                // Documents written before the type field existed match
                // every filter.
                let matches = match (type_filter, resource.resource_type.as_deref()) {
                    (Some(wanted), Some(actual)) => wanted == actual,
                    _ => true,
                };
                matches.then_some(resource)
            });

            match item {
                Ok(None) => continue,
                Ok(Some(resource)) => {
                    yielded += 1;
                    if !visit(Ok(resource)) {
                        return Ok(());
                    }
                }
                Err(err) => {
                    // Yield the broken document to the caller instead of
                    // aborting the whole enumeration.
                    yielded += 1;
                    if !visit(Err(err)) {
                        return Ok(());
                    }
                }
            }
        }
        Ok(())
    }

    fn read_data_source(&self, id: &str) -> Result<Resource, StoreError> {
        trace!("local store: read data source {}", id);
        let path = Self::document_path(&self.data_directory, id);
        Self::read_document(&path)
    }
}
