/// All errors that can be returned by a [`crate::Store`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No persisted document exists for the given resource id.
    #[error("resource not found: {id}")]
    NotFound { id: String },

    /// A document for the given resource id already exists; create must not
    /// overwrite it.
    #[error("resource with the id '{id}' likely already exists")]
    AlreadyExists { id: String },

    /// The resource has no string `id` value, so there is no document name
    /// to read or write.
    #[error("resource has no id")]
    MissingId,

    /// A persisted document could not be parsed.
    #[error("invalid resource document '{path}': {message}")]
    InvalidDocument { path: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// True when the error means the backing document does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            StoreError::NotFound { .. } => true,
            StoreError::Io(err) => err.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
