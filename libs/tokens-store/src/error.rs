use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Cast to ObjectId failed for value \"{value}\"")]
    InvalidId { value: String },

    #[error("duplicate key error collection: {collection} index: {index} dup key: {value}")]
    DuplicateKey {
        collection: &'static str,
        index: &'static str,
        value: String,
    },

    #[error("document id is immutable (collection: {collection})")]
    ImmutableId { collection: &'static str },

    #[error("store client is disconnected")]
    Disconnected,

    #[error("invalid store uri '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("unsupported store backend '{scheme}'")]
    UnsupportedBackend { scheme: String },

    #[error("collection '{collection}' is registered with a different document type")]
    CollectionTypeMismatch { collection: &'static str },
}

impl StoreError {
    pub fn invalid_id(value: impl Into<String>) -> Self {
        Self::InvalidId {
            value: value.into(),
        }
    }

    /// True for the lookup-side failures a caller can attribute to its input.
    #[must_use]
    pub fn is_invalid_id(&self) -> bool {
        matches!(self, Self::InvalidId { .. })
    }
}
