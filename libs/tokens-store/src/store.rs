use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::collection::Collection;
use crate::document::Document;
use crate::error::StoreError;
use crate::memory::InMemoryCollection;

const MEMORY_SCHEME: &str = "memory";

/// Store connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Connection URI, e.g. `memory://design-tokens`.
    pub uri: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: format!("{MEMORY_SCHEME}://design-tokens"),
        }
    }
}

type ErasedCollection = Arc<dyn Any + Send + Sync>;

/// Explicit store client. Cheap to share behind an `Arc`.
pub struct DocumentStore {
    database: String,
    connected: Arc<AtomicBool>,
    collections: DashMap<&'static str, ErasedCollection>,
}

impl DocumentStore {
    /// Open a client for the backend named by `config.uri`.
    ///
    /// # Errors
    /// [`StoreError::InvalidUri`] for an unparsable URI,
    /// [`StoreError::UnsupportedBackend`] for a scheme other than `memory`.
    pub fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let url = Url::parse(&config.uri).map_err(|e| StoreError::InvalidUri {
            uri: config.uri.clone(),
            reason: e.to_string(),
        })?;

        if url.scheme() != MEMORY_SCHEME {
            return Err(StoreError::UnsupportedBackend {
                scheme: url.scheme().to_owned(),
            });
        }

        let database = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| StoreError::InvalidUri {
                uri: config.uri.clone(),
                reason: "missing database name".to_owned(),
            })?
            .to_owned();

        tracing::info!(database = %database, backend = MEMORY_SCHEME, "document store connected");
        Ok(Self {
            database,
            connected: Arc::new(AtomicBool::new(true)),
            collections: DashMap::new(),
        })
    }

    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Typed handle to the collection holding `T`, created on first use.
    ///
    /// # Errors
    /// [`StoreError::Disconnected`] after [`disconnect`](Self::disconnect);
    /// [`StoreError::CollectionTypeMismatch`] if the name is taken by another type.
    pub fn collection<T: Document>(&self) -> Result<Arc<dyn Collection<T>>, StoreError> {
        if !self.is_connected() {
            return Err(StoreError::Disconnected);
        }

        let erased = self
            .collections
            .entry(T::COLLECTION)
            .or_insert_with(|| {
                let typed: Arc<dyn Collection<T>> =
                    Arc::new(InMemoryCollection::<T>::new(self.connected.clone()));
                let erased: ErasedCollection = Arc::new(typed);
                erased
            })
            .clone();

        erased
            .downcast_ref::<Arc<dyn Collection<T>>>()
            .cloned()
            .ok_or(StoreError::CollectionTypeMismatch {
                collection: T::COLLECTION,
            })
    }

    /// Close the client. Handles obtained earlier start failing with
    /// [`StoreError::Disconnected`].
    pub fn disconnect(&self) {
        if self.connected.swap(false, Ordering::AcqRel) {
            tracing::info!(database = %self.database, "document store disconnected");
        }
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("database", &self.database)
            .field("connected", &self.is_connected())
            .field("collections", &self.collections.len())
            .finish()
    }
}
