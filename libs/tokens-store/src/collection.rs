use async_trait::async_trait;

use crate::document::{Document, UniqueKey};
use crate::error::StoreError;
use crate::object_id::ObjectId;
use crate::results::{DeleteResult, UpdateResult};

/// In-place change applied atomically to one document.
pub type Mutation<T> = Box<dyn FnOnce(&mut T) + Send>;

/// Predicate used by [`Collection::find_many`].
pub type Filter<'a, T> = &'a (dyn Fn(&T) -> bool + Send + Sync);

/// Typed access to one collection of the document store.
///
/// Each call touches at most one document and is atomic with respect to other
/// calls on the same collection. Unique keys declared by
/// [`Document::unique_keys`] are enforced on insert and update.
#[async_trait]
pub trait Collection<T: Document>: Send + Sync {
    /// Insert a new document.
    ///
    /// # Errors
    /// [`StoreError::DuplicateKey`] when the id or a unique key is taken.
    async fn insert_one(&self, doc: T) -> Result<T, StoreError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<T>, StoreError>;

    /// The document holding `key` in its unique index, without a scan.
    async fn find_by_unique_key(&self, key: &UniqueKey) -> Result<Option<T>, StoreError>;

    /// All matching documents in insertion order.
    async fn find_many(&self, filter: Filter<'_, T>) -> Result<Vec<T>, StoreError>;

    /// Apply `mutation` to the document with `id` and report raw counters.
    ///
    /// # Errors
    /// [`StoreError::DuplicateKey`] when the mutation collides with a unique key,
    /// [`StoreError::ImmutableId`] when it changes the id.
    async fn update_by_id(
        &self,
        id: ObjectId,
        mutation: Mutation<T>,
    ) -> Result<UpdateResult, StoreError>;

    /// Like [`update_by_id`](Self::update_by_id) but returns the updated document,
    /// or `None` when nothing matched.
    async fn find_one_and_update(
        &self,
        id: ObjectId,
        mutation: Mutation<T>,
    ) -> Result<Option<T>, StoreError>;

    async fn delete_by_id(&self, id: ObjectId) -> Result<DeleteResult, StoreError>;

    async fn exists(&self, id: ObjectId) -> Result<bool, StoreError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
