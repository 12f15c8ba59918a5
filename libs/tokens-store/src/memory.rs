//! In-memory collection backend.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::collection::{Collection, Filter, Mutation};
use crate::document::{Document, UniqueKey};
use crate::error::StoreError;
use crate::object_id::ObjectId;
use crate::results::{DeleteResult, UpdateResult};

const ID_INDEX: &str = "_id_";

struct State<T> {
    next_seq: u64,
    // insertion sequence -> document; keeps find_many in insertion order
    docs: BTreeMap<u64, T>,
    by_id: HashMap<ObjectId, u64>,
    unique: HashMap<UniqueKey, ObjectId>,
}

impl<T: Document> State<T> {
    fn new() -> Self {
        Self {
            next_seq: 0,
            docs: BTreeMap::new(),
            by_id: HashMap::new(),
            unique: HashMap::new(),
        }
    }

    fn get(&self, id: ObjectId) -> Option<&T> {
        self.by_id.get(&id).and_then(|seq| self.docs.get(seq))
    }

    fn check_unique(&self, doc: &T, owner: ObjectId) -> Result<(), StoreError> {
        for key in doc.unique_keys() {
            if let Some(holder) = self.unique.get(&key)
                && *holder != owner
            {
                return Err(StoreError::DuplicateKey {
                    collection: T::COLLECTION,
                    index: key.index,
                    value: key.value,
                });
            }
        }
        Ok(())
    }

    fn apply(
        &mut self,
        id: ObjectId,
        mutation: Mutation<T>,
    ) -> Result<Option<(T, bool)>, StoreError> {
        let Some(&seq) = self.by_id.get(&id) else {
            return Ok(None);
        };
        let Some(current) = self.docs.get(&seq).cloned() else {
            return Ok(None);
        };

        let mut next = current.clone();
        mutation(&mut next);
        if next.id() != id {
            return Err(StoreError::ImmutableId {
                collection: T::COLLECTION,
            });
        }
        self.check_unique(&next, id)?;

        let modified = next != current;
        if modified {
            for key in current.unique_keys() {
                self.unique.remove(&key);
            }
            for key in next.unique_keys() {
                self.unique.insert(key, id);
            }
            self.docs.insert(seq, next.clone());
        }
        Ok(Some((next, modified)))
    }
}

/// Collection kept in process memory behind a `RwLock`.
pub struct InMemoryCollection<T> {
    state: RwLock<State<T>>,
    connected: Arc<AtomicBool>,
}

impl<T: Document> InMemoryCollection<T> {
    #[must_use]
    pub fn new(connected: Arc<AtomicBool>) -> Self {
        Self {
            state: RwLock::new(State::new()),
            connected,
        }
    }

    fn ensure_connected(&self) -> Result<(), StoreError> {
        if self.connected.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(StoreError::Disconnected)
        }
    }
}

#[async_trait]
impl<T: Document> Collection<T> for InMemoryCollection<T> {
    async fn insert_one(&self, doc: T) -> Result<T, StoreError> {
        self.ensure_connected()?;
        let mut state = self.state.write();

        let id = doc.id();
        if state.by_id.contains_key(&id) {
            return Err(StoreError::DuplicateKey {
                collection: T::COLLECTION,
                index: ID_INDEX,
                value: id.to_string(),
            });
        }
        state.check_unique(&doc, id)?;

        let seq = state.next_seq;
        state.next_seq += 1;
        for key in doc.unique_keys() {
            state.unique.insert(key, id);
        }
        state.by_id.insert(id, seq);
        state.docs.insert(seq, doc.clone());

        tracing::trace!(collection = T::COLLECTION, %id, "document inserted");
        Ok(doc)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<T>, StoreError> {
        self.ensure_connected()?;
        Ok(self.state.read().get(id).cloned())
    }

    async fn find_by_unique_key(&self, key: &UniqueKey) -> Result<Option<T>, StoreError> {
        self.ensure_connected()?;
        let state = self.state.read();
        Ok(state.unique.get(key).and_then(|id| state.get(*id)).cloned())
    }

    async fn find_many(&self, filter: Filter<'_, T>) -> Result<Vec<T>, StoreError> {
        self.ensure_connected()?;
        let state = self.state.read();
        Ok(state.docs.values().filter(|d| filter(d)).cloned().collect())
    }

    async fn update_by_id(
        &self,
        id: ObjectId,
        mutation: Mutation<T>,
    ) -> Result<UpdateResult, StoreError> {
        self.ensure_connected()?;
        let outcome = self.state.write().apply(id, mutation)?;
        Ok(match outcome {
            Some((_, modified)) => UpdateResult::matched(modified),
            None => UpdateResult::unmatched(),
        })
    }

    async fn find_one_and_update(
        &self,
        id: ObjectId,
        mutation: Mutation<T>,
    ) -> Result<Option<T>, StoreError> {
        self.ensure_connected()?;
        let outcome = self.state.write().apply(id, mutation)?;
        Ok(outcome.map(|(doc, _)| doc))
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<DeleteResult, StoreError> {
        self.ensure_connected()?;
        let mut state = self.state.write();

        let Some(seq) = state.by_id.remove(&id) else {
            return Ok(DeleteResult::deleted(0));
        };
        if let Some(doc) = state.docs.remove(&seq) {
            for key in doc.unique_keys() {
                state.unique.remove(&key);
            }
        }

        tracing::trace!(collection = T::COLLECTION, %id, "document deleted");
        Ok(DeleteResult::deleted(1))
    }
}
