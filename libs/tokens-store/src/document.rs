use crate::object_id::ObjectId;

/// A value of a unique index, e.g. `("email_1", "a@b.c")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UniqueKey {
    pub index: &'static str,
    pub value: String,
}

impl UniqueKey {
    pub fn new(index: &'static str, value: impl Into<String>) -> Self {
        Self {
            index,
            value: value.into(),
        }
    }
}

/// A record that can live in a [`Collection`](crate::Collection).
pub trait Document: Clone + PartialEq + Send + Sync + 'static {
    /// Collection name; one document type per collection.
    const COLLECTION: &'static str;

    fn id(&self) -> ObjectId;

    /// Values the store must keep unique across the collection.
    fn unique_keys(&self) -> Vec<UniqueKey> {
        Vec::new()
    }
}
