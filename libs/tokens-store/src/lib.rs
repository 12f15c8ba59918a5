//! Document store client for the design tokens service.
//!
//! The store is an explicitly constructed client value. Callers open it with
//! [`DocumentStore::connect`], obtain typed collections from it and close it
//! with [`DocumentStore::disconnect`]. There is no ambient connection state.
//!
//! ```
//! use tokens_store::{DocumentStore, StoreConfig};
//!
//! let store = DocumentStore::connect(&StoreConfig::default()).unwrap();
//! assert!(store.is_connected());
//! store.disconnect();
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod collection;
pub mod document;
pub mod error;
pub mod memory;
pub mod object_id;
pub mod results;
pub mod store;

pub use collection::{Collection, Filter, Mutation};
pub use document::{Document, UniqueKey};
pub use error::StoreError;
pub use memory::InMemoryCollection;
pub use object_id::ObjectId;
pub use results::{DeleteResult, UpdateResult};
pub use store::{DocumentStore, StoreConfig};
