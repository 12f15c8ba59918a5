//! Domain services.
//!
//! Services own typed collection handles taken from an explicit
//! [`DocumentStore`](tokens_store::DocumentStore) and receive the caller's
//! [`AuthContext`](tokens_auth::AuthContext) by reference on every protected
//! operation.

pub mod assets;
pub mod design_systems;
pub mod users;

pub use assets::{Asset, AssetService};
pub use design_systems::DesignSystemService;
pub use users::{SignedInUser, UserService};

use tokens_store::ObjectId;

use crate::domain::error::{DomainError, Resource};

/// Parse a path id, reporting malformed input per resource.
pub(crate) fn parse_id(raw: &str, resource: Resource) -> Result<ObjectId, DomainError> {
    ObjectId::parse(raw).map_err(|_| DomainError::InvalidId(resource))
}
