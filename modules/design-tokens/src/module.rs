//! Module wiring: services over one store, exposed as an axum router.

use std::sync::Arc;

use axum::Router;
use tokens_auth::axum_ext::AuthState;
use tokens_auth::{TokenIssuer, TokenValidator};
use tokens_store::{DocumentStore, StoreError};

use crate::api::rest::routes;
use crate::domain::models::{Fonts, Palette, Spacings};
use crate::domain::password::CredentialHasher;
use crate::domain::service::{AssetService, DesignSystemService, UserService};

/// All services of the design tokens module, sharing one store client.
#[derive(Clone)]
pub struct DesignTokensModule {
    pub(crate) users: Arc<UserService>,
    pub(crate) palettes: Arc<AssetService<Palette>>,
    pub(crate) fonts: Arc<AssetService<Fonts>>,
    pub(crate) spacings: Arc<AssetService<Spacings>>,
    pub(crate) design_systems: Arc<DesignSystemService>,
}

impl DesignTokensModule {
    /// # Errors
    /// [`StoreError`] if a collection cannot be opened, e.g. on a disconnected store.
    pub fn new(
        store: &DocumentStore,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            users: Arc::new(UserService::new(store, hasher, tokens)?),
            palettes: Arc::new(AssetService::new(store)?),
            fonts: Arc::new(AssetService::new(store)?),
            spacings: Arc::new(AssetService::new(store)?),
            design_systems: Arc::new(DesignSystemService::new(store)?),
        })
    }

    /// REST surface; protected routes verify bearer tokens with `validator`.
    #[must_use]
    pub fn router(&self, validator: Arc<dyn TokenValidator>) -> Router {
        routes::register_routes(Router::new(), self, AuthState::new(validator))
    }
}
