use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::{Extension, Router};
use tokens_auth::axum_ext::{AuthState, require_auth};

use crate::domain::models::{Fonts, Palette, Spacings};
use crate::domain::service::Asset;
use crate::module::DesignTokensModule;

use super::handlers;

/// Mount an asset's CRUD routes under `base`.
fn asset_routes<T: Asset>(router: Router, base: &str) -> Router {
    router
        .route(base, post(handlers::create_asset::<T>))
        .route(&format!("{base}/"), post(handlers::create_asset::<T>))
        .route(
            &format!("{base}/{{id}}"),
            get(handlers::get_asset::<T>)
                .put(handlers::update_asset::<T>)
                .delete(handlers::delete_asset::<T>),
        )
}

/// Register the public and bearer-protected routes of the module.
///
/// Protected routes reject unauthenticated requests before any handler runs.
pub fn register_routes(router: Router, module: &DesignTokensModule, auth: AuthState) -> Router {
    let public = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/users", post(handlers::signup))
        .route("/api/users/", post(handlers::signup))
        .route("/api/users/login", post(handlers::login));

    let mut protected = Router::new().route("/api/users/me", get(handlers::me));
    protected = asset_routes::<Palette>(protected, "/api/palette");
    protected = asset_routes::<Fonts>(protected, "/api/fonts");
    protected = asset_routes::<Spacings>(protected, "/api/spacings");
    protected = protected
        .route("/api/design-system", post(handlers::create_design_system))
        .route("/api/design-system/", post(handlers::create_design_system))
        .route(
            "/api/design-system/{id}",
            get(handlers::get_design_system)
                .put(handlers::update_design_system)
                .delete(handlers::delete_design_system),
        )
        .route(
            "/api/design-system/users/{user_id}",
            get(handlers::list_user_design_systems),
        )
        .route_layer(from_fn_with_state(auth, require_auth));

    router
        .merge(public)
        .merge(protected)
        .layer(Extension(module.users.clone()))
        .layer(Extension(module.palettes.clone()))
        .layer(Extension(module.fonts.clone()))
        .layer(Extension(module.spacings.clone()))
        .layer(Extension(module.design_systems.clone()))
}
