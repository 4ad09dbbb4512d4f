use axum::{
    http::{request::Parts, HeaderValue},
    routing::{get, patch},
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{styles, system, users};
use crate::state::AppState;

/// Full router: versioned API under the configured prefix, plus root and health
pub fn app(state: AppState) -> Router {
    let prefix = state.config.api.prefix.clone();
    let cors = cors_layer(&state.config.security);

    let api = Router::new()
        .merge(styles_routes())
        .merge(users_routes())
        .route("/health", get(system::health));

    let router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health));

    // Router::nest rejects an empty path
    let router = if prefix.is_empty() {
        router.merge(api)
    } else {
        router.nest(&prefix, api)
    };

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn styles_routes() -> Router<AppState> {
    Router::new()
        // Collection
        .route("/styles", get(styles::styles_get).post(styles::styles_post))
        // Individual style
        .route(
            "/styles/:id",
            get(styles::style_get)
                .put(styles::style_put)
                .patch(styles::style_patch)
                .delete(styles::style_delete),
        )
}

fn users_routes() -> Router<AppState> {
    Router::new().route("/users/:id", patch(users::patch))
}

/// Credentialed CORS for the configured frontend origins.
///
/// Credentials forbid wildcard methods and headers, so both mirror the preflight request.
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let security = security.clone();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _: &Parts| {
            origin
                .to_str()
                .map(|o| security.origin_allowed(o))
                .unwrap_or(false)
        }))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
