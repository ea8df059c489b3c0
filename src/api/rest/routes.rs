//! # Routes
//!
//! Router assembly and middleware.

use crate::api::rest::error::handle_panic;
use crate::api::rest::handlers::{self, AppState};
use axum::Router;
use axum::routing::get;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

/// Builds the gateway router.
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/healthCheck", get(handlers::health_check))
        .route("/drugPrices", get(handlers::drug_prices))
        .route("/external", get(handlers::external))
        .route(
            "/example",
            get(handlers::example_get)
                .post(handlers::example_post)
                .put(handlers::example_put)
                .delete(handlers::example_delete)
                .patch(handlers::example_patch)
                .options(handlers::example_options),
        )
        .with_state(state);

    with_middleware(router)
}

/// Wraps `router` in request tracing and panic recovery.
///
/// A panicking handler is answered with 500 `{"error":"Server error"}`.
pub fn with_middleware(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}
