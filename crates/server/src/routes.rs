use axum::{http::StatusCode, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::AppState;

pub mod products;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> (StatusCode, String) {
    service::metrics::encode_metrics()
}

/// Build the full application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let catalog = Router::new()
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        // Express-style trailing slash: `/products/?limit=3`
        .route("/products/", get(products::list_products))
        .route(
            "/products/:pid",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        );

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .merge(catalog)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
