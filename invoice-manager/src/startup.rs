use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::handlers::{
    app::health_check,
    invoices::{
        create_invoice, delete_invoice, delete_invoices, get_invoice, list_invoices,
        toggle_favorite, update_invoice,
    },
    preview::{get_discount, preview_invoice, set_discount},
};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/invoices",
            get(list_invoices)
                .post(create_invoice)
                .delete(delete_invoices),
        )
        .route("/invoices/preview", post(preview_invoice))
        .route(
            "/invoices/:id",
            get(get_invoice).put(update_invoice).delete(delete_invoice),
        )
        .route("/invoices/:id/favorite", put(toggle_favorite))
        .route("/settings/discount", get(get_discount).put(set_discount))
        // The caller is a browser page served from a different origin.
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .with_state(state)
}
