use std::path::Path;

use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;

use crate::metrics;
use crate::state::ServerState;

pub mod medicines;

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router. Unmatched paths fall back to the
/// static frontend when `frontend_dir` is set.
pub fn build_router(state: ServerState, cors: CorsLayer, frontend_dir: Option<&str>) -> Router {
    let api = Router::new()
        .route("/medicines", get(medicines::list_medicines))
        .route("/medicines/:name", get(medicines::get_medicine))
        .route("/create", post(medicines::create_medicine))
        .route("/update", post(medicines::update_medicine))
        .route("/delete", delete(medicines::delete_medicine))
        .with_state(state);

    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(|| async { metrics::encode_metrics() }));

    let mut app = api.merge(ops);
    if let Some(dir) = frontend_dir {
        let index = Path::new(dir).join("index.html");
        app = app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    app.layer(cors).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}
