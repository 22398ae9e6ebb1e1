use std::sync::Arc;

use axum::{
    routing::{get, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;
use service::toys::ToyRepository;

pub mod toys;

/// Shared router state: the toy store behind its repository trait.
#[derive(Clone)]
pub struct AppState {
    pub toys: Arc<dyn ToyRepository>,
}

impl AppState {
    pub fn new(toys: Arc<dyn ToyRepository>) -> Self {
        Self { toys }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let toy_routes = Router::new()
        .route("/toys", get(toys::list_toys).post(toys::create_toy))
        .route("/toys/:id", put(toys::update_toy).delete(toys::delete_toy));

    Router::new()
        .route("/health", get(health))
        .merge(toy_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时记录状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
