use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use service::toys::{Toy, ToyFields};
use tracing::{debug, info};

use super::AppState;
use crate::errors::ApiError;

/// `GET /toys` body.
#[derive(Serialize, Debug)]
pub struct ToyList {
    pub toys: Vec<Toy>,
}

pub async fn list_toys(State(state): State<AppState>) -> Json<ToyList> {
    let toys = state.toys.list().await;
    debug!(count = toys.len(), "listing toys");
    Json(ToyList { toys })
}

pub async fn create_toy(
    State(state): State<AppState>,
    Json(fields): Json<ToyFields>,
) -> (StatusCode, Json<Toy>) {
    let toy = state.toys.create(fields).await;
    info!(event = "toy_created", toy_id = toy.id, "toy created");
    (StatusCode::CREATED, Json(toy))
}

pub async fn update_toy(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<ToyFields>,
) -> Result<Json<Toy>, ApiError> {
    let toy = state.toys.update(id, patch).await?;
    info!(event = "toy_updated", toy_id = id, "toy updated");
    Ok(Json(toy))
}

/// Success is a bare 204; no body is sent with it.
pub async fn delete_toy(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    state.toys.delete(id).await?;
    info!(event = "toy_deleted", toy_id = id, "toy deleted");
    Ok(StatusCode::NO_CONTENT)
}
