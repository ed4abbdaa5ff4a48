use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use service::services::book_service::{CurrentBook, FinishedBook};

use crate::errors::ApiError;
use crate::routes::AppState;

/// Current-book document, `{}` when nothing is being read.
pub async fn get_current(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.books.current().await?))
}

/// Replace the slot, echoing the stored document.
pub async fn set_current(
    State(state): State<AppState>,
    Json(body): Json<CurrentBook>,
) -> Result<Json<CurrentBook>, ApiError> {
    Ok(Json(state.books.set_current(body).await?))
}

pub async fn list_finished(
    State(state): State<AppState>,
) -> Result<Json<Vec<FinishedBook>>, ApiError> {
    Ok(Json(state.books.finished().await?))
}

/// Returns the full updated list, not just the new item.
pub async fn add_finished(
    State(state): State<AppState>,
    Json(body): Json<FinishedBook>,
) -> Result<Json<Vec<FinishedBook>>, ApiError> {
    Ok(Json(state.books.add_finished(body).await?))
}

pub async fn delete_finished(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.books.remove_finished(&id).await?;
    Ok(Json(json!({"ok": true})))
}
