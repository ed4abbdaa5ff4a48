use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use models::crochet::{Model as CrochetItem, Status};
use service::services::crochet_service;

use crate::errors::ApiError;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct CrochetCreate {
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CrochetItem>>, ApiError> {
    Ok(Json(crochet_service::list_items(&state.db).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CrochetCreate>,
) -> Result<Json<CrochetItem>, ApiError> {
    let item = crochet_service::create_item(&state.db, &body.title, body.notes, body.status).await?;
    Ok(Json(item))
}

pub async fn toggle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CrochetItem>, ApiError> {
    Ok(Json(crochet_service::toggle_item(&state.db, &id).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    crochet_service::delete_item(&state.db, &id).await?;
    Ok(Json(json!({"ok": true})))
}
