use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use models::cake::Model as CakeRecord;
use service::services::cake_service;

use crate::errors::ApiError;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct CakeInput {
    pub month: String,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CakeRecord>>, ApiError> {
    Ok(Json(cake_service::list_cakes(&state.db).await?))
}

/// One cake per month; posting the same month again replaces the record.
pub async fn record(
    State(state): State<AppState>,
    Json(body): Json<CakeInput>,
) -> Result<Json<CakeRecord>, ApiError> {
    let rec = cake_service::record_cake(&state.db, &body.month, &body.title, body.notes).await?;
    Ok(Json(rec))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> Result<Json<Value>, ApiError> {
    cake_service::delete_cake(&state.db, &month).await?;
    Ok(Json(json!({"ok": true})))
}
