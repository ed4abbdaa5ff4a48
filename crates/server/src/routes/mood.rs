use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use models::mood::Model as MoodEntry;
use service::services::mood_service;

use crate::errors::ApiError;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct MoodInput {
    pub person: String,
    pub mood: String,
    #[serde(default)]
    pub note: Option<String>,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<MoodEntry>>, ApiError> {
    Ok(Json(mood_service::list_moods(&state.db).await?))
}

pub async fn set(
    State(state): State<AppState>,
    Json(body): Json<MoodInput>,
) -> Result<Json<MoodEntry>, ApiError> {
    let entry = mood_service::set_mood(&state.db, &body.person, &body.mood, body.note).await?;
    Ok(Json(entry))
}
