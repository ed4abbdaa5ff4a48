use chrono::Utc;
use models::crochet::{self, Status};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Create a project. Notes default to empty, status to wip.
pub async fn create_item(
    db: &DatabaseConnection,
    title: &str,
    notes: Option<String>,
    status: Option<Status>,
) -> Result<crochet::Model, ServiceError> {
    if title.trim().is_empty() {
        return Err(ServiceError::Validation("title required".into()));
    }
    let am = crochet::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        title: Set(title.to_string()),
        notes: Set(notes.unwrap_or_default()),
        status: Set(status.unwrap_or_default()),
        created_at: Set(Utc::now().into()),
    };
    let model = am.insert(db).await.map_err(|e| ServiceError::StorageUnavailable(e.to_string()))?;
    Ok(model)
}

/// List projects, newest first.
pub async fn list_items(db: &DatabaseConnection) -> Result<Vec<crochet::Model>, ServiceError> {
    crochet::Entity::find()
        .order_by_desc(crochet::Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ServiceError::StorageUnavailable(e.to_string()))
}

/// Flip wip <-> done and return the updated row.
pub async fn toggle_item(db: &DatabaseConnection, id: &str) -> Result<crochet::Model, ServiceError> {
    let item = crochet::Entity::find_by_id(id.to_owned())
        .one(db)
        .await
        .map_err(|e| ServiceError::StorageUnavailable(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("crochet item"))?;

    let next = item.status.toggled();
    let mut am: crochet::ActiveModel = item.into();
    am.status = Set(next);
    let updated = am.update(db).await.map_err(|e| ServiceError::StorageUnavailable(e.to_string()))?;
    Ok(updated)
}

/// Delete by id.
pub async fn delete_item(db: &DatabaseConnection, id: &str) -> Result<(), ServiceError> {
    let res = crochet::Entity::delete_by_id(id.to_owned())
        .exec(db)
        .await
        .map_err(|e| ServiceError::StorageUnavailable(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("crochet item"));
    }
    Ok(())
}
