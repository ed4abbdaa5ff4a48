use chrono::Utc;
use models::cake;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::errors::ServiceError;

/// Upsert this month's cake and return the stored row. Writing the same month
/// again replaces the record instead of growing the list.
pub async fn record_cake(
    db: &DatabaseConnection,
    month: &str,
    title: &str,
    notes: Option<String>,
) -> Result<cake::Model, ServiceError> {
    if month.trim().is_empty() {
        return Err(ServiceError::Validation("month required".into()));
    }
    if title.trim().is_empty() {
        return Err(ServiceError::Validation("title required".into()));
    }
    let am = cake::ActiveModel {
        month: Set(month.to_string()),
        title: Set(title.to_string()),
        notes: Set(notes.unwrap_or_default()),
        updated_at: Set(Utc::now().into()),
    };
    cake::Entity::insert(am)
        .on_conflict(
            OnConflict::column(cake::Column::Month)
                .update_columns([cake::Column::Title, cake::Column::Notes, cake::Column::UpdatedAt])
                .to_owned(),
        )
        .exec(db)
        .await
        .map_err(|e| ServiceError::StorageUnavailable(e.to_string()))?;

    cake::Entity::find_by_id(month.to_owned())
        .one(db)
        .await
        .map_err(|e| ServiceError::StorageUnavailable(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("cake"))
}

/// List records, most recent month first.
pub async fn list_cakes(db: &DatabaseConnection) -> Result<Vec<cake::Model>, ServiceError> {
    cake::Entity::find()
        .order_by_desc(cake::Column::Month)
        .all(db)
        .await
        .map_err(|e| ServiceError::StorageUnavailable(e.to_string()))
}

/// Delete a month's record.
pub async fn delete_cake(db: &DatabaseConnection, month: &str) -> Result<(), ServiceError> {
    let res = cake::Entity::delete_by_id(month.to_owned())
        .exec(db)
        .await
        .map_err(|e| ServiceError::StorageUnavailable(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("cake"));
    }
    Ok(())
}
