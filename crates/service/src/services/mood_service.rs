use chrono::Utc;
use models::mood;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::errors::ServiceError;

/// Upsert one person's mood and return the stored row.
pub async fn set_mood(
    db: &DatabaseConnection,
    person: &str,
    mood_text: &str,
    note: Option<String>,
) -> Result<mood::Model, ServiceError> {
    if person.trim().is_empty() {
        return Err(ServiceError::Validation("person required".into()));
    }
    if mood_text.trim().is_empty() {
        return Err(ServiceError::Validation("mood required".into()));
    }
    let am = mood::ActiveModel {
        person: Set(person.to_string()),
        mood: Set(mood_text.to_string()),
        note: Set(note.unwrap_or_default()),
        updated_at: Set(Utc::now().into()),
    };
    mood::Entity::insert(am)
        .on_conflict(
            OnConflict::column(mood::Column::Person)
                .update_columns([mood::Column::Mood, mood::Column::Note, mood::Column::UpdatedAt])
                .to_owned(),
        )
        .exec(db)
        .await
        .map_err(|e| ServiceError::StorageUnavailable(e.to_string()))?;

    mood::Entity::find_by_id(person.to_owned())
        .one(db)
        .await
        .map_err(|e| ServiceError::StorageUnavailable(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("mood"))
}

/// The whole board, ordered by person so the two columns render stably.
pub async fn list_moods(db: &DatabaseConnection) -> Result<Vec<mood::Model>, ServiceError> {
    mood::Entity::find()
        .order_by_asc(mood::Column::Person)
        .all(db)
        .await
        .map_err(|e| ServiceError::StorageUnavailable(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;

    #[tokio::test]
    async fn set_upserts_per_person() -> Result<(), anyhow::Error> {
        let db = test_db().await?;

        set_mood(&db, "azul", "sleepy", None).await?;
        let updated = set_mood(&db, "azul", "cozy", Some("tea and rain".into())).await?;
        assert_eq!(updated.mood, "cozy");
        assert_eq!(updated.note, "tea and rain");

        let board = list_moods(&db).await?;
        assert_eq!(board.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn board_lists_both_people_in_stable_order() -> Result<(), anyhow::Error> {
        let db = test_db().await?;
        set_mood(&db, "lila", "excited", None).await?;
        set_mood(&db, "azul", "calm", None).await?;

        let people: Vec<_> = list_moods(&db).await?.into_iter().map(|m| m.person).collect();
        assert_eq!(people, vec!["azul", "lila"]);
        Ok(())
    }

    #[tokio::test]
    async fn set_validates_inputs() -> Result<(), anyhow::Error> {
        let db = test_db().await?;
        assert!(matches!(
            set_mood(&db, "", "fine", None).await.unwrap_err(),
            ServiceError::Validation(_)
        ));
        assert!(matches!(
            set_mood(&db, "azul", "  ", None).await.unwrap_err(),
            ServiceError::Validation(_)
        ));
        Ok(())
    }
}
