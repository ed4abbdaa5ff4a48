use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Schema};

use crate::{cake, crochet, mood, state};

/// Create the application tables if they do not exist yet.
/// Called once at startup; safe to call again on an initialized database.
pub async fn init(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let stmts = [
        schema.create_table_from_entity(state::Entity),
        schema.create_table_from_entity(crochet::Entity),
        schema.create_table_from_entity(cake::Entity),
        schema.create_table_from_entity(mood::Entity),
    ];
    for mut stmt in stmts {
        stmt.if_not_exists();
        db.execute(backend.build(&stmt)).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{connect_with_config, DatabaseConfig};

    #[tokio::test]
    async fn init_is_idempotent() -> Result<(), DbErr> {
        let mut cfg = DatabaseConfig::default();
        cfg.url = "sqlite::memory:".into();
        cfg.max_connections = 1;
        cfg.min_connections = 1;
        let db = connect_with_config(&cfg).await?;

        init(&db).await?;
        init(&db).await?;
        Ok(())
    }
}
