#![cfg(test)]
use models::db::{connect_with_config, DatabaseConfig};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Fresh file-backed SQLite database for one test, schema applied.
/// Each caller gets its own file under target/test-data so tests stay isolated.
pub async fn test_db() -> Result<DatabaseConnection, anyhow::Error> {
    let path = format!("target/test-data/{}.db", Uuid::new_v4());
    if let Some(parent) = std::path::Path::new(&path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut cfg = DatabaseConfig::default();
    cfg.url = format!("sqlite://{}?mode=rwc", path);
    cfg.max_connections = 1;
    cfg.min_connections = 1;

    let db = connect_with_config(&cfg).await?;
    models::schema::init(&db).await?;
    Ok(db)
}
