#![cfg(test)]
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use configs::DatabaseConfig;
use models::db::connect_with_config;

/// Fresh, migrated SQLite database per call so tests never share rows.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let dir = format!("target/test-data/{}", uuid::Uuid::new_v4());
    std::fs::create_dir_all(&dir)?;
    let mut cfg = DatabaseConfig { url: format!("sqlite://{dir}/rooms.db?mode=rwc"), ..Default::default() };
    cfg.max_connections = cfg.max_connections.max(5);
    cfg.min_connections = cfg.min_connections.min(1);
    cfg.acquire_timeout_secs = 10;
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
