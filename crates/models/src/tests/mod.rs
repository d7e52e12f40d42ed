

use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Fresh SQLite file per test so tests never share rows.
pub(crate) async fn fresh_db() -> anyhow::Result<DatabaseConnection> {
    let dir = format!("target/test-data/{}", uuid::Uuid::new_v4());
    std::fs::create_dir_all(&dir)?;
    let cfg = DatabaseConfig { url: format!("sqlite://{dir}/rooms.db?mode=rwc"), ..Default::default() };
    let db = crate::db::connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
