use anyhow::Context;

use crate::config::AppConfig;
use crate::database::DatabaseManager;

pub async fn handle(config: AppConfig) -> anyhow::Result<()> {
    let manager = DatabaseManager::new(&config.database);
    manager
        .init_db()
        .await
        .with_context(|| format!("failed to initialize {}", manager.path().display()))?;

    println!("Initialized the database.");
    Ok(())
}
