use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use aideon_junction_core::JunctionResult;

use crate::config::DEFAULT_DB_NAME;
use crate::{JunctionClient, JunctionConfig};

pub fn load_or_init_config(base: &Path) -> JunctionResult<JunctionConfig> {
    let default_sqlite = base.join(DEFAULT_DB_NAME);
    JunctionConfig::load_or_init(base, &default_sqlite)
}

pub fn default_sqlite_path(base: &Path) -> PathBuf {
    base.join(DEFAULT_DB_NAME)
}

/// Opens a pooled connection for `config` and a client whose dialect matches the
/// backend actually reached.
pub async fn connect(
    config: &JunctionConfig,
    base_dir: &Path,
) -> JunctionResult<(JunctionClient, DatabaseConnection)> {
    let url = config.connection_url(base_dir)?;
    let mut options = ConnectOptions::new(url);
    if let Some(pool) = &config.pool {
        if let Some(max) = pool.max_connections {
            options.max_connections(max);
        }
        if let Some(min) = pool.min_connections {
            options.min_connections(min);
        }
        if let Some(timeout_ms) = pool.connect_timeout_ms {
            options.connect_timeout(Duration::from_millis(timeout_ms));
        }
        if let Some(timeout_ms) = pool.acquire_timeout_ms {
            options.acquire_timeout(Duration::from_millis(timeout_ms));
        }
        if let Some(timeout_ms) = pool.idle_timeout_ms {
            options.idle_timeout(Duration::from_millis(timeout_ms));
        }
    }
    let conn = Database::connect(options).await?;
    let backend = conn.get_database_backend();
    let client = JunctionClient::for_connection(config, backend);
    info!("junction store connected ({backend:?})");
    Ok((client, conn))
}

pub async fn open(base: &Path) -> JunctionResult<(JunctionClient, DatabaseConnection)> {
    let config = load_or_init_config(base)?;
    connect(&config, base).await
}
