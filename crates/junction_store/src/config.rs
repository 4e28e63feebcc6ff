use std::fs;
use std::path::{Path, PathBuf};

use sea_orm::DatabaseBackend;
use serde::{Deserialize, Serialize};

use aideon_junction_core::{JunctionError, JunctionResult};

const DEFAULT_CONFIG_NAME: &str = "junction.json";
pub(crate) const DEFAULT_DB_NAME: &str = "junction.sqlite";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum DatabaseConfig {
    Sqlite { path: Option<String> },
    Postgres { url: String },
    Mysql { url: String },
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PoolConfig {
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub connect_timeout_ms: Option<u64>,
    pub acquire_timeout_ms: Option<u64>,
    pub idle_timeout_ms: Option<u64>,
}

/// Overrides for the backend's default dialect capabilities.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DialectConfig {
    pub multi_row_insert: Option<bool>,
    pub constant_table: Option<String>,
    pub tuple_in_list: Option<bool>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LimitsConfig {
    /// Upper bound on edges (or source ids) per statement; unset means one statement.
    pub max_batch_edges: Option<usize>,
}

impl LimitsConfig {
    pub fn with_max_batch_edges(max_batch_edges: usize) -> Self {
        Self {
            max_batch_edges: Some(max_batch_edges),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JunctionConfig {
    pub database: DatabaseConfig,
    pub pool: Option<PoolConfig>,
    pub dialect: Option<DialectConfig>,
    pub limits: Option<LimitsConfig>,
}

impl JunctionConfig {
    pub fn default_sqlite(path: impl Into<String>) -> Self {
        Self {
            database: DatabaseConfig::Sqlite {
                path: Some(path.into()),
            },
            pool: None,
            dialect: None,
            limits: None,
        }
    }

    pub fn load_or_init(base_dir: &Path, default_sqlite_path: &Path) -> JunctionResult<Self> {
        fs::create_dir_all(base_dir)
            .map_err(|err| JunctionError::storage(format!("create config dir: {err}")))?;
        let config_path = base_dir.join(DEFAULT_CONFIG_NAME);
        if config_path.exists() {
            let raw = fs::read_to_string(&config_path)
                .map_err(|err| JunctionError::storage(format!("read config: {err}")))?;
            let config: JunctionConfig =
                serde_json::from_str(&raw).map_err(|err| JunctionError::invalid(err.to_string()))?;
            return Ok(config);
        }
        let default = JunctionConfig::default_sqlite(default_sqlite_path.to_string_lossy());
        let payload = serde_json::to_string_pretty(&default)
            .map_err(|err| JunctionError::storage(format!("serialize config: {err}")))?;
        fs::write(&config_path, payload)
            .map_err(|err| JunctionError::storage(format!("write config: {err}")))?;
        Ok(default)
    }

    pub fn sqlite_path(&self, base_dir: &Path) -> JunctionResult<PathBuf> {
        match &self.database {
            DatabaseConfig::Sqlite { path } => {
                let path = path.clone().unwrap_or_else(|| DEFAULT_DB_NAME.to_string());
                let candidate = PathBuf::from(path);
                if candidate.is_absolute() {
                    Ok(candidate)
                } else {
                    Ok(base_dir.join(candidate))
                }
            }
            _ => Err(JunctionError::invalid("config is not sqlite backend")),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self.database {
            DatabaseConfig::Sqlite { .. } => "sqlite",
            DatabaseConfig::Postgres { .. } => "postgres",
            DatabaseConfig::Mysql { .. } => "mysql",
        }
    }

    pub fn database_backend(&self) -> DatabaseBackend {
        match self.database {
            DatabaseConfig::Sqlite { .. } => DatabaseBackend::Sqlite,
            DatabaseConfig::Postgres { .. } => DatabaseBackend::Postgres,
            DatabaseConfig::Mysql { .. } => DatabaseBackend::MySql,
        }
    }

    pub fn connection_url(&self, base_dir: &Path) -> JunctionResult<String> {
        match &self.database {
            DatabaseConfig::Sqlite { .. } => {
                let path = self.sqlite_path(base_dir)?;
                Ok(format!("sqlite://{}?mode=rwc", path.display()))
            }
            DatabaseConfig::Postgres { url } | DatabaseConfig::Mysql { url } => Ok(url.clone()),
        }
    }
}
