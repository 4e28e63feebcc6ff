pub mod client;
pub mod config;
pub mod datastore;
mod db;
pub mod dialect;
pub mod executor;
pub mod operator;
pub mod statement;

pub use aideon_junction_core::*;
pub use client::JunctionClient;
pub use config::{DatabaseConfig, DialectConfig, JunctionConfig, LimitsConfig, PoolConfig};
pub use datastore::{connect, default_sqlite_path, load_or_init_config, open};
pub use dialect::DialectProfile;
pub use executor::{ExecutionPurpose, LoggingExecutor, StatementExecutor};
pub use operator::JunctionOperator;
pub use statement::StatementBuilder;
