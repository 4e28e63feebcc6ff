use std::sync::Arc;

use sea_orm::DatabaseBackend;

use aideon_junction_core::Dialect;

use crate::{DialectProfile, JunctionConfig, LimitsConfig, LoggingExecutor, StatementExecutor};

/// Shared, connection-independent settings for junction operators.
#[derive(Clone)]
pub struct JunctionClient<E = LoggingExecutor> {
    dialect: Arc<dyn Dialect>,
    executor: E,
    limits: LimitsConfig,
}

impl JunctionClient<LoggingExecutor> {
    pub fn new(dialect: impl Dialect + 'static) -> Self {
        Self {
            dialect: Arc::new(dialect),
            executor: LoggingExecutor,
            limits: LimitsConfig::default(),
        }
    }

    pub fn for_backend(backend: DatabaseBackend) -> Self {
        Self::new(DialectProfile::for_backend(backend))
    }

    pub fn from_config(config: &JunctionConfig) -> Self {
        Self::for_connection(config, config.database_backend())
    }

    /// Client for `config` once connected; `backend` is the engine actually reached.
    pub fn for_connection(config: &JunctionConfig, backend: DatabaseBackend) -> Self {
        let mut dialect = DialectProfile::for_backend(backend);
        if let Some(overrides) = &config.dialect {
            dialect = dialect.with_overrides(overrides);
        }
        Self::new(dialect).with_limits(config.limits.clone().unwrap_or_default())
    }
}

impl<E: StatementExecutor> JunctionClient<E> {
    pub fn with_executor<X: StatementExecutor>(self, executor: X) -> JunctionClient<X> {
        JunctionClient {
            dialect: self.dialect,
            executor,
            limits: self.limits,
        }
    }

    pub fn with_limits(mut self, limits: LimitsConfig) -> Self {
        self.limits = limits;
        self
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    /// Edges or ids per statement; zero or unset means unbounded.
    pub(crate) fn batch_size(&self) -> usize {
        self.limits
            .max_batch_edges
            .filter(|size| *size > 0)
            .unwrap_or(usize::MAX)
    }
}
