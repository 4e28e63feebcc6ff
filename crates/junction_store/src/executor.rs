use std::fmt;

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, QueryResult, Statement};

use aideon_junction_core::JunctionResult;

/// Tags each statement so executors can tell bulk deletes from ordinary mutation traffic.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ExecutionPurpose {
    Mutate,
    Delete,
}

impl fmt::Display for ExecutionPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionPurpose::Mutate => f.write_str("mutate"),
            ExecutionPurpose::Delete => f.write_str("delete"),
        }
    }
}

#[async_trait]
pub trait StatementExecutor: Send + Sync {
    /// Runs a data-changing statement and returns the affected row count.
    async fn execute<C>(
        &self,
        conn: &C,
        statement: Statement,
        purpose: ExecutionPurpose,
    ) -> JunctionResult<u64>
    where
        C: ConnectionTrait + Sync;

    async fn query<C>(
        &self,
        conn: &C,
        statement: Statement,
        purpose: ExecutionPurpose,
    ) -> JunctionResult<Vec<QueryResult>>
    where
        C: ConnectionTrait + Sync;
}

/// Forwards to the connection and logs each statement at debug level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingExecutor;

#[async_trait]
impl StatementExecutor for LoggingExecutor {
    async fn execute<C>(
        &self,
        conn: &C,
        statement: Statement,
        purpose: ExecutionPurpose,
    ) -> JunctionResult<u64>
    where
        C: ConnectionTrait + Sync,
    {
        log::debug!("junction {purpose}: {}", statement.sql);
        let result = conn.execute_raw(statement).await?;
        Ok(result.rows_affected())
    }

    async fn query<C>(
        &self,
        conn: &C,
        statement: Statement,
        purpose: ExecutionPurpose,
    ) -> JunctionResult<Vec<QueryResult>>
    where
        C: ConnectionTrait + Sync,
    {
        log::debug!("junction {purpose} query: {}", statement.sql);
        let rows = conn.query_all_raw(statement).await?;
        Ok(rows)
    }
}
