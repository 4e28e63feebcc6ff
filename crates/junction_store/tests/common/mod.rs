#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use aideon_junction_store::{
    AssociationProp, Edge, EntityType, ExecutionPurpose, IdPairCursor, IdType, JunctionClient,
    JunctionConfig, JunctionResult, JunctionTable, LoggingExecutor, PropStorage,
    StatementExecutor, TupleCursor, connect,
};
use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, QueryResult, Statement};
use sea_orm_migration::prelude::*;
use tempfile::{TempDir, tempdir};

pub struct Fixture {
    pub dir: TempDir,
    pub client: JunctionClient,
    pub conn: DatabaseConnection,
}

pub async fn sqlite_fixture() -> JunctionResult<Fixture> {
    let dir = tempdir().expect("tempdir");
    let config = JunctionConfig::default_sqlite(dir.path().join("junction.sqlite").to_string_lossy());
    let (client, conn) = connect(&config, dir.path()).await?;
    Ok(Fixture { dir, client, conn })
}

pub fn book_table() -> JunctionTable {
    JunctionTable::new("book_author", "book_id", "author_id")
}

pub fn book_authors() -> Arc<AssociationProp> {
    Arc::new(AssociationProp::owning(
        "authors",
        EntityType::new("Book", IdType::I64),
        EntityType::new("Author", IdType::I64),
        PropStorage::JunctionTable(book_table()),
    ))
}

fn id_col(backend: DatabaseBackend, name: &str, id_type: IdType) -> ColumnDef {
    let mut col_def = ColumnDef::new(Alias::new(name.to_string()));
    match (id_type, backend) {
        (IdType::I64, _) => {
            col_def.big_integer();
        }
        (IdType::Str, _) => {
            col_def.string_len(64);
        }
        (IdType::Uuid, DatabaseBackend::Postgres) => {
            col_def.uuid();
        }
        (IdType::Uuid, DatabaseBackend::MySql) => {
            col_def.binary_len(16);
        }
        (IdType::Uuid, _) => {
            col_def.string_len(36);
        }
    }
    col_def.not_null().to_owned()
}

pub async fn create_junction_table(
    conn: &DatabaseConnection,
    table: &JunctionTable,
    source_type: IdType,
    target_type: IdType,
) -> JunctionResult<()> {
    let manager = SchemaManager::new(conn);
    let backend = manager.get_database_backend();
    manager
        .drop_table(
            Table::drop()
                .table(Alias::new(table.table_name.clone()))
                .if_exists()
                .to_owned(),
        )
        .await?;
    manager
        .create_table(
            Table::create()
                .table(Alias::new(table.table_name.clone()))
                .col(id_col(backend, &table.source_column, source_type))
                .col(id_col(backend, &table.target_column, target_type))
                .primary_key(
                    Index::create()
                        .name(format!("pk_{}", table.table_name))
                        .col(Alias::new(table.source_column.clone()))
                        .col(Alias::new(table.target_column.clone())),
                )
                .to_owned(),
        )
        .await?;
    Ok(())
}

pub fn edge_set(cursor: TupleCursor) -> HashSet<Edge> {
    cursor.into_edges().into_iter().collect()
}

pub fn edges(pairs: &[(i64, i64)]) -> Vec<Edge> {
    pairs
        .iter()
        .map(|(source, target)| Edge::new(*source, *target))
        .collect()
}

pub fn drain(cursor: &mut impl IdPairCursor) -> Vec<Edge> {
    let mut out = Vec::new();
    while let Some(edge) = cursor.read_edge() {
        out.push(edge);
    }
    out
}

/// Counts statements before forwarding them to the logging executor.
#[derive(Default)]
pub struct CountingExecutor {
    pub executed: AtomicUsize,
    pub queried: AtomicUsize,
    pub deletes: AtomicUsize,
}

impl CountingExecutor {
    pub fn calls(&self) -> usize {
        self.executed.load(Ordering::SeqCst) + self.queried.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatementExecutor for CountingExecutor {
    async fn execute<C>(
        &self,
        conn: &C,
        statement: Statement,
        purpose: ExecutionPurpose,
    ) -> JunctionResult<u64>
    where
        C: ConnectionTrait + Sync,
    {
        self.executed.fetch_add(1, Ordering::SeqCst);
        if purpose == ExecutionPurpose::Delete {
            self.deletes.fetch_add(1, Ordering::SeqCst);
        }
        LoggingExecutor.execute(conn, statement, purpose).await
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
        self.queried.fetch_add(1, Ordering::SeqCst);
        LoggingExecutor.query(conn, statement, purpose).await
    }
}
