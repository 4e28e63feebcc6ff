//! Reconciles junction-table rows for one association property.
//!
//! Every mutation walks its cursor twice: once to notify the trigger (if any),
//! then again to build the statement. Trigger notifications go out before the
//! statement runs and are not retracted on failure; transactions belong to the
//! caller.

use std::collections::HashSet;

use log::debug;
use sea_orm::{ConnectionTrait, QueryResult};

use aideon_junction_core::{
    AssociationProp, Direction, Edge, EdgeChangeKind, EdgeSet, FanOutCursor, IdPairCursor, IdTypes,
    IdValue, InsertShape, JunctionResult, JunctionTable, MembershipShape, MutationTrigger,
    ResolvedJunction, TupleCursor, diff_targets, resolve,
};

use crate::db::read_id;
use crate::{ExecutionPurpose, JunctionClient, LoggingExecutor, StatementBuilder, StatementExecutor};

pub struct JunctionOperator<'a, C, E = LoggingExecutor> {
    client: &'a JunctionClient<E>,
    conn: &'a C,
    prop: &'a AssociationProp,
    resolved: ResolvedJunction,
    trigger: Option<&'a dyn MutationTrigger>,
}

fn read_batch<R: IdPairCursor + ?Sized>(cursor: &mut R, limit: usize) -> Vec<Edge> {
    let mut batch = Vec::new();
    while batch.len() < limit {
        match cursor.read_edge() {
            Some(edge) => batch.push(edge),
            None => break,
        }
    }
    batch
}

impl<'a, C, E> JunctionOperator<'a, C, E>
where
    C: ConnectionTrait + Sync,
    E: StatementExecutor,
{
    /// Operator for `prop` as declared; `None` when it has no local junction table.
    pub fn try_get(
        client: &'a JunctionClient<E>,
        conn: &'a C,
        prop: &'a AssociationProp,
        trigger: Option<&'a dyn MutationTrigger>,
    ) -> Option<Self> {
        Self::try_get_impl(client, conn, prop, false, trigger)
    }

    /// Operator for `prop` traversed from its target side.
    pub fn try_get_by_back_prop(
        client: &'a JunctionClient<E>,
        conn: &'a C,
        back_prop: &'a AssociationProp,
        trigger: Option<&'a dyn MutationTrigger>,
    ) -> Option<Self> {
        Self::try_get_impl(client, conn, back_prop, true, trigger)
    }

    fn try_get_impl(
        client: &'a JunctionClient<E>,
        conn: &'a C,
        prop: &'a AssociationProp,
        viewed_from_back: bool,
        trigger: Option<&'a dyn MutationTrigger>,
    ) -> Option<Self> {
        let resolved = resolve(prop, viewed_from_back)?;
        debug!(
            "junction {} resolved as {:?} on {}({}, {})",
            prop.qualified_name(),
            resolved.direction,
            resolved.table.table_name,
            resolved.table.source_column,
            resolved.table.target_column
        );
        Some(Self {
            client,
            conn,
            prop,
            resolved,
            trigger,
        })
    }

    pub fn table(&self) -> &JunctionTable {
        &self.resolved.table
    }

    pub fn direction(&self) -> Direction {
        self.resolved.direction
    }

    pub fn id_types(&self) -> IdTypes {
        self.resolved.id_types
    }

    fn builder(&self) -> StatementBuilder<'_> {
        StatementBuilder::new(&self.resolved.table, self.client.dialect().backend())
    }

    fn decode_pairs(&self, rows: &[QueryResult]) -> JunctionResult<Vec<Edge>> {
        let table = &self.resolved.table;
        let types = self.resolved.id_types;
        rows.iter()
            .map(|row| -> JunctionResult<Edge> {
                Ok(Edge {
                    source_id: read_id(row, &table.source_column, types.source)?,
                    target_id: read_id(row, &table.target_column, types.target)?,
                })
            })
            .collect()
    }

    pub async fn get_target_ids(&self, source_id: &IdValue) -> JunctionResult<Vec<IdValue>> {
        let statement = self.builder().select_targets(source_id);
        let rows = self
            .client
            .executor()
            .query(self.conn, statement, ExecutionPurpose::Mutate)
            .await?;
        let column = &self.resolved.table.target_column;
        let target_type = self.resolved.id_types.target;
        rows.iter()
            .map(|row| read_id(row, column, target_type))
            .collect()
    }

    pub async fn get_id_pair_reader(&self, source_ids: &[IdValue]) -> JunctionResult<TupleCursor> {
        let source_ids: EdgeSet = source_ids.iter().cloned().collect();
        if source_ids.is_empty() {
            return Ok(TupleCursor::empty());
        }
        let mut edges = Vec::new();
        for chunk in source_ids.as_slice().chunks(self.client.batch_size()) {
            let statement = self.builder().select_pairs_by_sources(chunk);
            let rows = self
                .client
                .executor()
                .query(self.conn, statement, ExecutionPurpose::Mutate)
                .await?;
            edges.extend(self.decode_pairs(&rows)?);
        }
        Ok(TupleCursor::new(edges))
    }

    /// Rows of the junction table matching the cursor's edges, as storage returns
    /// them. `cursor` is read from its start and left reset.
    pub async fn filter_existing<R>(&self, cursor: &mut R) -> JunctionResult<TupleCursor>
    where
        R: IdPairCursor + ?Sized,
    {
        cursor.reset();
        if !cursor.is_readable() {
            return Ok(TupleCursor::empty());
        }
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        while let Some(edge) = cursor.read_edge() {
            if seen.insert(edge.clone()) {
                candidates.push(edge);
            }
        }
        cursor.reset();

        // Keep rows as stored; the column collation decides what matched.
        let shape = MembershipShape::for_dialect(self.client.dialect());
        let mut confirmed = HashSet::new();
        let mut existing = Vec::new();
        for chunk in candidates.chunks(self.client.batch_size()) {
            let statement = self.builder().select_existing_pairs(chunk, shape);
            let rows = self
                .client
                .executor()
                .query(self.conn, statement, ExecutionPurpose::Mutate)
                .await?;
            for edge in self.decode_pairs(&rows)? {
                if confirmed.insert(edge.clone()) {
                    existing.push(edge);
                }
            }
        }
        Ok(TupleCursor::new(existing))
    }

    pub async fn add_target_ids(
        &self,
        source_id: &IdValue,
        target_ids: impl IntoIterator<Item = IdValue>,
    ) -> JunctionResult<u64> {
        let target_ids: EdgeSet = target_ids.into_iter().collect();
        if target_ids.is_empty() {
            return Ok(0);
        }
        self.add(&mut FanOutCursor::from_set(source_id.clone(), target_ids))
            .await
    }

    /// Inserts every edge of the cursor, read from its start.
    pub async fn add<R>(&self, cursor: &mut R) -> JunctionResult<u64>
    where
        R: IdPairCursor + ?Sized,
    {
        cursor.reset();
        if !cursor.is_readable() {
            return Ok(0);
        }
        self.notify(EdgeChangeKind::Inserted, cursor);

        let shape = InsertShape::for_dialect(self.client.dialect());
        let limit = self.client.batch_size();
        let mut affected = 0;
        loop {
            let batch = read_batch(cursor, limit);
            if batch.is_empty() {
                break;
            }
            let statement = self.builder().insert_pairs(&batch, &shape)?;
            affected += self
                .client
                .executor()
                .execute(self.conn, statement, ExecutionPurpose::Mutate)
                .await?;
        }
        Ok(affected)
    }

    pub async fn remove_target_ids(
        &self,
        source_id: &IdValue,
        target_ids: impl IntoIterator<Item = IdValue>,
    ) -> JunctionResult<u64> {
        let target_ids: EdgeSet = target_ids.into_iter().collect();
        if target_ids.is_empty() {
            return Ok(0);
        }
        self.remove(
            &mut FanOutCursor::from_set(source_id.clone(), target_ids),
            false,
        )
        .await
    }

    /// Deletes the cursor's edges. With `check_existence`, edges missing from the
    /// table are dropped first so events and counts only cover real rows.
    pub async fn remove<R>(&self, cursor: &mut R, check_existence: bool) -> JunctionResult<u64>
    where
        R: IdPairCursor + ?Sized,
    {
        cursor.reset();
        if !cursor.is_readable() {
            return Ok(0);
        }
        if check_existence {
            let mut existing = self.filter_existing(cursor).await?;
            if !existing.is_readable() {
                return Ok(0);
            }
            return self.delete_pairs(&mut existing).await;
        }
        self.delete_pairs(cursor).await
    }

    async fn delete_pairs<R>(&self, cursor: &mut R) -> JunctionResult<u64>
    where
        R: IdPairCursor + ?Sized,
    {
        self.notify(EdgeChangeKind::Deleted, cursor);

        let shape = MembershipShape::for_dialect(self.client.dialect());
        let limit = self.client.batch_size();
        let mut affected = 0;
        loop {
            let batch = read_batch(cursor, limit);
            if batch.is_empty() {
                break;
            }
            let statement = self.builder().delete_pairs(&batch, shape);
            affected += self
                .client
                .executor()
                .execute(self.conn, statement, ExecutionPurpose::Mutate)
                .await?;
        }
        Ok(affected)
    }

    /// Replaces the stored targets of `source_id` with `target_ids`.
    /// Removals run before insertions.
    pub async fn set_target_ids(
        &self,
        source_id: &IdValue,
        target_ids: impl IntoIterator<Item = IdValue>,
    ) -> JunctionResult<u64> {
        let current: EdgeSet = self.get_target_ids(source_id).await?.into_iter().collect();
        let desired: EdgeSet = target_ids.into_iter().collect();
        let diff = diff_targets(&current, &desired);
        debug!(
            "junction {} source {source_id}: {} to add, {} to remove",
            self.prop.qualified_name(),
            diff.add.len(),
            diff.remove.len()
        );
        let removed = self.remove_target_ids(source_id, diff.remove).await?;
        let added = self.add_target_ids(source_id, diff.add).await?;
        Ok(removed + added)
    }

    pub async fn remove_by_source_ids(&self, source_ids: &[IdValue]) -> JunctionResult<u64> {
        if source_ids.is_empty() {
            return Ok(0);
        }
        if self.trigger.is_some() {
            let mut reader = self.get_id_pair_reader(source_ids).await?;
            return self.remove(&mut reader, false).await;
        }
        let source_ids: EdgeSet = source_ids.iter().cloned().collect();
        let mut affected = 0;
        for chunk in source_ids.as_slice().chunks(self.client.batch_size()) {
            let statement = self.builder().delete_by_sources(chunk);
            affected += self
                .client
                .executor()
                .execute(self.conn, statement, ExecutionPurpose::Delete)
                .await?;
        }
        Ok(affected)
    }

    fn notify<R>(&self, kind: EdgeChangeKind, cursor: &mut R)
    where
        R: IdPairCursor + ?Sized,
    {
        let Some(trigger) = self.trigger else {
            return;
        };
        let back_view = self.resolved.direction.is_back_view();
        while let Some(edge) = cursor.read_edge() {
            let (source_id, target_id) = if back_view {
                (&edge.target_id, &edge.source_id)
            } else {
                (&edge.source_id, &edge.target_id)
            };
            match kind {
                EdgeChangeKind::Inserted => trigger.insert_edge(self.prop, source_id, target_id),
                EdgeChangeKind::Deleted => trigger.delete_edge(self.prop, source_id, target_id),
            }
        }
        cursor.reset();
    }
}
