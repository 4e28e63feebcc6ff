//! Parameterized select/insert/delete statements over one junction table.
//!
//! The statement shape is picked from the dialect once per build call
//! ([`InsertShape`], [`MembershipShape`]) and then applied to every edge.

use sea_orm::sea_query::{Alias, Cond, Expr, ExprTrait, Query, SelectStatement, UnionType};
use sea_orm::{DatabaseBackend, Statement};

use aideon_junction_core::{
    Edge, IdValue, InsertShape, JunctionError, JunctionResult, JunctionTable, MembershipShape,
};

use crate::db::{id_value, to_statement};

pub struct StatementBuilder<'a> {
    table: &'a JunctionTable,
    backend: DatabaseBackend,
}

fn ident(name: &str) -> Alias {
    Alias::new(name.to_string())
}

impl<'a> StatementBuilder<'a> {
    pub fn new(table: &'a JunctionTable, backend: DatabaseBackend) -> Self {
        Self { table, backend }
    }

    fn column(&self, name: &str) -> Expr {
        Expr::col(ident(name))
    }

    fn bind(&self, id: &IdValue) -> Expr {
        Expr::val(id_value(self.backend, id))
    }

    fn membership(&self, edges: &[Edge], shape: MembershipShape) -> Cond {
        match shape {
            MembershipShape::TupleInList => {
                let columns = Expr::tuple([
                    self.column(&self.table.source_column).into(),
                    self.column(&self.table.target_column).into(),
                ]);
                let tuples = edges.iter().map(|edge| {
                    Expr::tuple([
                        self.bind(&edge.source_id).into(),
                        self.bind(&edge.target_id).into(),
                    ])
                });
                Cond::all().add(columns.is_in(tuples))
            }
            MembershipShape::Disjunction => edges.iter().fold(Cond::any(), |any, edge| {
                any.add(
                    Cond::all()
                        .add(
                            self.column(&self.table.source_column)
                                .eq(id_value(self.backend, &edge.source_id)),
                        )
                        .add(
                            self.column(&self.table.target_column)
                                .eq(id_value(self.backend, &edge.target_id)),
                        ),
                )
            }),
        }
    }

    /// `select target from t where source = ?`
    pub fn select_targets(&self, source_id: &IdValue) -> Statement {
        let select = Query::select()
            .column(ident(&self.table.target_column))
            .from(ident(&self.table.table_name))
            .and_where(
                self.column(&self.table.source_column)
                    .eq(id_value(self.backend, source_id)),
            )
            .to_owned();
        to_statement(self.backend, &select)
    }

    /// `select source, target from t where source in (...)`
    pub fn select_pairs_by_sources(&self, source_ids: &[IdValue]) -> Statement {
        let select = Query::select()
            .columns([
                ident(&self.table.source_column),
                ident(&self.table.target_column),
            ])
            .from(ident(&self.table.table_name))
            .and_where(
                self.column(&self.table.source_column).is_in(
                    source_ids
                        .iter()
                        .map(|id| id_value(self.backend, id)),
                ),
            )
            .to_owned();
        to_statement(self.backend, &select)
    }

    /// `select source, target from t where (source, target) in (...)`
    pub fn select_existing_pairs(&self, edges: &[Edge], shape: MembershipShape) -> Statement {
        let select = Query::select()
            .columns([
                ident(&self.table.source_column),
                ident(&self.table.target_column),
            ])
            .from(ident(&self.table.table_name))
            .cond_where(self.membership(edges, shape))
            .to_owned();
        to_statement(self.backend, &select)
    }

    pub fn insert_pairs(&self, edges: &[Edge], shape: &InsertShape) -> JunctionResult<Statement> {
        if edges.is_empty() {
            return Err(JunctionError::statement("insert requires at least one edge"));
        }
        let mut insert = Query::insert();
        insert
            .into_table(ident(&self.table.table_name))
            .columns([
                ident(&self.table.source_column),
                ident(&self.table.target_column),
            ]);
        match shape {
            InsertShape::MultiRowValues => {
                for edge in edges {
                    insert
                        .values([
                            self.bind(&edge.source_id).into(),
                            self.bind(&edge.target_id).into(),
                        ])
                        .map_err(|err| JunctionError::statement(err.to_string()))?;
                }
            }
            InsertShape::UnionAllSelect { constant_table } => {
                let mut selects = edges
                    .iter()
                    .map(|edge| self.constant_select(edge, constant_table.as_deref()));
                let Some(mut source) = selects.next() else {
                    return Err(JunctionError::statement("insert requires at least one edge"));
                };
                for select in selects {
                    source.union(UnionType::All, select);
                }
                insert
                    .select_from(source)
                    .map_err(|err| JunctionError::statement(err.to_string()))?;
            }
        }
        Ok(to_statement(self.backend, &insert))
    }

    fn constant_select(&self, edge: &Edge, constant_table: Option<&str>) -> SelectStatement {
        let mut select = Query::select();
        select
            .expr(self.bind(&edge.source_id))
            .expr(self.bind(&edge.target_id));
        if let Some(table) = constant_table {
            select.from(ident(table));
        }
        select
    }

    /// `delete from t where (source, target) in (...)`
    pub fn delete_pairs(&self, edges: &[Edge], shape: MembershipShape) -> Statement {
        let delete = Query::delete()
            .from_table(ident(&self.table.table_name))
            .cond_where(self.membership(edges, shape))
            .to_owned();
        to_statement(self.backend, &delete)
    }

    /// `delete from t where source in (...)`
    pub fn delete_by_sources(&self, source_ids: &[IdValue]) -> Statement {
        let delete = Query::delete()
            .from_table(ident(&self.table.table_name))
            .and_where(
                self.column(&self.table.source_column).is_in(
                    source_ids
                        .iter()
                        .map(|id| id_value(self.backend, id)),
                ),
            )
            .to_owned();
        to_statement(self.backend, &delete)
    }
}
