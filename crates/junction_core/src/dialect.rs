use sea_orm::DatabaseBackend;

/// Capability flags of the target SQL engine.
pub trait Dialect: Send + Sync {
    fn backend(&self) -> DatabaseBackend;

    fn supports_multi_row_insert_values(&self) -> bool;

    /// Zero-row-safe table for engines that reject `SELECT` without `FROM`.
    fn constant_table_name(&self) -> Option<&str>;

    /// Whether `(a, b) IN ((?, ?), ...)` is accepted with a literal list.
    fn supports_tuple_in_list(&self) -> bool;
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InsertShape {
    /// `insert into t(a, b) values (?, ?), (?, ?)`
    MultiRowValues,
    /// `insert into t(a, b) select ?, ? [from c] union all select ?, ? [from c]`
    UnionAllSelect { constant_table: Option<String> },
}

impl InsertShape {
    pub fn for_dialect(dialect: &dyn Dialect) -> Self {
        if dialect.supports_multi_row_insert_values() {
            InsertShape::MultiRowValues
        } else {
            InsertShape::UnionAllSelect {
                constant_table: dialect.constant_table_name().map(str::to_string),
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MembershipShape {
    /// `(a, b) in ((?, ?), (?, ?))`
    TupleInList,
    /// `(a = ? and b = ?) or (a = ? and b = ?)`
    Disjunction,
}

impl MembershipShape {
    pub fn for_dialect(dialect: &dyn Dialect) -> Self {
        if dialect.supports_tuple_in_list() {
            MembershipShape::TupleInList
        } else {
            MembershipShape::Disjunction
        }
    }
}
