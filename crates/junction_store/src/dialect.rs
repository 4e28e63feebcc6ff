use sea_orm::DatabaseBackend;

use aideon_junction_core::Dialect;

use crate::DialectConfig;

/// Capability set for one backend, adjustable from configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DialectProfile {
    backend: DatabaseBackend,
    multi_row_insert: bool,
    constant_table: Option<String>,
    tuple_in_list: bool,
}

impl DialectProfile {
    pub fn for_backend(backend: DatabaseBackend) -> Self {
        // SQLite only accepts row values on the right of IN as a subquery.
        let tuple_in_list = matches!(backend, DatabaseBackend::Postgres | DatabaseBackend::MySql);
        Self {
            backend,
            multi_row_insert: true,
            constant_table: None,
            tuple_in_list,
        }
    }

    pub fn with_overrides(mut self, overrides: &DialectConfig) -> Self {
        if let Some(multi_row_insert) = overrides.multi_row_insert {
            self.multi_row_insert = multi_row_insert;
        }
        if let Some(constant_table) = &overrides.constant_table {
            self.constant_table = Some(constant_table.clone());
        }
        if let Some(tuple_in_list) = overrides.tuple_in_list {
            self.tuple_in_list = tuple_in_list;
        }
        self
    }

    pub fn with_multi_row_insert(mut self, enabled: bool) -> Self {
        self.multi_row_insert = enabled;
        self
    }

    pub fn with_constant_table(mut self, table: Option<&str>) -> Self {
        self.constant_table = table.map(str::to_string);
        self
    }

    pub fn with_tuple_in_list(mut self, enabled: bool) -> Self {
        self.tuple_in_list = enabled;
        self
    }
}

impl Dialect for DialectProfile {
    fn backend(&self) -> DatabaseBackend {
        self.backend
    }

    fn supports_multi_row_insert_values(&self) -> bool {
        self.multi_row_insert
    }

    fn constant_table_name(&self) -> Option<&str> {
        self.constant_table.as_deref()
    }

    fn supports_tuple_in_list(&self) -> bool {
        self.tuple_in_list
    }
}
