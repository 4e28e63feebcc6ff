//! Backend-aware id binding and row decoding.

use sea_orm::sea_query::{
    MysqlQueryBuilder, PostgresQueryBuilder, QueryStatementWriter, SqliteQueryBuilder,
    Value as SeaValue,
};
use sea_orm::{DatabaseBackend, QueryResult, Statement};
use uuid::Uuid;

use aideon_junction_core::{IdType, IdValue, JunctionError, JunctionResult};

pub(crate) fn id_value(backend: DatabaseBackend, id: &IdValue) -> SeaValue {
    match id {
        IdValue::Uuid(uuid) => match backend {
            DatabaseBackend::Postgres => SeaValue::Uuid(Some(*uuid)),
            DatabaseBackend::MySql => SeaValue::Bytes(Some(uuid.as_bytes().to_vec())),
            DatabaseBackend::Sqlite => SeaValue::String(Some(uuid.to_string())),
            _ => SeaValue::String(Some(uuid.to_string())),
        },
        IdValue::I64(value) => SeaValue::BigInt(Some(*value)),
        IdValue::Str(value) => SeaValue::String(Some(value.clone())),
    }
}

fn bytes_to_uuid(bytes: Vec<u8>) -> Option<Uuid> {
    Uuid::from_slice(&bytes).ok()
}

pub(crate) fn read_id(row: &QueryResult, column: &str, id_type: IdType) -> JunctionResult<IdValue> {
    match id_type {
        IdType::Uuid => {
            if let Ok(value) = row.try_get::<String>("", column) {
                let uuid = Uuid::parse_str(&value).map_err(|err| {
                    JunctionError::decode(format!("invalid uuid '{value}' in {column}: {err}"))
                })?;
                return Ok(IdValue::Uuid(uuid));
            }
            if let Ok(value) = row.try_get::<Uuid>("", column) {
                return Ok(IdValue::Uuid(value));
            }
            if let Ok(value) = row.try_get::<Vec<u8>>("", column) {
                return bytes_to_uuid(value)
                    .map(IdValue::Uuid)
                    .ok_or_else(|| JunctionError::decode(format!("invalid uuid length in {column}")));
            }
            Err(JunctionError::decode(format!(
                "unsupported uuid format in {column}"
            )))
        }
        IdType::I64 => row
            .try_get::<i64>("", column)
            .map(IdValue::I64)
            .map_err(|err| JunctionError::decode(format!("{column}: {err}"))),
        IdType::Str => row
            .try_get::<String>("", column)
            .map(IdValue::Str)
            .map_err(|err| JunctionError::decode(format!("{column}: {err}"))),
    }
}

pub(crate) fn build_stmt<S: QueryStatementWriter>(
    backend: DatabaseBackend,
    stmt: &S,
) -> (String, sea_orm::sea_query::Values) {
    match backend {
        DatabaseBackend::Sqlite => stmt.build(SqliteQueryBuilder),
        DatabaseBackend::Postgres => stmt.build(PostgresQueryBuilder),
        DatabaseBackend::MySql => stmt.build(MysqlQueryBuilder),
        _ => stmt.build(SqliteQueryBuilder),
    }
}

pub(crate) fn to_statement<S: QueryStatementWriter>(backend: DatabaseBackend, stmt: &S) -> Statement {
    let (sql, values) = build_stmt(backend, stmt);
    Statement::from_sql_and_values(backend, sql, values)
}

#[cfg(test)]
mod tests {
    use sea_orm::DatabaseBackend;
    use sea_orm::sea_query::Value as SeaValue;
    use uuid::Uuid;

    use super::id_value;
    use aideon_junction_core::IdValue;

    #[test]
    fn uuids_bind_per_backend() {
        let uuid = Uuid::new_v4();
        let id = IdValue::Uuid(uuid);
        assert_eq!(
            id_value(DatabaseBackend::Postgres, &id),
            SeaValue::Uuid(Some(uuid))
        );
        assert_eq!(
            id_value(DatabaseBackend::MySql, &id),
            SeaValue::Bytes(Some(uuid.as_bytes().to_vec()))
        );
        assert_eq!(
            id_value(DatabaseBackend::Sqlite, &id),
            SeaValue::String(Some(uuid.to_string()))
        );
    }

    #[test]
    fn scalar_ids_bind_natively() {
        assert_eq!(
            id_value(DatabaseBackend::Sqlite, &IdValue::from(9)),
            SeaValue::BigInt(Some(9))
        );
        assert_eq!(
            id_value(DatabaseBackend::Postgres, &IdValue::from("k")),
            SeaValue::String(Some("k".to_string()))
        );
    }
}
