use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Column kind of an entity id, used to decode junction rows consistently.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdType {
    Uuid,
    I64,
    Str,
}

/// Opaque entity identifier as stored in one junction column.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    Uuid(Uuid),
    I64(i64),
    Str(String),
}

impl IdValue {
    pub fn id_type(&self) -> IdType {
        match self {
            IdValue::Uuid(_) => IdType::Uuid,
            IdValue::I64(_) => IdType::I64,
            IdValue::Str(_) => IdType::Str,
        }
    }
}

impl fmt::Display for IdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdValue::Uuid(value) => write!(f, "{value}"),
            IdValue::I64(value) => write!(f, "{value}"),
            IdValue::Str(value) => f.write_str(value),
        }
    }
}

impl From<Uuid> for IdValue {
    fn from(value: Uuid) -> Self {
        IdValue::Uuid(value)
    }
}

impl From<i64> for IdValue {
    fn from(value: i64) -> Self {
        IdValue::I64(value)
    }
}

impl From<String> for IdValue {
    fn from(value: String) -> Self {
        IdValue::Str(value)
    }
}

impl From<&str> for IdValue {
    fn from(value: &str) -> Self {
        IdValue::Str(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{IdType, IdValue};
    use uuid::Uuid;

    #[test]
    fn reports_id_type_per_variant() {
        assert_eq!(IdValue::from(7).id_type(), IdType::I64);
        assert_eq!(IdValue::from("isbn-1").id_type(), IdType::Str);
        assert_eq!(IdValue::from(Uuid::new_v4()).id_type(), IdType::Uuid);
    }

    #[test]
    fn serializes_without_variant_tags() {
        let encoded = serde_json::to_string(&vec![IdValue::from(3), IdValue::from("x")])
            .expect("encode");
        assert_eq!(encoded, r#"[3,"x"]"#);
    }
}
