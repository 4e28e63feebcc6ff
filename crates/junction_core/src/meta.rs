use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::IdType;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EntityType {
    pub name: String,
    pub id_type: IdType,
}

impl EntityType {
    pub fn new(name: impl Into<String>, id_type: IdType) -> Self {
        Self {
            name: name.into(),
            id_type,
        }
    }
}

/// Physical layout of a junction table as seen from one side of the association.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct JunctionTable {
    pub table_name: String,
    pub source_column: String,
    pub target_column: String,
}

impl JunctionTable {
    pub fn new(
        table_name: impl Into<String>,
        source_column: impl Into<String>,
        target_column: impl Into<String>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            source_column: source_column.into(),
            target_column: target_column.into(),
        }
    }

    /// Same table with the source and target columns swapped.
    pub fn inverse(&self) -> Self {
        Self {
            table_name: self.table_name.clone(),
            source_column: self.target_column.clone(),
            target_column: self.source_column.clone(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropStorage {
    JunctionTable(JunctionTable),
    ForeignKey { column: String },
}

/// Association property metadata consumed by direction resolution.
#[derive(Clone, Debug)]
pub struct AssociationProp {
    pub name: String,
    pub declaring: EntityType,
    pub target: EntityType,
    pub storage: Option<PropStorage>,
    pub mapped_by: Option<Arc<AssociationProp>>,
    pub remote: bool,
}

impl AssociationProp {
    /// A property carrying its own storage mapping.
    pub fn owning(
        name: impl Into<String>,
        declaring: EntityType,
        target: EntityType,
        storage: PropStorage,
    ) -> Self {
        Self {
            name: name.into(),
            declaring,
            target,
            storage: Some(storage),
            mapped_by: None,
            remote: false,
        }
    }

    /// The inverse side of `mapped_by`; its declaring type is `mapped_by`'s target.
    pub fn mapped_by(name: impl Into<String>, mapped_by: Arc<AssociationProp>) -> Self {
        Self {
            name: name.into(),
            declaring: mapped_by.target.clone(),
            target: mapped_by.declaring.clone(),
            storage: None,
            mapped_by: Some(mapped_by),
            remote: false,
        }
    }

    /// Marks the association as spanning another datasource.
    pub fn with_remote(mut self, remote: bool) -> Self {
        self.remote = remote;
        self
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.declaring.name, self.name)
    }
}
