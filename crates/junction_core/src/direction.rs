//! Resolves which side of an association owns the junction table and which
//! column plays source for the current call.

use serde::{Deserialize, Serialize};

use crate::{AssociationProp, IdType, JunctionTable, PropStorage};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Owning,
    OwningBackView,
    Inverse,
    InverseBackView,
}

impl Direction {
    fn new(inverse: bool, back_view: bool) -> Self {
        match (inverse, back_view) {
            (false, false) => Direction::Owning,
            (false, true) => Direction::OwningBackView,
            (true, false) => Direction::Inverse,
            (true, true) => Direction::InverseBackView,
        }
    }

    pub fn is_back_view(self) -> bool {
        matches!(self, Direction::OwningBackView | Direction::InverseBackView)
    }

    pub fn is_inverse(self) -> bool {
        matches!(self, Direction::Inverse | Direction::InverseBackView)
    }

    /// Whether the effective layout is the declared mapping with columns swapped.
    pub fn uses_inverse_layout(self) -> bool {
        self.is_inverse() != self.is_back_view()
    }
}

/// Id column kinds bound to the effective source and target columns.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct IdTypes {
    pub source: IdType,
    pub target: IdType,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedJunction {
    pub table: JunctionTable,
    pub direction: Direction,
    pub id_types: IdTypes,
}

/// Returns `None` when the association cannot be synchronized through a local
/// junction table.
pub fn resolve(prop: &AssociationProp, viewed_from_back: bool) -> Option<ResolvedJunction> {
    let (declared, inverse) = match &prop.mapped_by {
        Some(_) if prop.remote => return None,
        Some(mapped_by) => (mapped_by.storage.as_ref()?, true),
        None => (prop.storage.as_ref()?, false),
    };
    let PropStorage::JunctionTable(declared) = declared else {
        return None;
    };
    let direction = Direction::new(inverse, viewed_from_back);
    let table = if direction.uses_inverse_layout() {
        declared.inverse()
    } else {
        declared.clone()
    };
    let id_types = if direction.is_back_view() {
        IdTypes {
            source: prop.target.id_type,
            target: prop.declaring.id_type,
        }
    } else {
        IdTypes {
            source: prop.declaring.id_type,
            target: prop.target.id_type,
        }
    };
    Some(ResolvedJunction {
        table,
        direction,
        id_types,
    })
}
