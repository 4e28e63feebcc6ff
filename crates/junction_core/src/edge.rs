use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::IdValue;

/// One junction row: a `(source, target)` pair.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source_id: IdValue,
    pub target_id: IdValue,
}

impl Edge {
    pub fn new(source_id: impl Into<IdValue>, target_id: impl Into<IdValue>) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
        }
    }
}

/// Deduplicated target ids of one source, kept in first-insertion order.
#[derive(Clone, Debug, Default)]
pub struct EdgeSet {
    ordered: Vec<IdValue>,
    members: HashSet<IdValue>,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: IdValue) -> bool {
        if self.members.contains(&id) {
            return false;
        }
        self.members.insert(id.clone());
        self.ordered.push(id);
        true
    }

    pub fn contains(&self, id: &IdValue) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IdValue> {
        self.ordered.iter()
    }

    pub fn as_slice(&self) -> &[IdValue] {
        &self.ordered
    }

    /// Members of `self` absent from `other`, in `self`'s order.
    pub fn difference(&self, other: &EdgeSet) -> EdgeSet {
        self.ordered
            .iter()
            .filter(|id| !other.contains(id))
            .cloned()
            .collect()
    }
}

impl PartialEq for EdgeSet {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for EdgeSet {}

impl FromIterator<IdValue> for EdgeSet {
    fn from_iter<I: IntoIterator<Item = IdValue>>(iter: I) -> Self {
        let mut set = EdgeSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl IntoIterator for EdgeSet {
    type Item = IdValue;
    type IntoIter = std::vec::IntoIter<IdValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.into_iter()
    }
}

impl<'a> IntoIterator for &'a EdgeSet {
    type Item = &'a IdValue;
    type IntoIter = std::slice::Iter<'a, IdValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.iter()
    }
}
