//! Per-edge change notification.
//!
//! Events are dispatched before the matching statement executes and are never
//! retracted if that statement or the enclosing transaction fails. Callers that
//! need commit-accurate notifications install a [`BufferedTrigger`] and forward
//! its events only after commit.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::{AssociationProp, IdValue};

pub trait MutationTrigger: Send + Sync {
    fn insert_edge(&self, prop: &AssociationProp, source_id: &IdValue, target_id: &IdValue);

    fn delete_edge(&self, prop: &AssociationProp, source_id: &IdValue, target_id: &IdValue);
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeChangeKind {
    Inserted,
    Deleted,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EdgeEvent {
    pub kind: EdgeChangeKind,
    pub prop: String,
    pub source_id: IdValue,
    pub target_id: IdValue,
}

/// Records events in dispatch order until the caller drains or discards them.
#[derive(Debug, Default)]
pub struct BufferedTrigger {
    events: Mutex<Vec<EdgeEvent>>,
}

impl BufferedTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<EdgeEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Takes every buffered event, typically right after commit.
    pub fn drain(&self) -> Vec<EdgeEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Drops buffered events, typically after rollback.
    pub fn discard(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn push(&self, kind: EdgeChangeKind, prop: &AssociationProp, source: &IdValue, target: &IdValue) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(EdgeEvent {
                kind,
                prop: prop.qualified_name(),
                source_id: source.clone(),
                target_id: target.clone(),
            });
    }
}

impl MutationTrigger for BufferedTrigger {
    fn insert_edge(&self, prop: &AssociationProp, source_id: &IdValue, target_id: &IdValue) {
        self.push(EdgeChangeKind::Inserted, prop, source_id, target_id);
    }

    fn delete_edge(&self, prop: &AssociationProp, source_id: &IdValue, target_id: &IdValue) {
        self.push(EdgeChangeKind::Deleted, prop, source_id, target_id);
    }
}

#[cfg(test)]
mod tests {
    use super::{BufferedTrigger, EdgeChangeKind, MutationTrigger};
    use crate::{AssociationProp, EntityType, IdType, IdValue, JunctionTable, PropStorage};

    fn prop() -> AssociationProp {
        AssociationProp::owning(
            "authors",
            EntityType::new("Book", IdType::I64),
            EntityType::new("Author", IdType::I64),
            PropStorage::JunctionTable(JunctionTable::new("book_author", "book_id", "author_id")),
        )
    }

    #[test]
    fn buffers_in_dispatch_order_until_drained() {
        let trigger = BufferedTrigger::new();
        let prop = prop();
        trigger.delete_edge(&prop, &IdValue::from(1), &IdValue::from(30));
        trigger.insert_edge(&prop, &IdValue::from(1), &IdValue::from(10));
        let events = trigger.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, EdgeChangeKind::Deleted);
        assert_eq!(events[1].kind, EdgeChangeKind::Inserted);
        assert_eq!(events[1].prop, "Book.authors");
        assert!(trigger.is_empty());
    }

    #[test]
    fn discard_drops_pending_events() {
        let trigger = BufferedTrigger::new();
        trigger.insert_edge(&prop(), &IdValue::from(1), &IdValue::from(2));
        trigger.discard();
        assert!(trigger.events().is_empty());
    }

    #[test]
    fn events_serialize_for_export() {
        let trigger = BufferedTrigger::new();
        trigger.insert_edge(&prop(), &IdValue::from(1), &IdValue::from("x"));
        let encoded = serde_json::to_value(trigger.events()).expect("encode");
        assert_eq!(encoded[0]["kind"], "inserted");
        assert_eq!(encoded[0]["source_id"], 1);
        assert_eq!(encoded[0]["target_id"], "x");
    }
}
