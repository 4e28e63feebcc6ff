//! Restartable traversal over a fixed sequence of junction edges.
//!
//! A mutation walks the same edges twice (once to notify the trigger, once to
//! build the statement), so cursors rewind with [`IdPairCursor::reset`] instead
//! of being consumed like an iterator. The backing data is never mutated.

use crate::{Edge, EdgeSet, IdValue};

pub trait IdPairCursor {
    /// True when another edge can be read. Does not advance.
    fn is_readable(&self) -> bool;

    /// Advances to the next edge. After a `false` return there is no current edge.
    fn read(&mut self) -> bool;

    fn source_id(&self) -> Option<&IdValue>;

    fn target_id(&self) -> Option<&IdValue>;

    /// Rewinds to the position before the first edge.
    fn reset(&mut self);

    fn read_edge(&mut self) -> Option<Edge> {
        if !self.read() {
            return None;
        }
        Some(Edge {
            source_id: self.source_id()?.clone(),
            target_id: self.target_id()?.clone(),
        })
    }
}

/// One source fanned out over a deduplicated, ordered target set.
#[derive(Clone, Debug)]
pub struct FanOutCursor {
    source_id: IdValue,
    target_ids: EdgeSet,
    next: usize,
    current: Option<usize>,
}

impl FanOutCursor {
    pub fn new(source_id: IdValue, target_ids: impl IntoIterator<Item = IdValue>) -> Self {
        Self::from_set(source_id, target_ids.into_iter().collect())
    }

    pub fn from_set(source_id: IdValue, target_ids: EdgeSet) -> Self {
        Self {
            source_id,
            target_ids,
            next: 0,
            current: None,
        }
    }

    pub fn len(&self) -> usize {
        self.target_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target_ids.is_empty()
    }
}

impl IdPairCursor for FanOutCursor {
    fn is_readable(&self) -> bool {
        self.next < self.target_ids.len()
    }

    fn read(&mut self) -> bool {
        if self.is_readable() {
            self.current = Some(self.next);
            self.next += 1;
            true
        } else {
            self.current = None;
            false
        }
    }

    fn source_id(&self) -> Option<&IdValue> {
        self.current.map(|_| &self.source_id)
    }

    fn target_id(&self) -> Option<&IdValue> {
        self.current
            .and_then(|index| self.target_ids.as_slice().get(index))
    }

    fn reset(&mut self) {
        self.next = 0;
        self.current = None;
    }
}

/// An already materialized list of edges, usually fetched from the junction table.
#[derive(Clone, Debug, Default)]
pub struct TupleCursor {
    edges: Vec<Edge>,
    next: usize,
    current: Option<usize>,
}

impl TupleCursor {
    pub fn new(edges: Vec<Edge>) -> Self {
        Self {
            edges,
            next: 0,
            current: None,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    fn current_edge(&self) -> Option<&Edge> {
        self.current.and_then(|index| self.edges.get(index))
    }
}

impl IdPairCursor for TupleCursor {
    fn is_readable(&self) -> bool {
        self.next < self.edges.len()
    }

    fn read(&mut self) -> bool {
        if self.is_readable() {
            self.current = Some(self.next);
            self.next += 1;
            true
        } else {
            self.current = None;
            false
        }
    }

    fn source_id(&self) -> Option<&IdValue> {
        self.current_edge().map(|edge| &edge.source_id)
    }

    fn target_id(&self) -> Option<&IdValue> {
        self.current_edge().map(|edge| &edge.target_id)
    }

    fn reset(&mut self) {
        self.next = 0;
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{FanOutCursor, IdPairCursor, TupleCursor};
    use crate::{Edge, IdValue};

    fn drain(cursor: &mut impl IdPairCursor) -> Vec<Edge> {
        let mut out = Vec::new();
        while let Some(edge) = cursor.read_edge() {
            out.push(edge);
        }
        out
    }

    #[test]
    fn fan_out_walks_deduplicated_targets() {
        let mut cursor = FanOutCursor::new(
            IdValue::from(1),
            [10, 20, 10, 30].into_iter().map(IdValue::from),
        );
        assert_eq!(cursor.len(), 3);
        assert!(cursor.is_readable());
        assert_eq!(
            drain(&mut cursor),
            vec![Edge::new(1, 10), Edge::new(1, 20), Edge::new(1, 30)]
        );
        assert!(!cursor.is_readable());
        assert!(cursor.source_id().is_none());
    }

    #[test]
    fn is_readable_does_not_advance() {
        let mut cursor = TupleCursor::new(vec![Edge::new(1, 2)]);
        assert!(cursor.is_readable());
        assert!(cursor.is_readable());
        assert!(cursor.read());
        assert_eq!(cursor.source_id(), Some(&IdValue::from(1)));
        assert_eq!(cursor.target_id(), Some(&IdValue::from(2)));
        assert!(!cursor.is_readable());
        assert!(!cursor.read());
    }

    #[test]
    fn reset_replays_the_same_sequence() {
        let edges = vec![Edge::new(1, 2), Edge::new(3, 4), Edge::new(1, 5)];
        let mut cursor = TupleCursor::new(edges.clone());
        let first = drain(&mut cursor);
        cursor.reset();
        let second = drain(&mut cursor);
        assert_eq!(first, edges);
        assert_eq!(second, edges);
        assert_eq!(cursor.edges(), edges.as_slice());
    }

    #[test]
    fn reset_after_partial_read_starts_over() {
        let mut cursor =
            FanOutCursor::new(IdValue::from("a"), ["x", "y"].into_iter().map(IdValue::from));
        assert!(cursor.read());
        cursor.reset();
        assert_eq!(drain(&mut cursor).len(), 2);
    }

    #[test]
    fn empty_cursors_are_terminal() {
        let mut tuples = TupleCursor::empty();
        assert!(!tuples.is_readable());
        assert!(tuples.read_edge().is_none());
        let mut fan_out = FanOutCursor::new(IdValue::from(1), Vec::new());
        assert!(!fan_out.is_readable());
        assert!(!fan_out.read());
    }
}
