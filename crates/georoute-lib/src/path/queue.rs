use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::NodeIndex;

#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct FloatOrd(pub(crate) f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    priority: FloatOrd,
    sequence: u64,
    node: NodeIndex,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by priority; equal
        // priorities pop in insertion order.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of graph nodes backed by a binary heap.
///
/// There is no decrease-key: callers push a node again with its improved
/// priority and skip stale entries when they pop.
#[derive(Debug, Default)]
pub(crate) struct MinQueue {
    heap: BinaryHeap<QueueEntry>,
    next_sequence: u64,
}

impl MinQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, node: NodeIndex, priority: f64) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(QueueEntry {
            priority: FloatOrd(priority),
            sequence,
            node,
        });
    }

    pub(crate) fn pop(&mut self) -> Option<(NodeIndex, f64)> {
        self.heap.pop().map(|entry| (entry.node, entry.priority.0))
    }
}
