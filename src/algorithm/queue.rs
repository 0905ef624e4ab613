//! Max-error-first queue over live leaf regions
//!
//! Ties between equal scores pop in insertion order, so the four children
//! of a split leave the queue in top-left, top-right, bottom-left,
//! bottom-right order when their scores match.

use crate::spatial::RegionId;
use ordered_float::OrderedFloat;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    score: OrderedFloat<f64>,
    sequence: Reverse<u64>,
    id: RegionId,
}

impl QueueEntry {
    const fn key(&self) -> (OrderedFloat<f64>, Reverse<u64>) {
        (self.score, self.sequence)
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of region handles keyed by error score
#[derive(Debug, Clone, Default)]
pub struct RegionQueue {
    heap: BinaryHeap<QueueEntry>,
    next_sequence: u64,
}

impl RegionQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queue holding a single region
    pub fn seeded(id: RegionId, score: f64) -> Self {
        let mut queue = Self::new();
        queue.push(id, score);
        queue
    }

    /// Insert a region with its error score
    pub fn push(&mut self, id: RegionId, score: f64) {
        self.heap.push(QueueEntry {
            score: OrderedFloat(score),
            sequence: Reverse(self.next_sequence),
            id,
        });
        self.next_sequence += 1;
    }

    /// Remove and return the region with the highest score
    pub fn pop(&mut self) -> Option<RegionId> {
        self.heap.pop().map(|entry| entry.id)
    }

    /// Highest-scoring region and its score, without removing it
    pub fn peek(&self) -> Option<(RegionId, f64)> {
        self.heap.peek().map(|entry| (entry.id, entry.score.0))
    }

    /// Number of queued regions
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no regions are queued
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
