use crate::algorithms::ledger::CostLedger;
use crate::grid::Position;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Open set scanned linearly, in discovery order.
#[derive(Debug, Default)]
pub struct LinearFrontier {
    nodes: Vec<Position>,
}

impl LinearFrontier {
    pub fn new() -> Self {
        LinearFrontier::default()
    }

    pub fn push(&mut self, pos: Position) {
        self.nodes.push(pos);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Removes the node with the strictly lowest key. On ties the node
    /// discovered first wins.
    pub fn pop_min_by<K, F>(&mut self, mut key: F) -> Option<Position>
    where
        K: Ord,
        F: FnMut(Position) -> K,
    {
        let mut best: Option<(usize, K)> = None;
        for (i, &pos) in self.nodes.iter().enumerate() {
            let k = key(pos);
            let better = best.as_ref().map_or(true, |(_, best_key)| k < *best_key);
            if better {
                best = Some((i, k));
            }
        }
        best.map(|(i, _)| self.nodes.remove(i))
    }
}

/// Priority key: primary rank, then secondary tie break.
pub type Priority = (u32, u32);

#[derive(Clone, Copy, Debug)]
struct QueueEntry {
    priority: Priority,
    sequence: u64,
    cost: u32,
    pos: Position,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behaviour; equal priorities pop in insertion order.
        match other.priority.cmp(&self.priority) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            other => other,
        }
    }
}

/// Binary-heap open set that tolerates duplicate entries.
///
/// Every relaxation pushes a fresh entry. Entries whose node has since been
/// closed, or whose recorded cost no longer matches the ledger, are stale and
/// skipped when popped.
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<QueueEntry>,
    sequence: u64,
}

impl PriorityFrontier {
    pub fn new() -> Self {
        PriorityFrontier::default()
    }

    pub fn push(&mut self, pos: Position, cost: u32, priority: Priority) {
        self.sequence += 1;
        self.heap.push(QueueEntry {
            priority,
            sequence: self.sequence,
            cost,
            pos,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Raw entry count, stale duplicates included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Pops the best entry that still reflects the ledger's current cost.
    pub fn pop_valid(&mut self, ledger: &CostLedger) -> Option<Position> {
        while let Some(entry) = self.heap.pop() {
            if ledger.is_open(entry.pos) && ledger.cost(entry.pos) == entry.cost {
                return Some(entry.pos);
            }
        }
        None
    }
}
