use crate::grid::Position;
use rustc_hash::FxHashMap;

/// Run-scoped membership of a node. A node is in exactly one state at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Membership {
    #[default]
    Unseen,
    Open,
    Closed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Cheapest known cost from the start.
    pub g: u32,
    /// Estimated remaining cost to the target.
    pub h: u32,
    pub predecessor: Option<Position>,
    pub membership: Membership,
}

impl Default for LedgerEntry {
    fn default() -> Self {
        LedgerEntry {
            g: u32::MAX,
            h: 0,
            predecessor: None,
            membership: Membership::Unseen,
        }
    }
}

/// Search state for a single `find_path` call, keyed by node position.
///
/// Nodes never carry search state themselves; every run builds a fresh ledger
/// and drops it on return, so no state leaks between invocations.
#[derive(Debug, Default)]
pub struct CostLedger {
    entries: FxHashMap<Position, LedgerEntry>,
    expanded: usize,
}

impl CostLedger {
    pub fn new() -> Self {
        CostLedger::default()
    }

    /// Puts the start node in the open set with zero accumulated cost.
    pub fn seed(&mut self, start: Position, h: u32) {
        self.entries.insert(
            start,
            LedgerEntry {
                g: 0,
                h,
                predecessor: None,
                membership: Membership::Open,
            },
        );
    }

    pub fn entry(&self, pos: Position) -> LedgerEntry {
        self.entries.get(&pos).copied().unwrap_or_default()
    }

    pub fn cost(&self, pos: Position) -> u32 {
        self.entry(pos).g
    }

    pub fn heuristic(&self, pos: Position) -> u32 {
        self.entry(pos).h
    }

    pub fn predecessor(&self, pos: Position) -> Option<Position> {
        self.entries.get(&pos).and_then(|entry| entry.predecessor)
    }

    pub fn membership(&self, pos: Position) -> Membership {
        self.entry(pos).membership
    }

    pub fn is_open(&self, pos: Position) -> bool {
        self.membership(pos) == Membership::Open
    }

    pub fn is_closed(&self, pos: Position) -> bool {
        self.membership(pos) == Membership::Closed
    }

    /// Discovers `pos`, moving it into the open set.
    pub fn open(&mut self, pos: Position, g: u32, h: u32, predecessor: Position) {
        let entry = self.entries.entry(pos).or_default();
        debug_assert_ne!(entry.membership, Membership::Closed);
        entry.g = g;
        entry.h = h;
        entry.predecessor = Some(predecessor);
        entry.membership = Membership::Open;
    }

    /// Records a cheaper route to an already open node.
    pub fn relax(&mut self, pos: Position, g: u32, predecessor: Position) {
        let entry = self.entries.entry(pos).or_default();
        entry.g = g;
        entry.predecessor = Some(predecessor);
    }

    pub fn set_heuristic(&mut self, pos: Position, h: u32) {
        self.entries.entry(pos).or_default().h = h;
    }

    pub fn close(&mut self, pos: Position) {
        self.entries.entry(pos).or_default().membership = Membership::Closed;
        self.expanded += 1;
    }

    /// Number of nodes moved to the closed set so far.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Number of nodes the run has touched.
    pub fn discovered(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unseen_nodes_read_as_infinite_cost() {
        let ledger = CostLedger::new();
        let pos = Position::new(3, 3);
        assert_eq!(ledger.cost(pos), u32::MAX);
        assert_eq!(ledger.membership(pos), Membership::Unseen);
        assert_eq!(ledger.predecessor(pos), None);
    }

    #[test]
    fn test_membership_moves_from_open_to_closed() {
        let mut ledger = CostLedger::new();
        let start = Position::new(0, 0);
        let next = Position::new(0, 1);

        ledger.seed(start, 40);
        assert!(ledger.is_open(start));

        ledger.close(start);
        ledger.open(next, 10, 30, start);
        assert!(ledger.is_closed(start));
        assert!(ledger.is_open(next));
        assert_eq!(ledger.predecessor(next), Some(start));
        assert_eq!(ledger.expanded(), 1);
        assert_eq!(ledger.discovered(), 2);
    }

    #[test]
    fn test_relax_keeps_heuristic_and_membership() {
        let mut ledger = CostLedger::new();
        let a = Position::new(0, 0);
        let b = Position::new(1, 0);
        let c = Position::new(1, 1);

        ledger.open(c, 30, 50, a);
        ledger.relax(c, 20, b);

        let entry = ledger.entry(c);
        assert_eq!(entry.g, 20);
        assert_eq!(entry.h, 50);
        assert_eq!(entry.predecessor, Some(b));
        assert_eq!(entry.membership, Membership::Open);
    }
}
