use crate::algorithms::distance::distance;
use crate::algorithms::ledger::CostLedger;
use crate::grid::{Grid, Position, WorldPoint};

/// An ordered route from the cell after `start` up to and including the target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Route {
    pub steps: Vec<Position>,
    /// Sum of step costs from the start through every step.
    pub cost: u32,
}

impl Route {
    /// Builds a route from its steps, costing it from `start`.
    pub fn from_steps(start: Position, steps: Vec<Position>) -> Self {
        let mut cost = 0u32;
        let mut previous = start;
        for &step in &steps {
            cost = cost.saturating_add(distance(previous, step));
            previous = step;
        }
        Route { steps, cost }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Next cell to head for.
    pub fn first(&self) -> Option<Position> {
        self.steps.first().copied()
    }

    pub fn last(&self) -> Option<Position> {
        self.steps.last().copied()
    }

    /// The route as world-space points, for the locomotion layer.
    pub fn waypoints(&self, grid: &Grid) -> Vec<WorldPoint> {
        self.steps
            .iter()
            .map(|&pos| grid.world_position(pos))
            .collect()
    }

    /// True when every consecutive pair (starting from `start`) are grid
    /// neighbours and every step is traversable.
    pub fn is_continuous(&self, grid: &Grid, start: Position) -> bool {
        let mut previous = start;
        for &step in &self.steps {
            if !grid.is_traversable(step) || !grid.are_neighbors(previous, step) {
                return false;
            }
            previous = step;
        }
        true
    }
}

/// Follows predecessor links from `target` back to `start` and returns the
/// route in travel order, start excluded.
///
/// Only call this once the target has been reached: the chain from the target
/// back to the start must be complete.
pub fn retrace(ledger: &CostLedger, start: Position, target: Position) -> Route {
    let mut steps = Vec::new();
    let mut current = target;

    while current != start {
        steps.push(current);
        let previous = ledger.predecessor(current);
        debug_assert!(
            previous.is_some(),
            "broken predecessor chain at {:?}",
            current
        );
        let Some(previous) = previous else {
            break;
        };
        current = previous;
        debug_assert!(
            steps.len() <= ledger.discovered(),
            "predecessor cycle through {:?}",
            current
        );
    }

    steps.reverse();
    Route::from_steps(start, steps)
}
