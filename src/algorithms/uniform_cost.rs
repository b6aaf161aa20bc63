use crate::algorithms::common::{check_endpoints, Endpoints, PathSearch};
use crate::algorithms::distance::distance;
use crate::algorithms::frontier::PriorityFrontier;
use crate::algorithms::ledger::CostLedger;
use crate::algorithms::path::{retrace, Route};
use crate::grid::{Grid, Position};

/// Uniform-cost search (Dijkstra over the grid): expands nodes in order of
/// accumulated cost and returns a minimum-cost route.
#[derive(Debug, Default)]
pub struct UniformCost {
    expanded: usize,
}

impl UniformCost {
    pub fn new() -> Self {
        UniformCost::default()
    }
}

impl PathSearch for UniformCost {
    fn name(&self) -> &'static str {
        "uniform_cost"
    }

    fn find_path(&mut self, grid: &Grid, start: Position, target: Position) -> Option<Route> {
        self.expanded = 0;
        match check_endpoints(grid, start, target) {
            Endpoints::Invalid => {
                log::debug!("uniform_cost: endpoint {:?} -> {:?} not traversable", start, target);
                return None;
            }
            Endpoints::AlreadyThere => return Some(Route::default()),
            Endpoints::Search => {}
        }

        let mut ledger = CostLedger::new();
        let mut open = PriorityFrontier::new();
        ledger.seed(start, 0);
        open.push(start, 0, (0, 0));

        while let Some(current) = open.pop_valid(&ledger) {
            if current == target {
                self.expanded = ledger.expanded();
                let route = retrace(&ledger, start, target);
                log::debug!(
                    "uniform_cost: {:?} -> {:?} in {} steps, cost {}, {} expanded",
                    start,
                    target,
                    route.len(),
                    route.cost,
                    self.expanded
                );
                return Some(route);
            }

            ledger.close(current);

            let current_cost = ledger.cost(current);
            for neighbor in grid.neighbors_of(current) {
                if !grid.is_traversable(neighbor) || ledger.is_closed(neighbor) {
                    continue;
                }

                let candidate = current_cost.saturating_add(distance(current, neighbor));
                if !ledger.is_open(neighbor) {
                    ledger.open(neighbor, candidate, 0, current);
                    open.push(neighbor, candidate, (candidate, 0));
                } else if candidate < ledger.cost(neighbor) {
                    ledger.relax(neighbor, candidate, current);
                    open.push(neighbor, candidate, (candidate, 0));
                }
            }
        }

        self.expanded = ledger.expanded();
        log::debug!(
            "uniform_cost: no route {:?} -> {:?} after {} expansions",
            start,
            target,
            self.expanded
        );
        None
    }

    fn last_expanded(&self) -> usize {
        self.expanded
    }
}
