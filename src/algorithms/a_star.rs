use crate::algorithms::common::{check_endpoints, Endpoints, PathSearch};
use crate::algorithms::distance::distance;
use crate::algorithms::frontier::PriorityFrontier;
use crate::algorithms::ledger::CostLedger;
use crate::algorithms::path::{retrace, Route};
use crate::grid::{Grid, Position};

/// A* over the grid, ranking open nodes by `g + h` and breaking ties on the
/// lower estimate.
///
/// The scaled Manhattan heuristic never overestimates on either connectivity,
/// so routes are minimum-cost like [`UniformCost`](super::uniform_cost::UniformCost)
/// while expanding fewer nodes.
#[derive(Debug, Default)]
pub struct AStar {
    expanded: usize,
}

impl AStar {
    pub fn new() -> Self {
        AStar::default()
    }
}

impl PathSearch for AStar {
    fn name(&self) -> &'static str {
        "a_star"
    }

    fn find_path(&mut self, grid: &Grid, start: Position, target: Position) -> Option<Route> {
        self.expanded = 0;
        match check_endpoints(grid, start, target) {
            Endpoints::Invalid => {
                log::debug!("a_star: endpoint {:?} -> {:?} not traversable", start, target);
                return None;
            }
            Endpoints::AlreadyThere => return Some(Route::default()),
            Endpoints::Search => {}
        }

        let mut ledger = CostLedger::new();
        let mut open = PriorityFrontier::new();
        let start_h = distance(start, target);
        ledger.seed(start, start_h);
        open.push(start, 0, (start_h, start_h));

        while let Some(current) = open.pop_valid(&ledger) {
            if current == target {
                self.expanded = ledger.expanded();
                let route = retrace(&ledger, start, target);
                log::debug!(
                    "a_star: {:?} -> {:?} in {} steps, cost {}, {} expanded",
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

                let tentative = current_cost.saturating_add(distance(current, neighbor));
                if ledger.is_open(neighbor) {
                    if tentative >= ledger.cost(neighbor) {
                        continue;
                    }
                    ledger.relax(neighbor, tentative, current);
                } else {
                    ledger.open(neighbor, tentative, distance(neighbor, target), current);
                }

                let h = ledger.heuristic(neighbor);
                open.push(neighbor, tentative, (tentative.saturating_add(h), h));
            }
        }

        self.expanded = ledger.expanded();
        log::debug!(
            "a_star: no route {:?} -> {:?} after {} expansions",
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::uniform_cost::UniformCost;

    #[test]
    fn test_matches_uniform_cost_and_expands_less() {
        let grid = Grid::parse(&[
            "........",
            "..####..",
            "........",
            ".#....#.",
            ".#....#.",
            "........",
        ])
        .unwrap();
        let start = Position::new(0, 0);
        let target = Position::new(7, 5);

        let mut a_star = AStar::new();
        let mut uniform = UniformCost::new();
        let fast = a_star.find_path(&grid, start, target).unwrap();
        let reference = uniform.find_path(&grid, start, target).unwrap();

        assert_eq!(fast.cost, reference.cost);
        assert_eq!(fast.cost, 120);
        assert!(fast.is_continuous(&grid, start));
        assert!(a_star.last_expanded() <= uniform.last_expanded());
    }

    #[test]
    fn test_blocked_target_has_no_route() {
        let grid = Grid::parse(&["....", "...#"]).unwrap();
        assert_eq!(
            AStar::new().find_path(&grid, Position::new(0, 0), Position::new(3, 1)),
            None
        );
    }
}
