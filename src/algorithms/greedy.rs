use crate::algorithms::common::{check_endpoints, Endpoints, ParentPolicy, PathSearch};
use crate::algorithms::distance::distance;
use crate::algorithms::frontier::LinearFrontier;
use crate::algorithms::ledger::CostLedger;
use crate::algorithms::path::{retrace, Route};
use crate::grid::{Grid, Position};

/// Greedy Best-First search: always expands the open node with the lowest
/// heuristic estimate to the target, ignoring accumulated cost.
///
/// Finds a route quickly but does not guarantee the cheapest one. Ties between
/// equal estimates go to the node discovered first.
#[derive(Debug, Default)]
pub struct GreedyBestFirst {
    policy: ParentPolicy,
    expanded: usize,
}

impl GreedyBestFirst {
    pub fn new(policy: ParentPolicy) -> Self {
        GreedyBestFirst {
            policy,
            expanded: 0,
        }
    }
}

impl PathSearch for GreedyBestFirst {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn find_path(&mut self, grid: &Grid, start: Position, target: Position) -> Option<Route> {
        self.expanded = 0;
        match check_endpoints(grid, start, target) {
            Endpoints::Invalid => {
                log::debug!("greedy: endpoint {:?} -> {:?} not traversable", start, target);
                return None;
            }
            Endpoints::AlreadyThere => return Some(Route::default()),
            Endpoints::Search => {}
        }

        let mut ledger = CostLedger::new();
        let mut open = LinearFrontier::new();
        ledger.seed(start, distance(start, target));
        open.push(start);

        while let Some(current) = open.pop_min_by(|pos| ledger.heuristic(pos)) {
            ledger.close(current);

            if current == target {
                self.expanded = ledger.expanded();
                let route = retrace(&ledger, start, target);
                log::debug!(
                    "greedy: {:?} -> {:?} in {} steps, cost {}, {} expanded",
                    start,
                    target,
                    route.len(),
                    route.cost,
                    self.expanded
                );
                return Some(route);
            }

            let current_cost = ledger.cost(current);
            for neighbor in grid.neighbors_of(current) {
                if !grid.is_traversable(neighbor) || ledger.is_closed(neighbor) {
                    continue;
                }

                let h = distance(neighbor, target);
                let g = current_cost.saturating_add(distance(current, neighbor));

                if ledger.is_open(neighbor) {
                    ledger.set_heuristic(neighbor, h);
                    if self.policy == ParentPolicy::CheapestKnown && g < ledger.cost(neighbor) {
                        ledger.relax(neighbor, g, current);
                    }
                } else {
                    ledger.open(neighbor, g, h, current);
                    open.push(neighbor);
                }
            }
        }

        self.expanded = ledger.expanded();
        log::debug!(
            "greedy: no route {:?} -> {:?} after {} expansions",
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
    use crate::grid::Connectivity;

    fn search() -> GreedyBestFirst {
        GreedyBestFirst::new(ParentPolicy::CheapestKnown)
    }

    #[test]
    fn test_open_grid_route_progresses_toward_target() {
        let grid = Grid::open(5, 5);
        let start = Position::new(0, 0);
        let target = Position::new(4, 4);

        let route = search().find_path(&grid, start, target).unwrap();
        assert!(route.len() >= 8);
        assert_eq!(route.last(), Some(target));
        assert!(route.is_continuous(&grid, start));

        let mut previous = distance(start, target);
        for &step in &route.steps {
            let remaining = distance(step, target);
            assert!(remaining < previous);
            previous = remaining;
        }
    }

    #[test]
    fn test_detours_around_blocked_centre() {
        let grid = Grid::parse(&["...", ".#.", "..."]).unwrap();
        let start = Position::new(0, 1);
        let target = Position::new(2, 1);

        let route = search().find_path(&grid, start, target).unwrap();
        assert_eq!(
            route.steps,
            vec![
                Position::new(0, 2),
                Position::new(1, 2),
                Position::new(2, 2),
                target,
            ]
        );
        assert_eq!(route.cost, 40);
    }

    #[test]
    fn test_walled_off_target_has_no_route() {
        let grid = Grid::parse(&["..#..", "..#..", "..#.."]).unwrap();
        let mut greedy = search();
        assert_eq!(
            greedy.find_path(&grid, Position::new(0, 0), Position::new(4, 2)),
            None
        );
        assert_eq!(greedy.last_expanded(), 6);
    }

    #[test]
    fn test_blocked_target_has_no_route() {
        let grid = Grid::parse(&["...", "..#"]).unwrap();
        assert_eq!(
            search().find_path(&grid, Position::new(0, 0), Position::new(2, 1)),
            None
        );
    }

    #[test]
    fn test_start_equal_to_target_is_empty_route() {
        let grid = Grid::open(3, 3);
        let pos = Position::new(1, 1);
        let route = search().find_path(&grid, pos, pos).unwrap();
        assert!(route.is_empty());
        assert_eq!(route.cost, 0);
    }

    #[test]
    fn test_cheapest_known_relinks_open_neighbours() {
        let grid = Grid::parse(&[
            ".........",
            ".........",
            "...#.##..",
            ".......#.",
            "###.#....",
            "..#......",
            ".........",
            "...#.....",
        ])
        .unwrap()
        .with_connectivity(Connectivity::Eight);
        let start = Position::new(1, 1);
        let target = Position::new(0, 5);

        let mut legacy = GreedyBestFirst::new(ParentPolicy::FirstDiscovery);
        let mut relinking = GreedyBestFirst::new(ParentPolicy::CheapestKnown);
        let first = legacy.find_path(&grid, start, target).unwrap();
        let cheapest = relinking.find_path(&grid, start, target).unwrap();

        assert_eq!(first.cost, 130);
        assert_eq!(first.first(), Some(Position::new(0, 2)));
        assert_eq!(cheapest.cost, 110);
        assert_eq!(cheapest.first(), Some(Position::new(1, 2)));
        assert!(cheapest.is_continuous(&grid, start));
        assert_eq!(legacy.last_expanded(), relinking.last_expanded());
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let grid = Grid::parse(&[".....", ".###.", ".#...", ".#.#.", "...#."]).unwrap();
        let start = Position::new(0, 0);
        let target = Position::new(2, 2);
        let mut greedy = GreedyBestFirst::new(ParentPolicy::FirstDiscovery);

        let first = greedy.find_path(&grid, start, target);
        let second = greedy.find_path(&grid, start, target);
        assert!(first.is_some());
        assert_eq!(first, second);
    }
}
