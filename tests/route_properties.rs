use grid_route_planner::simulation::optimal_route_cost;
use grid_route_planner::{Connectivity, Grid, ParentPolicy, PathSearch, Position, Strategy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn all_searches() -> Vec<Box<dyn PathSearch>> {
    Strategy::ALL
        .iter()
        .map(|strategy| strategy.build(ParentPolicy::default()))
        .collect()
}

fn random_case(rng: &mut StdRng) -> (Grid, Position, Position) {
    let width = rng.gen_range(2..9);
    let height = rng.gen_range(2..9);
    let start = Position::new(rng.gen_range(0..width), rng.gen_range(0..height));
    let target = Position::new(rng.gen_range(0..width), rng.gen_range(0..height));
    let walls = rng.gen_range(0..=width * height / 3);
    let connectivity = if rng.gen_bool(0.5) {
        Connectivity::Four
    } else {
        Connectivity::Eight
    };
    let grid = Grid::random(width, height, walls, &[start, target], rng).with_connectivity(connectivity);
    (grid, start, target)
}

#[test]
fn open_five_by_five_scenario() {
    let grid = Grid::open(5, 5);
    let start = Position::new(0, 0);
    let target = Position::new(4, 4);

    for mut search in all_searches() {
        let route = search.find_path(&grid, start, target).unwrap();
        assert!(route.len() >= 8, "{}", search.name());
        assert!(route.is_continuous(&grid, start), "{}", search.name());
        assert_eq!(route.last(), Some(target));
    }

    let uniform = Strategy::UniformCost
        .build(ParentPolicy::default())
        .find_path(&grid, start, target)
        .unwrap();
    assert_eq!(uniform.len(), 8);
    assert_eq!(uniform.cost, 80);
}

#[test]
fn blocked_centre_forces_detour() {
    let grid = Grid::parse(&["...", ".#.", "..."]).unwrap();
    let start = Position::new(0, 1);
    let target = Position::new(2, 1);

    for mut search in all_searches() {
        let route = search.find_path(&grid, start, target).unwrap();
        assert!(route.cost > 20, "{}", search.name());
        assert!(!route.steps.contains(&Position::new(1, 1)));
        assert!(route.is_continuous(&grid, start));
    }
}

#[test]
fn non_traversable_target_has_no_route() {
    let grid = Grid::parse(&["....", ".#..", "...."]).unwrap();
    let start = Position::new(0, 0);
    let target = Position::new(1, 1);

    for mut search in all_searches() {
        assert_eq!(search.find_path(&grid, start, target), None, "{}", search.name());
        assert_eq!(search.find_path(&grid, target, start), None, "{}", search.name());
    }
}

#[test]
fn start_equal_to_target_is_empty_everywhere() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        let (grid, start, _) = random_case(&mut rng);
        for mut search in all_searches() {
            let route = search.find_path(&grid, start, start).unwrap();
            assert!(route.is_empty());
            assert_eq!(route.cost, 0);
        }
    }
}

#[test]
fn optimal_strategies_match_oracle() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..300 {
        let (grid, start, target) = random_case(&mut rng);
        let expected = optimal_route_cost(&grid, start, target);

        for strategy in [Strategy::UniformCost, Strategy::AStar] {
            let route = strategy
                .build(ParentPolicy::default())
                .find_path(&grid, start, target);
            assert_eq!(route.as_ref().map(|r| r.cost), expected, "{}", strategy);
            if let Some(route) = route {
                assert!(route.is_continuous(&grid, start));
            }
        }
    }
}

#[test]
fn greedy_finds_a_route_whenever_one_exists() {
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..300 {
        let (grid, start, target) = random_case(&mut rng);
        let expected = optimal_route_cost(&grid, start, target);

        for policy in [ParentPolicy::FirstDiscovery, ParentPolicy::CheapestKnown] {
            let route = Strategy::Greedy.build(policy).find_path(&grid, start, target);
            assert_eq!(route.is_some(), expected.is_some());
            if let (Some(route), Some(optimal)) = (route, expected) {
                assert!(route.cost >= optimal);
                assert!(route.is_continuous(&grid, start));
                assert_eq!(route.last().unwrap_or(start), target);
            }
        }
    }
}

#[test]
fn relinking_never_makes_greedy_routes_worse() {
    let mut rng = StdRng::seed_from_u64(77);
    for _ in 0..300 {
        let (grid, start, target) = random_case(&mut rng);
        let mut legacy = Strategy::Greedy.build(ParentPolicy::FirstDiscovery);
        let mut relinking = Strategy::Greedy.build(ParentPolicy::CheapestKnown);

        let first = legacy.find_path(&grid, start, target);
        let cheapest = relinking.find_path(&grid, start, target);
        assert_eq!(legacy.last_expanded(), relinking.last_expanded());
        if let (Some(first), Some(cheapest)) = (first, cheapest) {
            assert!(cheapest.cost <= first.cost);
        }
    }
}

#[test]
fn unreachable_targets_terminate_within_node_count() {
    let grid = Grid::parse(&[
        "......#...",
        "......#...",
        "......#.#.",
        "......####",
        "..........",
    ])
    .unwrap();
    let start = Position::new(0, 0);
    let target = Position::new(7, 1);
    assert_eq!(optimal_route_cost(&grid, start, target), None);

    for mut search in all_searches() {
        assert_eq!(search.find_path(&grid, start, target), None);
        assert!(search.last_expanded() <= grid.traversable_count());
    }
}

#[test]
fn repeated_invocations_are_idempotent() {
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..100 {
        let (grid, start, target) = random_case(&mut rng);
        for mut search in all_searches() {
            let first = search.find_path(&grid, start, target);
            // An unrelated search in between must not leak state.
            let _ = search.find_path(&grid, target, start);
            let second = search.find_path(&grid, start, target);
            assert_eq!(first, second, "{}", search.name());
        }
    }
}
