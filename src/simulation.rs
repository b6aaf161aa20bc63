use crate::agent::{Agent, RouteSlot};
use crate::algorithms::{distance, PathSearch, Strategy};
use crate::config::Config;
use crate::error::{PlannerError, Result};
use crate::grid::{Grid, Position, WorldPoint};
use crate::statistics::{Statistics, TimingData};
use pathfinding::prelude::dijkstra;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::thread;
use std::time::{Duration, Instant};

/// Layouts tried before giving up on connecting start and goal.
const MAX_LAYOUT_ATTEMPTS: usize = 20;
/// Consecutive "no route" ticks tolerated before the agent gives up.
const MAX_STUCK_ATTEMPTS: usize = 5;

/// Cheapest route cost between two cells, computed independently of the
/// planner's own strategies. `None` when the goal is unreachable.
pub fn optimal_route_cost(grid: &Grid, start: Position, goal: Position) -> Option<u32> {
    if !grid.is_traversable(start) || !grid.is_traversable(goal) {
        return None;
    }
    dijkstra(
        &start,
        |p| {
            grid.neighbors_of(*p)
                .into_iter()
                .filter(|n| grid.is_traversable(*n))
                .map(|n| (n, distance(*p, n)))
                .collect::<Vec<_>>()
        },
        |p| *p == goal,
    )
    .map(|(_, cost)| cost)
}

#[derive(Debug, Clone)]
pub struct EnvironmentSetup {
    pub seed: u64,
    pub start: Position,
    pub goal: Position,
    pub grid: Grid,
    pub optimal_cost: u32,
}

impl EnvironmentSetup {
    /// Generates a seeded layout whose start and goal are connected.
    pub fn generate(config: &Config) -> Result<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        let mut rng = StdRng::seed_from_u64(seed);
        let size = config.grid_size;
        let mut last_endpoints = (Position::new(0, 0), Position::new(0, 0));

        for attempt in 1..=MAX_LAYOUT_ATTEMPTS {
            let start = Position {
                x: rng.gen_range(0..size / 2),
                y: rng.gen_range(0..size / 2),
            };
            let goal = Position {
                x: rng.gen_range(size / 2..size),
                y: rng.gen_range(size / 2..size),
            };
            let grid = Grid::random(size, size, config.num_walls, &[start, goal], &mut rng)
                .with_connectivity(config.connectivity)
                .with_geometry(WorldPoint::ORIGIN, config.cell_size);

            if let Some(optimal_cost) = optimal_route_cost(&grid, start, goal) {
                log::info!(
                    "environment seed {}: start {:?}, goal {:?}, {} walls, optimal cost {} (layout {})",
                    seed,
                    start,
                    goal,
                    size * size - grid.traversable_count(),
                    optimal_cost,
                    attempt
                );
                return Ok(EnvironmentSetup {
                    seed,
                    start,
                    goal,
                    grid,
                    optimal_cost,
                });
            }

            log::debug!("layout {} leaves {:?} cut off from {:?}", attempt, start, goal);
            last_endpoints = (start, goal);
        }

        Err(PlannerError::Unreachable {
            start: last_endpoints.0,
            goal: last_endpoints.1,
            attempts: MAX_LAYOUT_ATTEMPTS,
        })
    }

    /// Wraps a hand-built grid, checking that the goal can be reached.
    pub fn from_grid(grid: Grid, start: Position, goal: Position) -> Result<Self> {
        let optimal_cost =
            optimal_route_cost(&grid, start, goal).ok_or(PlannerError::Unreachable {
                start,
                goal,
                attempts: 1,
            })?;
        Ok(EnvironmentSetup {
            seed: 0,
            start,
            goal,
            grid,
            optimal_cost,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AlgorithmResult {
    pub statistics: Statistics,
    pub timing_data: TimingData,
    pub final_position: Option<Position>,
}

pub struct Simulation {
    grid: Grid,
    start: Position,
    goal: Position,
    agent: Agent,
    search: Box<dyn PathSearch>,
    slot: RouteSlot,
    config: Config,
    strategy: Strategy,
    optimal_cost: u32,
}

impl Simulation {
    /// Builds a simulation for a single strategy. `config.algorithm` must not
    /// be `all`; use [`Simulation::run_all_strategies`] for that.
    pub fn new(config: Config) -> Result<Self> {
        let strategies = config.algorithm.strategies();
        let &[strategy] = strategies.as_slice() else {
            return Err(PlannerError::InvalidConfig(
                "a single simulation needs exactly one strategy".to_string(),
            ));
        };
        let environment = EnvironmentSetup::generate(&config)?;
        Ok(Self::new_with_environment(config, environment, strategy))
    }

    pub fn new_with_environment(
        config: Config,
        environment: EnvironmentSetup,
        strategy: Strategy,
    ) -> Self {
        let agent = Agent::at_cell(&environment.grid, environment.start);

        Simulation {
            search: strategy.build(config.parent_policy),
            grid: environment.grid,
            start: environment.start,
            goal: environment.goal,
            agent,
            slot: RouteSlot::new(),
            config,
            strategy,
            optimal_cost: environment.optimal_cost,
        }
    }

    pub fn agent_cell(&self) -> Option<Position> {
        self.agent.cell(&self.grid)
    }

    pub fn route_slot(&self) -> &RouteSlot {
        &self.slot
    }

    /// Runs every strategy over one shared environment.
    pub fn run_all_strategies(config: Config) -> Result<Vec<AlgorithmResult>> {
        let environment = EnvironmentSetup::generate(&config)?;
        let strategies = Strategy::ALL;

        if !config.quiet {
            println!("Running comparison of {} strategies...", strategies.len());
            println!("Environment seed: {} (for reproducibility)", environment.seed);
            println!(
                "Start: {:?}, Goal: {:?}, Optimal cost: {}",
                environment.start, environment.goal, environment.optimal_cost
            );
            println!();
        }

        let mut results = Vec::with_capacity(strategies.len());
        for strategy in strategies {
            let mut strategy_config = config.clone();
            strategy_config.no_visualization = true;

            let mut simulation =
                Simulation::new_with_environment(strategy_config, environment.clone(), strategy);
            let (statistics, timing_data) = simulation.run();

            log::info!(
                "{}: reached goal {}, {} moves",
                strategy,
                statistics.reached_goal,
                statistics.total_moves
            );

            results.push(AlgorithmResult {
                statistics,
                timing_data,
                final_position: simulation.agent_cell(),
            });
        }

        Ok(results)
    }

    pub fn print_comparison_results(results: &[AlgorithmResult]) {
        println!("\n=== STRATEGY COMPARISON RESULTS ===");
        println!();
        println!(
            "{:<14} {:<8} {:<8} {:<10} {:<10} {:<10} {:<10} {:<15} {:<15}",
            "Strategy", "Success", "Moves", "Cost", "Optimal", "Ratio", "Expanded", "Avg Find Path", "Final Position"
        );
        println!("{}", "-".repeat(106));

        for result in results {
            let stats = &result.statistics;
            let success_str = if stats.reached_goal { "✓" } else { "✗" };
            let cost_str = stats
                .route_cost
                .map_or_else(|| "-".to_string(), |cost| cost.to_string());
            let final_pos_str = result
                .final_position
                .map_or_else(|| "-".to_string(), |p| format!("({},{})", p.x, p.y));

            println!(
                "{:<14} {:<8} {:<8} {:<10} {:<10} {:<10.3} {:<10} {:<15} {:<15}",
                stats.strategy.name(),
                success_str,
                stats.total_moves,
                cost_str,
                stats.optimal_cost,
                stats.cost_ratio(),
                stats.nodes_expanded,
                format!("{:.2?}", result.timing_data.average_find_path_time()),
                final_pos_str
            );
        }

        let successful: Vec<_> = results.iter().filter(|r| r.statistics.reached_goal).collect();
        println!();
        if successful.is_empty() {
            println!("No strategy reached the goal.");
            return;
        }

        println!("=== PERFORMANCE ANALYSIS ===");
        if let Some(best) = successful.iter().min_by_key(|r| r.statistics.total_moves) {
            println!(
                "Fewest moves: {} ({} moves)",
                best.statistics.strategy, best.statistics.total_moves
            );
        }
        if let Some(leanest) = successful.iter().min_by_key(|r| r.statistics.nodes_expanded) {
            println!(
                "Fewest expansions: {} ({} nodes)",
                leanest.statistics.strategy, leanest.statistics.nodes_expanded
            );
        }
        if let Some(fastest) = successful
            .iter()
            .min_by_key(|r| r.timing_data.average_find_path_time())
        {
            println!(
                "Fastest find_path: {} ({:.2?} avg)",
                fastest.statistics.strategy,
                fastest.timing_data.average_find_path_time()
            );
        }
    }

    /// Drives the planner once per tick until the agent reaches the goal, gets
    /// stuck, or runs out of ticks.
    pub fn run(&mut self) -> (Statistics, TimingData) {
        let mut stats = Statistics::new(self.strategy, self.optimal_cost);
        let mut timing_data = TimingData::new();
        let mut stuck_attempts = 0;
        let max_ticks = self.config.max_ticks();

        if self.config.visualize() {
            self.draw(0, &stats);
        }

        for tick in 1..=max_ticks {
            let Some(current) = self.agent.cell(&self.grid) else {
                log::warn!("agent left the grid at {:?}", self.agent.position);
                break;
            };
            if current == self.goal {
                break;
            }

            let find_path_start = Instant::now();
            let route = self.search.find_path(&self.grid, current, self.goal);
            timing_data.record(find_path_start.elapsed());
            stats.planning_calls += 1;

            if stats.planning_calls == 1 {
                stats.route_cost = route.as_ref().map(|r| r.cost);
                stats.nodes_expanded = self.search.last_expanded();
            }

            if route.is_some() {
                stuck_attempts = 0;
            } else {
                stats.failed_plans += 1;
                stuck_attempts += 1;
                log::warn!(
                    "{}: no route from {:?} to {:?} (attempt {}/{})",
                    self.strategy,
                    current,
                    self.goal,
                    stuck_attempts,
                    MAX_STUCK_ATTEMPTS
                );
            }

            self.slot.publish(route);
            if self.agent.steer(&self.slot, &self.grid) {
                stats.total_moves += 1;
            }

            if self.config.visualize() {
                self.draw(tick, &stats);
            }

            if stuck_attempts >= MAX_STUCK_ATTEMPTS {
                log::warn!("{}: agent permanently stuck at {:?}", self.strategy, current);
                self.agent.park();
                break;
            }
        }

        stats.reached_goal = self.agent.cell(&self.grid) == Some(self.goal);
        if !stats.reached_goal {
            log::warn!(
                "{}: goal {:?} not reached, agent at {:?}",
                self.strategy,
                self.goal,
                self.agent.cell(&self.grid)
            );
        }

        (stats, timing_data)
    }

    fn draw(&self, tick: usize, stats: &Statistics) {
        self.clear_screen();
        println!("=== ROUTE PLANNING SIMULATION ===");
        println!(
            "Strategy: {} | Tick: {} | Moves: {} | Optimal cost: {}",
            self.strategy, tick, stats.total_moves, self.optimal_cost
        );
        let route = self
            .slot
            .current()
            .map(|r| r.steps.as_slice())
            .unwrap_or_default();
        if let Some(r) = self.slot.current() {
            println!("Route: {} steps, cost {}", r.len(), r.cost);
        }
        self.grid
            .print_grid(self.start, self.goal, self.agent.cell(&self.grid), route);
        thread::sleep(Duration::from_millis(self.config.delay_ms));
    }

    fn clear_screen(&self) {
        print!("\x1B[2J\x1B[1;1H");
    }
}
