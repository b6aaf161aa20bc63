use clap::Parser;

use grid_route_planner::config::{AlgorithmChoice, Config};
use grid_route_planner::simulation::Simulation;
use std::io::Write;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let config = Config::parse();
    if let Err(e) = config.validate() {
        log::error!("{}", e);
        std::process::exit(2);
    }

    log::info!("Starting route planning simulation...");
    log::info!("Grid size: {}x{}", config.grid_size, config.grid_size);
    log::info!("Walls: {}, Connectivity: {:?}", config.num_walls, config.connectivity);
    log::info!("Algorithm: {:?}", config.algorithm);
    if config.visualize() {
        log::info!("Visualization enabled with {}ms delay", config.delay_ms);
    }

    if config.algorithm == AlgorithmChoice::All {
        match Simulation::run_all_strategies(config) {
            Ok(results) => Simulation::print_comparison_results(&results),
            Err(e) => {
                log::error!("Error running all strategies: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let mut simulation = match Simulation::new(config) {
        Ok(simulation) => simulation,
        Err(e) => {
            log::error!("Failed to create simulation: {}", e);
            log::error!("Try reducing --num-walls or increasing --grid-size");
            std::process::exit(1);
        }
    };

    let (stats, timing_data) = simulation.run();

    println!("\n=== FINAL RESULTS ===");
    println!("{}", stats);

    println!("=== TIMING ANALYSIS ===");
    println!("Total pathfinding calls: {}", timing_data.total_calls());
    println!(
        "Average find_path time: {:.2?}",
        timing_data.average_find_path_time()
    );
    println!(
        "Total time in find_path: {:.2?}",
        timing_data.total_find_path_time()
    );
}
