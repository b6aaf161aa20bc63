use crate::algorithms::{ParentPolicy, Strategy};
use crate::error::{PlannerError, Result};
use crate::grid::Connectivity;
use clap::Parser;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmChoice {
    Greedy,
    UniformCost,
    AStar,
    /// Run every strategy on the same environment and compare.
    All,
}

impl AlgorithmChoice {
    pub fn strategies(self) -> Vec<Strategy> {
        match self {
            AlgorithmChoice::Greedy => vec![Strategy::Greedy],
            AlgorithmChoice::UniformCost => vec![Strategy::UniformCost],
            AlgorithmChoice::AStar => vec![Strategy::AStar],
            AlgorithmChoice::All => Strategy::ALL.to_vec(),
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 20)]
    pub grid_size: usize,

    #[arg(long, default_value_t = 50)]
    pub num_walls: usize,

    #[arg(long, value_enum, default_value_t = AlgorithmChoice::UniformCost)]
    pub algorithm: AlgorithmChoice,

    /// How greedy search re-links neighbours that are already open.
    #[arg(long, value_enum, default_value_t = ParentPolicy::CheapestKnown)]
    pub parent_policy: ParentPolicy,

    #[arg(long, value_enum, default_value_t = Connectivity::Four)]
    pub connectivity: Connectivity,

    /// World-space size of one grid cell.
    #[arg(long, default_value_t = 1.0)]
    pub cell_size: f32,

    /// Seed for the environment; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = 50)]
    pub delay_ms: u64,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    /// Upper bound on simulation ticks; defaults to four times the cell count.
    #[arg(long)]
    pub max_ticks: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grid_size: 20,
            num_walls: 50,
            algorithm: AlgorithmChoice::UniformCost,
            parent_policy: ParentPolicy::CheapestKnown,
            connectivity: Connectivity::Four,
            cell_size: 1.0,
            seed: None,
            delay_ms: 50,
            no_visualization: false,
            quiet: false,
            max_ticks: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.grid_size < 2 {
            return Err(PlannerError::InvalidConfig(format!(
                "grid size must be at least 2, got {}",
                self.grid_size
            )));
        }
        let cells = self.grid_size.checked_mul(self.grid_size).ok_or_else(|| {
            PlannerError::InvalidConfig(format!(
                "grid size {} is too large",
                self.grid_size
            ))
        })?;
        if self.num_walls.saturating_add(2) > cells {
            return Err(PlannerError::InvalidConfig(format!(
                "{} walls do not fit a {}x{} grid",
                self.num_walls, self.grid_size, self.grid_size
            )));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(PlannerError::InvalidConfig(format!(
                "cell size must be positive, got {}",
                self.cell_size
            )));
        }
        if self.max_ticks == Some(0) {
            return Err(PlannerError::InvalidConfig(
                "max ticks must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn max_ticks(&self) -> usize {
        self.max_ticks.unwrap_or_else(|| {
            self.grid_size
                .saturating_mul(self.grid_size)
                .saturating_mul(4)
        })
    }

    pub fn visualize(&self) -> bool {
        !self.no_visualization && !self.quiet
    }
}
