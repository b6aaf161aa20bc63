use crate::algorithms::Strategy;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Statistics {
    pub strategy: Strategy,
    pub total_moves: usize,
    pub planning_calls: usize,
    pub failed_plans: usize,
    /// Cost of the first route planned from the start cell.
    pub route_cost: Option<u32>,
    pub optimal_cost: u32,
    /// Nodes expanded by the first plan.
    pub nodes_expanded: usize,
    pub reached_goal: bool,
}

impl Statistics {
    pub fn new(strategy: Strategy, optimal_cost: u32) -> Self {
        Statistics {
            strategy,
            total_moves: 0,
            planning_calls: 0,
            failed_plans: 0,
            route_cost: None,
            optimal_cost,
            nodes_expanded: 0,
            reached_goal: false,
        }
    }

    /// Planned cost over optimal cost; 1.0 means the first plan was optimal.
    pub fn cost_ratio(&self) -> f64 {
        match self.route_cost {
            Some(cost) if self.optimal_cost > 0 => cost as f64 / self.optimal_cost as f64,
            Some(_) => 1.0,
            None => 0.0,
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Strategy: {}", self.strategy)?;
        writeln!(f, "Reached Goal: {}", self.reached_goal)?;
        writeln!(f, "Total Moves: {}", self.total_moves)?;
        writeln!(f, "Planning Calls: {}", self.planning_calls)?;
        writeln!(f, "Failed Plans: {}", self.failed_plans)?;
        match self.route_cost {
            Some(cost) => writeln!(f, "Planned Route Cost: {}", cost)?,
            None => writeln!(f, "Planned Route Cost: none")?,
        }
        writeln!(f, "Optimal Route Cost: {}", self.optimal_cost)?;
        writeln!(f, "Nodes Expanded (first plan): {}", self.nodes_expanded)?;
        writeln!(f, "Cost Ratio: {:.3}", self.cost_ratio())?;

        if self.cost_ratio() > 1.0 {
            writeln!(
                f,
                "Note: first route was {:.1}% above optimal",
                (self.cost_ratio() - 1.0) * 100.0
            )?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TimingData {
    pub find_path_times: Vec<Duration>,
}

impl TimingData {
    pub fn new() -> Self {
        TimingData::default()
    }

    pub fn record(&mut self, duration: Duration) {
        self.find_path_times.push(duration);
    }

    pub fn average_find_path_time(&self) -> Duration {
        if self.find_path_times.is_empty() {
            Duration::from_nanos(0)
        } else {
            self.total_find_path_time() / self.find_path_times.len() as u32
        }
    }

    pub fn total_find_path_time(&self) -> Duration {
        self.find_path_times.iter().sum()
    }

    pub fn total_calls(&self) -> usize {
        self.find_path_times.len()
    }
}
