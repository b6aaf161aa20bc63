use crate::algorithms::a_star::AStar;
use crate::algorithms::greedy::GreedyBestFirst;
use crate::algorithms::path::Route;
use crate::algorithms::uniform_cost::UniformCost;
use crate::grid::{Grid, Position};
use std::fmt;

pub trait PathSearch {
    fn name(&self) -> &'static str;

    /// Plans a route from `start` to `target`.
    ///
    /// Returns `None` when the target cannot be reached, including when either
    /// endpoint is out of bounds or not traversable.
    fn find_path(&mut self, grid: &Grid, start: Position, target: Position) -> Option<Route>;

    /// Nodes expanded by the most recent `find_path` call.
    fn last_expanded(&self) -> usize {
        0
    }
}

/// How Greedy Best-First treats a neighbour that is already in the open set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ParentPolicy {
    /// Keep the predecessor recorded when the node was first discovered.
    FirstDiscovery,
    /// Re-link the neighbour when the current node reaches it more cheaply.
    #[default]
    CheapestKnown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Greedy,
    UniformCost,
    AStar,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Greedy, Strategy::UniformCost, Strategy::AStar];

    pub fn build(self, policy: ParentPolicy) -> Box<dyn PathSearch> {
        match self {
            Strategy::Greedy => Box::new(GreedyBestFirst::new(policy)),
            Strategy::UniformCost => Box::new(UniformCost::new()),
            Strategy::AStar => Box::new(AStar::new()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Greedy => "greedy",
            Strategy::UniformCost => "uniform_cost",
            Strategy::AStar => "a_star",
        }
    }

    /// Whether the strategy always returns a minimum-cost route.
    pub fn is_optimal(self) -> bool {
        !matches!(self, Strategy::Greedy)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of checking the endpoints before any search work.
pub(crate) enum Endpoints {
    /// Start or target is out of bounds or blocked.
    Invalid,
    /// Start and target coincide; the route is empty.
    AlreadyThere,
    Search,
}

pub(crate) fn check_endpoints(grid: &Grid, start: Position, target: Position) -> Endpoints {
    if !grid.is_traversable(start) || !grid.is_traversable(target) {
        Endpoints::Invalid
    } else if start == target {
        Endpoints::AlreadyThere
    } else {
        Endpoints::Search
    }
}
