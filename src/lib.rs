//! Grid route planning: greedy best-first, uniform-cost and A* searches over
//! a traversability grid, plus the tick-driven simulation that feeds routes to
//! a moving agent.

pub mod agent;
pub mod algorithms;
pub mod config;
pub mod error;
pub mod grid;
pub mod simulation;
pub mod statistics;

pub use algorithms::{ParentPolicy, PathSearch, Route, Strategy};
pub use error::{PlannerError, Result};
pub use grid::{Cell, Connectivity, Grid, Position, WorldPoint};
