//! Error types for the route planner.
//!
//! A search that finds no route is not an error: strategies return `None`.

use thiserror::Error;

use crate::grid::Position;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("grid layout error at row {row}, column {column}: {reason}")]
    GridParse {
        row: usize,
        column: usize,
        reason: String,
    },

    #[error("no traversable route from {start:?} to {goal:?} after {attempts} layouts")]
    Unreachable {
        start: Position,
        goal: Position,
        attempts: usize,
    },
}

pub type Result<T> = std::result::Result<T, PlannerError>;
