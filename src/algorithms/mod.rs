//! Path-search core: the cost ledger, frontier structures, the distance
//! metric, the search strategies and the route builder.

pub mod a_star;
pub mod common;
pub mod distance;
pub mod frontier;
pub mod greedy;
pub mod ledger;
pub mod path;
pub mod uniform_cost;

pub use common::{ParentPolicy, PathSearch, Strategy};
pub use distance::{distance, STEP_COST};
pub use path::Route;
