//! Planning and execution of link operations
//!
//! ## Modules
//! - `planner` - Collision-free destination allocation and link-type choice
//! - `executor` - Dry-run-capable execution with per-operation isolation

pub mod executor;
pub mod planner;

pub use executor::*;
pub use planner::*;
