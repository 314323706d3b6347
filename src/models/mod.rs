//! Shared data model for the organize pipeline
//!
//! ## Modules
//! - `record` - Per-file classification records produced by the generator
//! - `operation` - Planned link operations and their execution results

pub mod operation;
pub mod record;

pub use operation::*;
pub use record::*;
