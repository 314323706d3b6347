//! curata — organizes a flat file collection into categorized folders
//!
//! A generative model infers a folder name and filename per file; curata turns
//! those records into a conflict-free, idempotent, dry-run-capable set of
//! filesystem link operations. Originals are linked into the destination,
//! never moved.
//!
//! ## Modules
//! - `scanner` - Source collection scanning and content-kind detection
//! - `grouping` - Seed-relative filename similarity clustering
//! - `ai` - Model client, prompts, label filtering, metadata generation
//! - `execution` - Operation planning and execution
//! - `pipeline` - One organize run end to end

pub mod ai;
pub mod config;
pub mod error;
pub mod execution;
pub mod grouping;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod scanner;

pub use config::{ModelConfig, OrganizeConfig, OrganizeMode, UnclassifiedPolicy};
pub use error::{OrganizeError, Result};
pub use pipeline::{OrganizePipeline, RunSummary};
