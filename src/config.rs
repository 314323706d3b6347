//! Runtime configuration
//!
//! Everything the pipeline needs up front: where to read, where to link,
//! which flow to run, and how to report. Model endpoint settings come from
//! the environment (a `.env` file is honoured) with local defaults.

use std::env;
use std::path::PathBuf;

use crate::error::{OrganizeError, Result};

/// How files get classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OrganizeMode {
    /// Per-file content analysis: image description or text summary
    Content,
    /// Group similar filenames and label each group once
    Filename,
}

/// What to do with records the generator could not classify
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum UnclassifiedPolicy {
    /// Drop them silently
    Skip,
    /// Surface them in the report
    Report,
}

/// Model endpoint settings
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Base URL of the Ollama-compatible endpoint
    pub host: String,
    /// Model for summaries, filenames and categories
    pub text_model: String,
    /// Model for image descriptions
    pub vision_model: String,
}

impl ModelConfig {
    /// Read from `CURATA_HOST`, `CURATA_TEXT_MODEL`, `CURATA_VISION_MODEL`
    pub fn from_env() -> Self {
        Self {
            host: env::var("CURATA_HOST").unwrap_or_else(|_| "http://localhost:11434".to_string()),
            text_model: env::var("CURATA_TEXT_MODEL").unwrap_or_else(|_| "gemma2:2b".to_string()),
            vision_model: env::var("CURATA_VISION_MODEL").unwrap_or_else(|_| "llava".to_string()),
        }
    }
}

/// Full pipeline configuration
#[derive(Debug, Clone)]
pub struct OrganizeConfig {
    /// Directory holding the flat collection to organize
    pub source: PathBuf,
    /// Root under which category folders are created
    pub destination: PathBuf,
    pub mode: OrganizeMode,
    /// Plan and report without touching the filesystem
    pub dry_run: bool,
    /// Route report lines to the log file instead of stdout
    pub silent: bool,
    /// Append-only log file used in silent mode
    pub log_file: Option<PathBuf>,
    /// Write the planned operations as JSON to this path, if set
    pub plan_json: Option<PathBuf>,
    /// Filename similarity threshold for grouping, in [0, 1]
    pub threshold: f64,
    /// Collision-suffix attempts per record before giving up on it
    pub collision_cap: u32,
    pub unclassified: UnclassifiedPolicy,
    /// How much document text to send to the model
    pub text_preview_bytes: usize,
}

impl OrganizeConfig {
    pub const DEFAULT_THRESHOLD: f64 = 0.8;
    pub const DEFAULT_TEXT_PREVIEW_BYTES: usize = 4096;

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(OrganizeError::Config(format!(
                "similarity threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        if self.source == self.destination {
            return Err(OrganizeError::Config(
                "source and destination must differ".to_string(),
            ));
        }
        Ok(())
    }
}
