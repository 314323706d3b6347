use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Link strategy for a planned operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    /// Second directory entry for the same inode; same-volume files only
    Hardlink,
    /// Path reference; works across volumes and for directories
    Symlink,
}

impl LinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Hardlink => "hardlink",
            LinkType::Symlink => "symlink",
        }
    }
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single planned filesystem link operation
///
/// Immutable once planned. One operation is produced per classified record,
/// and its destination is unique within the planning state's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Original file (never moved or modified)
    pub source: PathBuf,
    /// Fully resolved destination path of the link
    pub destination: PathBuf,
    /// Hardlink or symlink, decided at planning time
    pub link_type: LinkType,
    /// Category folder component of the destination
    pub folder_name: String,
    /// Final filename component, including collision suffix and extension
    pub new_file_name: String,
}

/// Outcome of executing (or simulating) one operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "detail")]
pub enum ExecutionStatus {
    /// Link was created on disk
    Created,
    /// Dry run: nothing was touched
    WouldCreate,
    /// Operation failed; the message describes why
    Failed(String),
}

/// Per-operation execution result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub operation: Operation,
    pub status: ExecutionStatus,
    /// Human-readable line for the reporter
    pub message: String,
}

impl ExecutionResult {
    pub fn succeeded(&self) -> bool {
        !matches!(self.status, ExecutionStatus::Failed(_))
    }
}
