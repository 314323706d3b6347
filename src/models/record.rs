use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Classification record for a single source file
///
/// Produced once per file by the metadata generator and consumed exactly once
/// by the planner. `folder_name`/`file_name` are `None` when generation failed
/// for that file; downstream consumers treat such records as unclassified.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Absolute path of the original file
    pub path: PathBuf,
    /// Inferred category folder, None on classification failure
    pub folder_name: Option<String>,
    /// Inferred base filename (no extension), None on classification failure
    pub file_name: Option<String>,
    /// Human-readable description or summary the names were derived from
    pub description: Option<String>,
}

impl FileRecord {
    /// Record for a file the generator could not classify
    pub fn unclassified(path: PathBuf) -> Self {
        Self {
            path,
            folder_name: None,
            file_name: None,
            description: None,
        }
    }

    /// Whether this record carries the folder/filename pair the planner needs
    pub fn is_classified(&self) -> bool {
        self.folder_name.is_some() && self.file_name.is_some()
    }
}

/// Ordered list of paths whose base filenames matched a common seed
///
/// Groups returned by the similarity grouper are pairwise disjoint and cover
/// the full input set; the seed is always the first element.
pub type SimilarityGroup = Vec<PathBuf>;
