//! User-facing reporting
//!
//! Every outcome (classification result, dry-run notice, created link, error)
//! is reported individually, either to stdout or, in silent mode, appended
//! timestamped to a plaintext log file. Reporting failures never fail the run.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::models::FileRecord;

/// Routes report lines to stdout or an append-only log file
pub struct Reporter {
    silent: bool,
    log_file: Option<PathBuf>,
}

impl Reporter {
    pub fn new(silent: bool, log_file: Option<PathBuf>) -> Self {
        Self { silent, log_file }
    }

    /// Emit one report line (or block)
    pub fn emit(&self, message: &str) {
        if !self.silent {
            println!("{message}");
            return;
        }
        let Some(path) = &self.log_file else {
            // silent with no log file suppresses output entirely
            return;
        };
        let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let appended = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut f| writeln!(f, "[{stamp}] {message}"));
        if let Err(err) = appended {
            tracing::warn!("failed to append to log {}: {}", path.display(), err);
        }
    }

    /// Group-classification event for one file
    pub fn group_classification(&self, path: &Path, label: Option<&str>) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.emit(&format!(
            "[filename-group] {} -> {}",
            name,
            label.unwrap_or("classification failed")
        ));
    }

    /// Per-file metadata block for the content flow
    pub fn metadata(&self, record: &FileRecord) {
        self.emit(&format!(
            "File: {}\nDescription: {}\nFolder name: {}\nGenerated filename: {}\n{}",
            record.path.display(),
            record.description.as_deref().unwrap_or("-"),
            record.folder_name.as_deref().unwrap_or("-"),
            record.file_name.as_deref().unwrap_or("-"),
            "-".repeat(50)
        ));
    }
}
