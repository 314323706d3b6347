//! Operation executor
//!
//! Performs (or simulates) planned link operations. Each operation is executed
//! independently: one failure is reported in that operation's result and never
//! aborts the rest of the batch. Already-created links are not rolled back.

use std::fs;
use std::path::Path;

use crate::models::{ExecutionResult, ExecutionStatus, LinkType, Operation};

/// Execute every operation, returning one result per operation in order
///
/// With `dry_run` set, nothing on the filesystem is touched; each result is a
/// "would create" notice instead.
pub fn execute(operations: &[Operation], dry_run: bool) -> Vec<ExecutionResult> {
    operations
        .iter()
        .map(|operation| execute_one(operation, dry_run))
        .collect()
}

fn execute_one(operation: &Operation, dry_run: bool) -> ExecutionResult {
    let link = operation.link_type;
    let source = operation.source.display();
    let destination = operation.destination.display();

    if dry_run {
        return ExecutionResult {
            operation: operation.clone(),
            status: ExecutionStatus::WouldCreate,
            message: format!("Dry run: would create {link} from '{source}' to '{destination}'"),
        };
    }

    match create_link(operation) {
        Ok(()) => ExecutionResult {
            operation: operation.clone(),
            status: ExecutionStatus::Created,
            message: format!("Created {link} from '{source}' to '{destination}'"),
        },
        Err(err) => {
            tracing::warn!("link creation failed for {}: {}", source, err);
            ExecutionResult {
                operation: operation.clone(),
                status: ExecutionStatus::Failed(err.to_string()),
                message: format!("Error creating {link} from '{source}' to '{destination}': {err}"),
            }
        }
    }
}

fn create_link(operation: &Operation) -> std::io::Result<()> {
    // The planner created this directory, but an operation must also stand
    // alone (e.g. replayed from a saved plan).
    if let Some(parent) = operation.destination.parent() {
        fs::create_dir_all(parent)?;
    }

    match operation.link_type {
        LinkType::Hardlink => fs::hard_link(&operation.source, &operation.destination),
        LinkType::Symlink => symlink(&operation.source, &operation.destination),
    }
}

#[cfg(unix)]
fn symlink(source: &Path, destination: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(source, destination)
}

#[cfg(windows)]
fn symlink(source: &Path, destination: &Path) -> std::io::Result<()> {
    if source.is_dir() {
        std::os::windows::fs::symlink_dir(source, destination)
    } else {
        std::os::windows::fs::symlink_file(source, destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn operation(source: PathBuf, destination: PathBuf, link_type: LinkType) -> Operation {
        let folder_name = destination
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let new_file_name = destination
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Operation {
            source,
            destination,
            link_type,
            folder_name,
            new_file_name,
        }
    }

    #[test]
    fn test_creates_hardlink_and_symlink() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("a.txt");
        fs::write(&source, b"content").unwrap();

        let hard_dest = dir.path().join("sorted/docs/a.txt");
        let sym_dest = dir.path().join("sorted/docs/a_link.txt");
        let results = execute(
            &[
                operation(source.clone(), hard_dest.clone(), LinkType::Hardlink),
                operation(source.clone(), sym_dest.clone(), LinkType::Symlink),
            ],
            false,
        );

        assert!(results.iter().all(|r| r.succeeded()));
        assert_eq!(fs::read(&hard_dest).unwrap(), b"content");
        assert!(sym_dest.symlink_metadata().unwrap().file_type().is_symlink());
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("a.txt");
        fs::write(&source, b"x").unwrap();
        let dest = dir.path().join("sorted/docs/a.txt");

        let results = execute(&[operation(source, dest.clone(), LinkType::Hardlink)], true);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, ExecutionStatus::WouldCreate);
        assert!(results[0].message.starts_with("Dry run: would create hardlink"));
        assert!(!dest.exists());
        // not even the destination directory is created
        assert!(!dir.path().join("sorted").exists());
    }

    #[test]
    fn test_one_failure_does_not_stop_the_batch() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("vanished.txt");
        let present = dir.path().join("here.txt");
        fs::write(&present, b"x").unwrap();

        let results = execute(
            &[
                operation(missing, dir.path().join("sorted/a.txt"), LinkType::Hardlink),
                operation(present, dir.path().join("sorted/b.txt"), LinkType::Hardlink),
            ],
            false,
        );

        assert_eq!(results.len(), 2);
        assert!(matches!(results[0].status, ExecutionStatus::Failed(_)));
        assert!(results[0].message.starts_with("Error creating hardlink"));
        assert!(results[1].succeeded());
        assert!(dir.path().join("sorted/b.txt").exists());
    }

    #[test]
    fn test_existing_destination_is_a_per_operation_error() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("a.txt");
        fs::write(&source, b"x").unwrap();
        let dest = dir.path().join("sorted/a.txt");
        fs::create_dir_all(dest.parent().unwrap()).unwrap();
        fs::write(&dest, b"already here").unwrap();

        let results = execute(&[operation(source, dest.clone(), LinkType::Hardlink)], false);

        assert!(matches!(results[0].status, ExecutionStatus::Failed(_)));
        // the pre-existing file is untouched
        assert_eq!(fs::read(&dest).unwrap(), b"already here");
    }
}
