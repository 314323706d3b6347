//! Operation planner
//!
//! Turns classification records into concrete link operations with unique
//! destinations. Collisions against both the current batch and the existing
//! filesystem are resolved with numeric suffixes, and caller-owned
//! [`PlanningState`] guarantees a source is never planned twice across calls.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::OrganizeError;
use crate::models::{FileRecord, LinkType, Operation};

/// Upper bound on collision-suffix attempts per record. A chain this long is a
/// data anomaly, not something to loop through silently.
pub const DEFAULT_COLLISION_CAP: u32 = 10_000;

/// Cross-call planning state, owned by the caller
///
/// `renamed_files` holds every destination allocated during the state's
/// lifetime; `processed_files` holds every source already turned into an
/// operation. The planner mutates it but never resets it, so a fresh state is
/// needed for each independent run. Sequential reuse only; not meant to be
/// shared across threads.
#[derive(Debug, Default)]
pub struct PlanningState {
    pub renamed_files: HashSet<PathBuf>,
    pub processed_files: HashSet<PathBuf>,
}

impl PlanningState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Result of one planning call
#[derive(Debug, Default)]
pub struct PlanOutcome {
    /// Operations with pairwise-distinct destinations
    pub operations: Vec<Operation>,
    /// Sources whose records had no folder/filename pair
    pub unclassified: Vec<PathBuf>,
    /// Per-record planning failures; the rest of the batch is unaffected
    pub failures: Vec<(PathBuf, OrganizeError)>,
}

/// Plans link operations under a destination root
pub struct OperationPlanner {
    destination_root: PathBuf,
    collision_cap: u32,
}

impl OperationPlanner {
    pub fn new(destination_root: impl Into<PathBuf>) -> Self {
        Self {
            destination_root: destination_root.into(),
            collision_cap: DEFAULT_COLLISION_CAP,
        }
    }

    /// Override the collision-suffix cap (tests use small values)
    pub fn with_collision_cap(mut self, cap: u32) -> Self {
        self.collision_cap = cap;
        self
    }

    /// Plan operations for `records` in input order
    ///
    /// Guarantees: destinations are unique within the call and against the
    /// filesystem as observed at planning time, and every source processed
    /// across the lifetime of `state` appears in at most one operation ever.
    /// A failure on one record never stops planning of the others.
    pub fn plan(&self, records: &[FileRecord], state: &mut PlanningState) -> PlanOutcome {
        let mut outcome = PlanOutcome::default();

        for record in records {
            // Idempotence guard: a source already seen in this state's
            // lifetime is skipped before anything else can fail.
            if state.processed_files.contains(&record.path) {
                continue;
            }
            state.processed_files.insert(record.path.clone());

            let (Some(folder_name), Some(file_name)) = (&record.folder_name, &record.file_name)
            else {
                outcome.unclassified.push(record.path.clone());
                continue;
            };

            match self.plan_one(record, folder_name, file_name, state) {
                Ok(operation) => {
                    state.renamed_files.insert(operation.destination.clone());
                    outcome.operations.push(operation);
                }
                Err(err) => {
                    tracing::warn!("planning failed for {}: {}", record.path.display(), err);
                    outcome.failures.push((record.path.clone(), err));
                }
            }
        }

        outcome
    }

    fn plan_one(
        &self,
        record: &FileRecord,
        folder_name: &str,
        file_name: &str,
        state: &PlanningState,
    ) -> Result<Operation, OrganizeError> {
        let ext = extension_suffix(&record.path);
        let dir_path = self.destination_root.join(folder_name);

        // The directory must exist before the device probe below can stat it.
        fs::create_dir_all(&dir_path).map_err(|e| OrganizeError::io(&dir_path, e))?;

        let mut new_file_name = format!("{file_name}{ext}");
        let mut destination = dir_path.join(&new_file_name);
        let mut counter: u32 = 0;
        while state.renamed_files.contains(&destination) || destination.exists() {
            counter += 1;
            if counter > self.collision_cap {
                return Err(OrganizeError::CollisionExhausted {
                    path: record.path.clone(),
                    attempts: self.collision_cap,
                });
            }
            new_file_name = format!("{file_name}_{counter}{ext}");
            destination = dir_path.join(&new_file_name);
        }

        let link_type = choose_link_type(&record.path, &dir_path)?;

        Ok(Operation {
            source: record.path.clone(),
            destination,
            link_type,
            folder_name: folder_name.to_string(),
            new_file_name,
        })
    }
}

/// Directories always get symlinks (hardlinks cannot target them); files get
/// hardlinks when source and destination directory share a device, symlinks
/// otherwise.
fn choose_link_type(source: &Path, dest_dir: &Path) -> Result<LinkType, OrganizeError> {
    if source.is_dir() {
        return Ok(LinkType::Symlink);
    }
    if same_device(source, dest_dir)? {
        Ok(LinkType::Hardlink)
    } else {
        Ok(LinkType::Symlink)
    }
}

#[cfg(unix)]
fn same_device(source: &Path, dest_dir: &Path) -> Result<bool, OrganizeError> {
    use std::os::unix::fs::MetadataExt;
    let source_dev = fs::metadata(source)
        .map_err(|e| OrganizeError::io(source, e))?
        .dev();
    let dest_dev = fs::metadata(dest_dir)
        .map_err(|e| OrganizeError::io(dest_dir, e))?
        .dev();
    Ok(source_dev == dest_dev)
}

#[cfg(not(unix))]
fn same_device(_source: &Path, _dest_dir: &Path) -> Result<bool, OrganizeError> {
    // No portable device id off Unix; assume the common single-volume case.
    Ok(true)
}

/// Extension of `path` including the leading dot, or empty when there is none.
/// Matches splitext semantics: a leading dot alone ("`.bashrc`") is a name,
/// not an extension.
fn extension_suffix(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx..].to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(path: &Path, folder: &str, name: &str) -> FileRecord {
        FileRecord {
            path: path.to_path_buf(),
            folder_name: Some(folder.to_string()),
            file_name: Some(name.to_string()),
            description: None,
        }
    }

    fn touch(path: &Path) {
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_extension_suffix() {
        assert_eq!(extension_suffix(Path::new("/a/photo.PNG")), ".PNG");
        assert_eq!(extension_suffix(Path::new("/a/archive.tar.gz")), ".gz");
        assert_eq!(extension_suffix(Path::new("/a/README")), "");
        assert_eq!(extension_suffix(Path::new("/a/.bashrc")), "");
    }

    #[test]
    fn test_plain_destination_and_hardlink() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("holiday.jpg");
        touch(&source);
        let dest_root = dir.path().join("sorted");

        let planner = OperationPlanner::new(&dest_root);
        let mut state = PlanningState::new();
        let outcome = planner.plan(&[record(&source, "travel", "beach_sunset")], &mut state);

        assert_eq!(outcome.operations.len(), 1);
        let op = &outcome.operations[0];
        assert_eq!(op.destination, dest_root.join("travel").join("beach_sunset.jpg"));
        assert_eq!(op.new_file_name, "beach_sunset.jpg");
        // tempdir and destination share a device
        assert_eq!(op.link_type, LinkType::Hardlink);
        assert!(dest_root.join("travel").is_dir());
    }

    #[test]
    fn test_existing_file_gets_suffixed() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("notes.txt");
        touch(&source);
        let dest_root = dir.path().join("sorted");
        fs::create_dir_all(dest_root.join("docs")).unwrap();
        touch(&dest_root.join("docs").join("foo.txt"));

        let planner = OperationPlanner::new(&dest_root);
        let mut state = PlanningState::new();
        let outcome = planner.plan(&[record(&source, "docs", "foo")], &mut state);

        assert_eq!(outcome.operations.len(), 1);
        assert_eq!(
            outcome.operations[0].destination,
            dest_root.join("docs").join("foo_1.txt")
        );
    }

    #[test]
    fn test_batch_destinations_are_distinct() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        touch(&a);
        touch(&b);
        let dest_root = dir.path().join("sorted");

        let planner = OperationPlanner::new(&dest_root);
        let mut state = PlanningState::new();
        let outcome = planner.plan(
            &[record(&a, "docs", "summary"), record(&b, "docs", "summary")],
            &mut state,
        );

        assert_eq!(outcome.operations.len(), 2);
        assert_ne!(outcome.operations[0].destination, outcome.operations[1].destination);
        assert_eq!(outcome.operations[1].new_file_name, "summary_1.txt");
    }

    #[test]
    fn test_processed_sources_never_replan() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("a.txt");
        touch(&source);
        let dest_root = dir.path().join("sorted");

        let planner = OperationPlanner::new(&dest_root);
        let mut state = PlanningState::new();
        let first = planner.plan(&[record(&source, "docs", "summary")], &mut state);
        let second = planner.plan(&[record(&source, "docs", "summary")], &mut state);

        assert_eq!(first.operations.len(), 1);
        assert!(second.operations.is_empty());
        assert!(second.unclassified.is_empty());
        assert!(second.failures.is_empty());
    }

    #[test]
    fn test_unclassified_records_are_surfaced() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("odd.bin");
        touch(&source);

        let planner = OperationPlanner::new(dir.path().join("sorted"));
        let mut state = PlanningState::new();
        let outcome = planner.plan(&[FileRecord::unclassified(source.clone())], &mut state);

        assert!(outcome.operations.is_empty());
        assert_eq!(outcome.unclassified, vec![source]);
    }

    #[test]
    fn test_directory_source_gets_symlink() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("bundle");
        fs::create_dir(&source).unwrap();
        let dest_root = dir.path().join("sorted");

        let planner = OperationPlanner::new(&dest_root);
        let mut state = PlanningState::new();
        let outcome = planner.plan(&[record(&source, "archives", "bundle")], &mut state);

        assert_eq!(outcome.operations.len(), 1);
        assert_eq!(outcome.operations[0].link_type, LinkType::Symlink);
    }

    #[test]
    fn test_collision_cap_fails_only_that_record() {
        let dir = tempdir().unwrap();
        let jammed = dir.path().join("jammed.txt");
        let fine = dir.path().join("fine.txt");
        touch(&jammed);
        touch(&fine);
        let dest_root = dir.path().join("sorted");

        let planner = OperationPlanner::new(&dest_root).with_collision_cap(3);
        let mut state = PlanningState::new();
        let docs = dest_root.join("docs");
        state.renamed_files.insert(docs.join("foo.txt"));
        for n in 1..=3 {
            state.renamed_files.insert(docs.join(format!("foo_{n}.txt")));
        }

        let outcome = planner.plan(
            &[record(&jammed, "docs", "foo"), record(&fine, "docs", "bar")],
            &mut state,
        );

        assert_eq!(outcome.failures.len(), 1);
        assert!(matches!(
            outcome.failures[0].1,
            OrganizeError::CollisionExhausted { attempts: 3, .. }
        ));
        // the rest of the batch still plans
        assert_eq!(outcome.operations.len(), 1);
        assert_eq!(outcome.operations[0].source, fine);
    }
}
