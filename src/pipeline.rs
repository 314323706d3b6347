//! Organize pipeline
//!
//! Orchestrates one run: scan the source collection, classify it through the
//! chosen flow, plan link operations, and execute (or simulate) them. The
//! model boundary is awaited sequentially; everything else is synchronous.

use std::fs;
use std::path::PathBuf;

use crate::ai::{InferenceClient, MetadataGenerator};
use crate::config::{OrganizeConfig, OrganizeMode, UnclassifiedPolicy};
use crate::error::Result;
use crate::execution::{executor, OperationPlanner, PlanningState};
use crate::grouping::group_similar_filenames;
use crate::models::{ExecutionResult, FileRecord};
use crate::report::Reporter;
use crate::scanner::{self, FileKind, ScannedFile};

/// Counters for one pipeline run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub scanned: usize,
    pub planned: usize,
    pub created: usize,
    pub would_create: usize,
    pub failed: usize,
    pub unclassified: usize,
}

/// One organize run over a source directory
pub struct OrganizePipeline<'a> {
    config: &'a OrganizeConfig,
    client: &'a dyn InferenceClient,
    reporter: Reporter,
}

impl<'a> OrganizePipeline<'a> {
    pub fn new(config: &'a OrganizeConfig, client: &'a dyn InferenceClient) -> Self {
        let reporter = Reporter::new(config.silent, config.log_file.clone());
        Self {
            config,
            client,
            reporter,
        }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        self.config.validate()?;

        let files = scanner::scan(&self.config.source)?;
        tracing::info!(
            "scanned {} files under {}",
            files.len(),
            self.config.source.display()
        );

        let records = match self.config.mode {
            OrganizeMode::Content => self.classify_by_content(&files).await,
            OrganizeMode::Filename => self.classify_by_filename(&files).await,
        };

        let planner = OperationPlanner::new(&self.config.destination)
            .with_collision_cap(self.config.collision_cap);
        let mut state = PlanningState::new();
        let outcome = planner.plan(&records, &mut state);

        for (path, err) in &outcome.failures {
            self.reporter
                .emit(&format!("Planning failed for '{}': {}", path.display(), err));
        }
        if self.config.unclassified == UnclassifiedPolicy::Report {
            for path in &outcome.unclassified {
                self.reporter
                    .emit(&format!("Unclassified: {}", path.display()));
            }
        }

        if let Some(path) = &self.config.plan_json {
            match serde_json::to_string_pretty(&outcome.operations) {
                Ok(json) => {
                    if let Err(err) = fs::write(path, json) {
                        tracing::warn!("failed to write plan to {}: {}", path.display(), err);
                    }
                }
                Err(err) => tracing::warn!("failed to encode plan: {}", err),
            }
        }

        let results = executor::execute(&outcome.operations, self.config.dry_run);
        for result in &results {
            self.reporter.emit(&result.message);
        }

        Ok(summarize(
            files.len(),
            outcome.unclassified.len() + outcome.failures.len(),
            &results,
        ))
    }

    /// Content flow: vision description for images, summary for text files.
    /// Files of other kinds, and files the model fails on, become
    /// unclassified records.
    async fn classify_by_content(&self, files: &[ScannedFile]) -> Vec<FileRecord> {
        let generator = MetadataGenerator::new(self.client);
        let mut records = Vec::with_capacity(files.len());

        for file in files {
            let generated = match file.kind {
                FileKind::Image => generator.for_image(&file.path).await.map(Some),
                FileKind::Text => match self.read_preview(&file.path) {
                    Ok(content) => generator.for_text(&file.path, &content).await.map(Some),
                    Err(err) => Err(err),
                },
                FileKind::Other => Ok(None),
            };

            let record = match generated {
                Ok(Some(meta)) => FileRecord {
                    path: file.path.clone(),
                    folder_name: Some(meta.folder_name),
                    file_name: Some(meta.file_name),
                    description: Some(meta.description),
                },
                Ok(None) => FileRecord::unclassified(file.path.clone()),
                Err(err) => {
                    tracing::warn!("classification failed for {}: {}", file.path.display(), err);
                    FileRecord::unclassified(file.path.clone())
                }
            };

            if record.is_classified() {
                self.reporter.metadata(&record);
            }
            records.push(record);
        }

        records
    }

    /// Filename flow: group similar base names, label each group once, fan
    /// the label out. Files keep their original stem as the filename.
    async fn classify_by_filename(&self, files: &[ScannedFile]) -> Vec<FileRecord> {
        let generator = MetadataGenerator::new(self.client);
        let paths: Vec<PathBuf> = files.iter().map(|f| f.path.clone()).collect();
        let groups = group_similar_filenames(&paths, self.config.threshold);

        let mut records = Vec::with_capacity(paths.len());
        for group in groups {
            let label = generator.classify_group(&group).await;
            for path in group {
                self.reporter.group_classification(&path, label.as_deref());
                let file_name = label.is_some().then(|| original_stem(&path));
                records.push(FileRecord {
                    path,
                    folder_name: label.clone(),
                    file_name,
                    description: None,
                });
            }
        }

        records
    }

    fn read_preview(&self, path: &std::path::Path) -> Result<String> {
        let content =
            fs::read_to_string(path).map_err(|e| crate::error::OrganizeError::io(path, e))?;
        let mut preview = content;
        if preview.len() > self.config.text_preview_bytes {
            let mut cut = self.config.text_preview_bytes;
            while !preview.is_char_boundary(cut) {
                cut -= 1;
            }
            preview.truncate(cut);
        }
        Ok(preview)
    }
}

fn original_stem(path: &std::path::Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn summarize(scanned: usize, unclassified: usize, results: &[ExecutionResult]) -> RunSummary {
    use crate::models::ExecutionStatus;

    let mut summary = RunSummary {
        scanned,
        planned: results.len(),
        unclassified,
        ..RunSummary::default()
    };
    for result in results {
        match result.status {
            ExecutionStatus::Created => summary.created += 1,
            ExecutionStatus::WouldCreate => summary.would_create += 1,
            ExecutionStatus::Failed(_) => summary.failed += 1,
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrganizeError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::tempdir;

    struct ScriptedClient {
        replies: Mutex<VecDeque<String>>,
    }

    impl ScriptedClient {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().map(|s| s.to_string()).collect()),
            }
        }
    }

    #[async_trait]
    impl InferenceClient for ScriptedClient {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| OrganizeError::Inference("script exhausted".into()))?;
            if reply == "<ERR>" {
                return Err(OrganizeError::Inference("model unavailable".into()));
            }
            Ok(reply)
        }

        async fn describe_image(&self, _prompt: &str, _image: &[u8]) -> Result<String> {
            self.complete("").await
        }
    }

    fn config(source: &Path, destination: &Path, mode: OrganizeMode) -> OrganizeConfig {
        OrganizeConfig {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            mode,
            dry_run: false,
            silent: true,
            log_file: None,
            plan_json: None,
            threshold: OrganizeConfig::DEFAULT_THRESHOLD,
            collision_cap: crate::execution::DEFAULT_COLLISION_CAP,
            unclassified: UnclassifiedPolicy::Report,
            text_preview_bytes: OrganizeConfig::DEFAULT_TEXT_PREVIEW_BYTES,
        }
    }

    #[tokio::test]
    async fn test_filename_flow_links_groups_under_labels() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("in");
        let destination = dir.path().join("out");
        fs::create_dir(&source).unwrap();
        for name in ["img_1.png", "img_2.png", "report.pdf"] {
            fs::write(source.join(name), b"x").unwrap();
        }

        // one completion per group, in seed order
        let client = ScriptedClient::new(&["여행사진", "보고서"]);
        let config = config(&source, &destination, OrganizeMode::Filename);
        let pipeline = OrganizePipeline::new(&config, &client);

        let summary = pipeline.run().await.unwrap();

        assert_eq!(summary.scanned, 3);
        assert_eq!(summary.created, 3);
        assert_eq!(summary.failed, 0);
        assert!(destination.join("여행사진").join("img_1.png").exists());
        assert!(destination.join("여행사진").join("img_2.png").exists());
        assert!(destination.join("보고서").join("report.pdf").exists());
        // originals are still in place (links, not moves)
        assert!(source.join("img_1.png").exists());
    }

    #[tokio::test]
    async fn test_filename_flow_failed_group_is_unclassified() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("in");
        let destination = dir.path().join("out");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("odd_file.bin"), b"x").unwrap();

        // "기타" is a banned label, so the group ends up unlabeled
        let client = ScriptedClient::new(&["기타"]);
        let config = config(&source, &destination, OrganizeMode::Filename);
        let pipeline = OrganizePipeline::new(&config, &client);

        let summary = pipeline.run().await.unwrap();

        assert_eq!(summary.unclassified, 1);
        assert_eq!(summary.planned, 0);
        assert!(!destination.exists());
    }

    #[tokio::test]
    async fn test_content_flow_dry_run_creates_nothing() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("in");
        let destination = dir.path().join("out");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("notes.txt"), b"meeting notes about budget").unwrap();

        let client = ScriptedClient::new(&[
            "Notes from a budget planning meeting.",
            "Filename: budget_meeting_notes",
            "Category: finance",
        ]);
        let plan_path = dir.path().join("plan.json");
        let mut config = config(&source, &destination, OrganizeMode::Content);
        config.dry_run = true;
        config.plan_json = Some(plan_path.clone());
        let pipeline = OrganizePipeline::new(&config, &client);

        let summary = pipeline.run().await.unwrap();

        assert_eq!(summary.would_create, 1);
        assert_eq!(summary.created, 0);
        // the category directory exists (planning creates it for the device
        // probe) but no link was made
        assert!(destination.join("finance").is_dir());
        assert!(!destination.join("finance").join("budget_meeting_notes.txt").exists());

        // the saved plan reflects the operations that would have run
        let plan: Vec<crate::models::Operation> =
            serde_json::from_str(&fs::read_to_string(&plan_path).unwrap()).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].folder_name, "finance");
        assert_eq!(plan[0].new_file_name, "budget_meeting_notes.txt");
    }

    #[tokio::test]
    async fn test_content_flow_model_failure_is_absorbed() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("in");
        let destination = dir.path().join("out");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("a.txt"), b"text").unwrap();
        fs::write(source.join("b.txt"), b"more text").unwrap();

        // a.txt: summary call fails; b.txt: full happy path
        let client = ScriptedClient::new(&[
            "<ERR>",
            "Summary B.",
            "Filename: beta_notes",
            "Category: notes",
        ]);
        let config = config(&source, &destination, OrganizeMode::Content);
        let pipeline = OrganizePipeline::new(&config, &client);

        let summary = pipeline.run().await.unwrap();

        assert_eq!(summary.unclassified, 1);
        assert_eq!(summary.created, 1);
        assert!(destination.join("notes").join("beta_notes.txt").exists());
    }
}
