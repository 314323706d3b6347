//! Metadata generation
//!
//! Drives the model through the fixed prompt templates and decodes its
//! free-text answers into a folder name, a base filename and a description
//! per file. Decoding is an ordered fallback pipeline: primary parse of the
//! model text, then heuristic keyword extraction from the description, then a
//! fixed default. Each stage is a plain function so it can be tested alone.

use std::fs;
use std::path::{Path, PathBuf};

use crate::ai::client::InferenceClient;
use crate::ai::keywords::{first_words, most_frequent_keyword};
use crate::ai::label::normalize_label;
use crate::ai::prompts;
use crate::error::{OrganizeError, Result};

/// Names the model emits when it has nothing useful to say
const DEGENERATE_FILENAMES: &[&str] = &["untitled", "unknown", "", "describes"];
const DEGENERATE_CATEGORIES: &[&str] = &["untitled", "unknown", ""];

const MAX_COMPONENT_LEN: usize = 64;

/// Which content flow a file went through; decides prompts and defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFlow {
    Image,
    Document,
}

impl ContentFlow {
    fn default_category(self) -> &'static str {
        match self {
            ContentFlow::Image => "images",
            ContentFlow::Document => "documents",
        }
    }

    fn default_name_prefix(self) -> &'static str {
        match self {
            ContentFlow::Image => "image_",
            ContentFlow::Document => "document_",
        }
    }
}

/// Folder name, base filename and description for one file
#[derive(Debug, Clone)]
pub struct GeneratedMetadata {
    pub folder_name: String,
    pub file_name: String,
    pub description: String,
}

/// Generates per-file metadata through an injected inference client
pub struct MetadataGenerator<'a> {
    client: &'a dyn InferenceClient,
}

impl<'a> MetadataGenerator<'a> {
    pub fn new(client: &'a dyn InferenceClient) -> Self {
        Self { client }
    }

    /// Describe an image and derive a filename and category from it
    pub async fn for_image(&self, path: &Path) -> Result<GeneratedMetadata> {
        let bytes = fs::read(path).map_err(|e| OrganizeError::io(path, e))?;
        let description = self
            .client
            .describe_image(prompts::IMAGE_DESCRIPTION_PROMPT, &bytes)
            .await?;

        let raw_name = self
            .client
            .complete(&prompts::build_image_filename_prompt(&description))
            .await?;
        let file_name = resolve_file_name(&raw_name, &description, path, ContentFlow::Image);

        let raw_category = self
            .client
            .complete(&prompts::build_image_category_prompt(&description))
            .await?;
        let folder_name = resolve_category(&raw_category, &description, ContentFlow::Image);

        Ok(GeneratedMetadata {
            folder_name,
            file_name,
            description,
        })
    }

    /// Summarize document content and derive a filename and category from it
    pub async fn for_text(&self, path: &Path, content: &str) -> Result<GeneratedMetadata> {
        let summary = self
            .client
            .complete(&prompts::build_summary_prompt(content))
            .await?;

        let raw_name = self
            .client
            .complete(&prompts::build_text_filename_prompt(&summary))
            .await?;
        let file_name = resolve_file_name(&raw_name, &summary, path, ContentFlow::Document);

        let raw_category = self
            .client
            .complete(&prompts::build_text_category_prompt(&summary))
            .await?;
        let folder_name = resolve_category(&raw_category, &summary, ContentFlow::Document);

        Ok(GeneratedMetadata {
            folder_name,
            file_name,
            description: summary,
        })
    }

    /// One Korean folder label for a group of similar filenames
    ///
    /// Model errors and unusable answers both come back as `None`; the caller
    /// fans the result out to every group member.
    pub async fn classify_group(&self, group: &[PathBuf]) -> Option<String> {
        let names: Vec<String> = group
            .iter()
            .map(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default()
            })
            .collect();

        match self
            .client
            .complete(&prompts::build_group_category_prompt(&names))
            .await
        {
            Ok(raw) => normalize_label(&raw),
            Err(err) => {
                tracing::warn!("group classification failed: {}", err);
                None
            }
        }
    }
}

/// Stage 1: strip the answer marker, markdown leftovers and whitespace
pub fn parse_model_name(raw: &str, marker: &str) -> String {
    let text = raw.trim().replace(marker, "");
    let text: String = text.chars().filter(|c| !matches!(c, '*' | '`' | '\n')).collect();
    text.trim().to_string()
}

/// Filename pipeline: model answer, then first description words, then a
/// default derived from the original file stem
fn resolve_file_name(raw: &str, description: &str, path: &Path, flow: ContentFlow) -> String {
    let mut name = parse_model_name(raw, "Filename:");
    if DEGENERATE_FILENAMES.contains(&name.to_lowercase().as_str()) {
        name = first_words(description, 3).unwrap_or_default();
    }

    let sanitized = sanitize_component(&name);
    if sanitized.is_empty() || sanitized.to_lowercase() == "untitled" {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        return sanitize_component(&format!("{}{}", flow.default_name_prefix(), stem));
    }
    sanitized
}

/// Category pipeline: model answer, then most frequent description keyword,
/// then the flow's fixed default
fn resolve_category(raw: &str, description: &str, flow: ContentFlow) -> String {
    let mut category = parse_model_name(raw, "Category:");
    if DEGENERATE_CATEGORIES.contains(&category.to_lowercase().as_str()) {
        category = most_frequent_keyword(description)
            .unwrap_or_else(|| flow.default_category().to_string());
    }

    let sanitized = sanitize_component(&category);
    if sanitized.is_empty() {
        flow.default_category().to_string()
    } else {
        sanitized
    }
}

/// Filesystem-safe path component: keep letters, digits, `_` and `-`, turn
/// whitespace runs into single underscores, bound the length
pub fn sanitize_component(raw: &str) -> String {
    let filtered: String = raw
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | ' '))
        .collect();

    let mut out = String::new();
    let mut last_was_sep = true;
    for c in filtered.trim().chars() {
        if c == ' ' {
            if !last_was_sep {
                out.push('_');
                last_was_sep = true;
            }
        } else {
            out.push(c);
            last_was_sep = false;
        }
    }

    let trimmed: String = out.trim_matches(['_', '-']).chars().take(MAX_COMPONENT_LEN).collect();
    trimmed
}
