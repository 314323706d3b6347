//! Source directory scanning
//!
//! Collects the flat file collection to organize and splits it by content
//! kind. Kind detection is a MIME guess from the extension; anything that is
//! neither an image nor readable text is carried along as `Other` so the
//! filename-based flow can still classify it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::{OrganizeError, Result};

/// Content kind of a scanned file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Image,
    Text,
    Other,
}

/// One entry of the source collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedFile {
    pub path: PathBuf,
    pub kind: FileKind,
}

impl ScannedFile {
    pub fn from_path(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            kind: detect_kind(path),
        }
    }
}

fn detect_kind(path: &Path) -> FileKind {
    let Some(ext) = path.extension().map(|e| e.to_string_lossy().to_string()) else {
        return FileKind::Other;
    };
    let Some(mime) = mime_guess::from_ext(&ext).first() else {
        return FileKind::Other;
    };
    match mime.type_().as_str() {
        "image" => FileKind::Image,
        "text" => FileKind::Text,
        _ => FileKind::Other,
    }
}

/// Scan the immediate children of `dir`, in name order
///
/// Only regular files are returned; subdirectories and hidden entries
/// (dot-prefixed) are skipped. The collection being flat is an input
/// assumption, not something the scanner enforces deeper down.
pub fn scan(dir: &Path) -> Result<Vec<ScannedFile>> {
    if !dir.is_dir() {
        return Err(OrganizeError::Config(format!(
            "source is not a directory: {}",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
            OrganizeError::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        files.push(ScannedFile::from_path(entry.path()));
    }

    Ok(files)
}
