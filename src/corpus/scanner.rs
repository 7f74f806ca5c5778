use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::corpus::category::{category_from_file_name, DEFAULT_DELIMITER};
use crate::corpus::pool::CategoryPool;
use crate::corpus::weighting::WeightMode;
use crate::document::Document;
use crate::types::identifiers::DocumentId;
use crate::types::policy::FailurePolicy;

pub const DEFAULT_EXTENSION: &str = "txt";

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Cannot read source directory {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Source is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("No matching documents found under {0}")]
    EmptyCorpus(PathBuf),
    #[error("Cannot read {path}: {reason}")]
    ItemUnreadable { path: PathBuf, reason: String },
}

/// An item left out of the pool because it could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedItem {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    pub mode: WeightMode,
    /// Only files with this extension are scanned; `None` accepts every file.
    pub extension: Option<String>,
    pub delimiter: char,
    pub recursive: bool,
    pub on_unreadable: FailurePolicy,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            mode: WeightMode::default(),
            extension: Some(DEFAULT_EXTENSION.to_string()),
            delimiter: DEFAULT_DELIMITER,
            recursive: false,
            on_unreadable: FailurePolicy::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScanReport {
    pub pool: CategoryPool,
    pub skipped: Vec<SkippedItem>,
}

/// Walks a source directory and weighs every matching file.
pub struct CorpusScanner {
    options: ScanOptions,
}

impl CorpusScanner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    pub fn scan(&self, source: &Path) -> Result<ScanReport, ScanError> {
        let meta = fs::metadata(source).map_err(|e| ScanError::SourceUnreadable {
            path: source.to_path_buf(),
            source: e,
        })?;
        if !meta.is_dir() {
            return Err(ScanError::NotADirectory(source.to_path_buf()));
        }

        let mut skipped = Vec::new();

        // 1. Collect paths (single-threaded walk, sorted by name, links resolved)
        let paths = self.collect_paths(source, &mut skipped)?;
        debug!(source = %source.display(), files = paths.len(), "collected candidate files");

        // 2. Read and weigh in parallel; collect preserves input order
        let outcomes: Vec<Result<Document, SkippedItem>> = paths
            .par_iter()
            .map(|path| self.read_document(source, path))
            .collect();

        let mut documents = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                Ok(doc) => {
                    debug!(id = %doc.id, category = %doc.category, weight = doc.weight, "weighed document");
                    documents.push(doc);
                }
                Err(item) => self.handle_unreadable(item, &mut skipped)?,
            }
        }

        if documents.is_empty() {
            return Err(ScanError::EmptyCorpus(source.to_path_buf()));
        }

        let pool = CategoryPool::from_documents(documents);
        info!(
            source = %source.display(),
            mode = %self.options.mode,
            documents = pool.len(),
            categories = pool.category_count(),
            skipped = skipped.len(),
            "scan complete"
        );

        Ok(ScanReport { pool, skipped })
    }

    fn collect_paths(
        &self,
        source: &Path,
        skipped: &mut Vec<SkippedItem>,
    ) -> Result<Vec<PathBuf>, ScanError> {
        let max_depth = if self.options.recursive { usize::MAX } else { 1 };
        let walker = WalkDir::new(source)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(true)
            .sort_by_file_name();

        let mut paths = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    let path = e.path().unwrap_or(source).to_path_buf();
                    self.handle_unreadable(
                        SkippedItem {
                            path,
                            reason: e.to_string(),
                        },
                        skipped,
                    )?;
                    continue;
                }
            };

            if !entry.file_type().is_file() || !self.matches_extension(entry.path()) {
                continue;
            }
            paths.push(entry.into_path());
        }
        Ok(paths)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        match &self.options.extension {
            None => true,
            Some(ext) => path.extension().and_then(|e| e.to_str()) == Some(ext.as_str()),
        }
    }

    fn read_document(&self, source: &Path, path: &Path) -> Result<Document, SkippedItem> {
        let skip = |reason: String| SkippedItem {
            path: path.to_path_buf(),
            reason,
        };

        let id = DocumentId::from_path(source, path).map_err(|e| skip(e.to_string()))?;
        let category = category_from_file_name(id.file_name(), self.options.delimiter);
        let raw = fs::read(path).map_err(|e| skip(e.to_string()))?;

        Document::ingest(id, category, raw, &self.options.mode)
            .map_err(|e| skip(e.to_string()))
    }

    fn handle_unreadable(
        &self,
        item: SkippedItem,
        skipped: &mut Vec<SkippedItem>,
    ) -> Result<(), ScanError> {
        match self.options.on_unreadable {
            FailurePolicy::Abort => Err(ScanError::ItemUnreadable {
                path: item.path,
                reason: item.reason,
            }),
            FailurePolicy::Skip => {
                warn!(path = %item.path.display(), reason = %item.reason, "skipping unreadable item");
                skipped.push(item);
                Ok(())
            }
        }
    }
}
