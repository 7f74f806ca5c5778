//! Scanner -> selector -> materializer, strictly in that order.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, info_span};

use crate::config::{BalanceConfig, ConfigError};
use crate::corpus::{CorpusScanner, ScanError, SkippedItem, WeightMode};
use crate::materialize::{CopyError, ManifestError, MaterializeError, Materializer, RunManifest};
use crate::selection::CapacitySelector;
use crate::types::identifiers::DocumentId;
use crate::types::selection_bundle::{Capacity, CategorySummary, Selection, SelectionError};

#[derive(Debug, Error)]
pub enum BalanceError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Materialize(#[from] MaterializeError),
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

#[derive(Debug)]
pub struct RunReport {
    pub mode: WeightMode,
    pub selection: Selection,
    pub skipped: Vec<SkippedItem>,
    /// `None` for dry runs.
    pub copied: Option<usize>,
    pub copy_failures: Vec<CopyError>,
    pub manifest_path: Option<PathBuf>,
}

/// Serializable view of a [`RunReport`].
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub capacity: u64,
    pub mode: WeightMode,
    pub documents_selected: usize,
    pub copied: Option<usize>,
    pub categories: Vec<CategorySummary>,
    pub skipped: Vec<SkippedItem>,
    pub copy_failures: Vec<CopyFailure>,
    pub manifest_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CopyFailure {
    pub id: DocumentId,
    pub reason: String,
}

impl RunReport {
    /// True when nothing was skipped and every copy succeeded.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.copy_failures.is_empty()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            capacity: self.selection.capacity,
            mode: self.mode,
            documents_selected: self.selection.total_selected(),
            copied: self.copied,
            categories: self.selection.summaries().cloned().collect(),
            skipped: self.skipped.clone(),
            copy_failures: self
                .copy_failures
                .iter()
                .map(|e| CopyFailure {
                    id: e.id.clone(),
                    reason: e.source.to_string(),
                })
                .collect(),
            manifest_path: self.manifest_path.clone(),
        }
    }
}

pub fn run(config: &BalanceConfig) -> Result<RunReport, BalanceError> {
    // Fail fast on anything that is wrong before touching the filesystem
    let options = config.scan_options()?;
    let mode = options.mode;
    Capacity::new(config.capacity)?;

    let scan = {
        let _span = info_span!("scan", source = %config.source_folder.display()).entered();
        CorpusScanner::new(options).scan(&config.source_folder)?
    };

    let selection = {
        let _span = info_span!("select", capacity = config.capacity).entered();
        CapacitySelector::new().select_pool(&scan.pool, config.capacity)?
    };

    for summary in selection.summaries() {
        info!(
            category = %summary.category,
            selected = summary.documents_selected,
            considered = summary.documents_considered,
            weight_used = summary.weight_used,
            headroom = summary.headroom,
            "category summary"
        );
    }

    let (copied, copy_failures) = if config.dry_run {
        info!("dry run: nothing copied");
        (None, Vec::new())
    } else {
        let _span =
            info_span!("materialize", destination = %config.destination_folder.display()).entered();
        let report = Materializer::new(config.on_error).materialize(
            &selection,
            &config.source_folder,
            &config.destination_folder,
        )?;
        (Some(report.copied), report.failures)
    };

    let manifest_path = match &config.report_path {
        Some(path) => {
            RunManifest::build(&selection, config, mode)?.write(path)?;
            info!(path = %path.display(), "run manifest written");
            Some(path.clone())
        }
        None => None,
    };

    Ok(RunReport {
        mode,
        selection,
        skipped: scan.skipped,
        copied,
        copy_failures,
        manifest_path,
    })
}
