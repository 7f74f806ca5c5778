use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::types::identifiers::DocumentId;
use crate::types::policy::FailurePolicy;
use crate::types::selection_bundle::Selection;

#[derive(Debug, Error)]
#[error("Failed to copy {id}: {source}")]
pub struct CopyError {
    pub id: DocumentId,
    #[source]
    pub source: io::Error,
}

#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("Cannot create destination {path}: {source}")]
    Destination {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Destination is the source directory: {0}")]
    DestinationIsSource(PathBuf),
    #[error(transparent)]
    Copy(#[from] CopyError),
}

#[derive(Debug)]
pub struct MaterializeReport {
    pub copied: usize,
    pub failures: Vec<CopyError>,
}

impl MaterializeReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Copies selected documents out of the corpus, keeping their names.
///
/// Single-threaded: failures are reported in selection order.
pub struct Materializer {
    policy: FailurePolicy,
}

impl Materializer {
    pub fn new(policy: FailurePolicy) -> Self {
        Self { policy }
    }

    pub fn materialize(
        &self,
        selection: &Selection,
        source: &Path,
        destination: &Path,
    ) -> Result<MaterializeReport, MaterializeError> {
        fs::create_dir_all(destination).map_err(|e| MaterializeError::Destination {
            path: destination.to_path_buf(),
            source: e,
        })?;

        // Copying a file onto itself truncates it
        if same_directory(source, destination) {
            return Err(MaterializeError::DestinationIsSource(destination.to_path_buf()));
        }

        let mut copied = 0;
        let mut failures = Vec::new();

        for (category, doc) in selection.iter_documents() {
            match copy_one(&doc.id, source, destination) {
                Ok(bytes) => {
                    debug!(id = %doc.id, category = %category, bytes, "copied document");
                    copied += 1;
                }
                Err(err) => match self.policy {
                    FailurePolicy::Abort => return Err(err.into()),
                    FailurePolicy::Skip => {
                        warn!(id = %err.id, error = %err.source, "copy failed");
                        failures.push(err);
                    }
                },
            }
        }

        info!(
            destination = %destination.display(),
            copied,
            failed = failures.len(),
            "materialization complete"
        );

        Ok(MaterializeReport {
            copied,
            failures,
        })
    }
}

fn copy_one(id: &DocumentId, source: &Path, destination: &Path) -> Result<u64, CopyError> {
    let wrap = |e: io::Error| CopyError {
        id: id.clone(),
        source: e,
    };

    let from = source.join(id.as_str());
    let to = destination.join(id.as_str());
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    fs::copy(&from, &to).map_err(wrap)
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
