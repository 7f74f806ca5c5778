use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::BalanceConfig;
use crate::corpus::WeightMode;
use crate::types::identifiers::{Category, DocumentId, DocumentVersion};
use crate::types::selection_bundle::{CategorySummary, Selection};

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Manifest path has no file name: {0}")]
    InvalidPath(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ManifestDocumentEntry {
    pub id: DocumentId,
    pub category: Category,
    pub version: DocumentVersion,
    pub weight: u64,
}

/// Audit record of one run. Never written into the destination folder.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RunManifest {
    pub run_version: String,
    pub config: BalanceConfig,
    pub created_at: DateTime<Utc>, // informational only
    pub capacity: u64,
    pub mode: WeightMode,
    pub document_count: usize,
    pub categories: Vec<CategorySummary>,
    pub documents: Vec<ManifestDocumentEntry>,
}

impl RunManifest {
    pub fn build(
        selection: &Selection,
        config: &BalanceConfig,
        mode: WeightMode,
    ) -> Result<Self, ManifestError> {
        // iter_documents walks categories then ids, both sorted
        let documents: Vec<ManifestDocumentEntry> = selection
            .iter_documents()
            .map(|(category, doc)| ManifestDocumentEntry {
                id: doc.id.clone(),
                category: category.clone(),
                version: doc.version.clone(),
                weight: doc.weight,
            })
            .collect();

        // run_version := sha256(config_json + sorted("category:id:version"))
        let mut hasher = Sha256::new();
        hasher.update(serde_json::to_vec(config)?);
        for entry in &documents {
            let line = format!(
                "{}:{}:{}",
                entry.category.as_str(),
                entry.id.as_str(),
                entry.version.as_str()
            );
            hasher.update(line.as_bytes());
        }
        let run_version = format!("sha256:{}", hex::encode(hasher.finalize()));

        Ok(RunManifest {
            run_version,
            config: config.clone(),
            created_at: Utc::now(),
            capacity: selection.capacity,
            mode,
            document_count: documents.len(),
            categories: selection.summaries().cloned().collect(),
            documents,
        })
    }

    /// Write pretty JSON through a sibling temp file and an atomic rename.
    pub fn write(&self, path: &Path) -> Result<(), ManifestError> {
        let file_name = path
            .file_name()
            .ok_or_else(|| ManifestError::InvalidPath(path.to_path_buf()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut temp_name = file_name.to_os_string();
        let suffix = self.run_version.get(7..19).unwrap_or("partial");
        temp_name.push(format!(".tmp.{suffix}"));
        let temp_path = path.with_file_name(temp_name);

        let f = fs::File::create(&temp_path)?;
        serde_json::to_writer_pretty(&f, self)?;
        f.sync_all()?;

        fs::rename(&temp_path, path)?;
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self, ManifestError> {
        let f = fs::File::open(path)?;
        Ok(serde_json::from_reader(f)?)
    }
}
