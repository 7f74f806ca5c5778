use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::corpus::weighting::WeightCounter;
use crate::types::identifiers::{Category, DocumentId, DocumentVersion};
use crate::types::selection_bundle::Candidate;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Content must be valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// The atomic unit of the corpus.
///
/// Content is not retained: only the weight and the content hash survive
/// the scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub category: Category,
    pub version: DocumentVersion,
    pub weight: u64,
}

impl Document {
    /// Ingest raw bytes into a Document.
    ///
    /// Validates UTF-8, hashes the content and weighs it with `counter`.
    pub fn ingest<C>(
        id: DocumentId,
        category: Category,
        raw_content: Vec<u8>,
        counter: &C,
    ) -> Result<Self, DocumentError>
    where
        C: WeightCounter + ?Sized,
    {
        let content = String::from_utf8(raw_content)?;

        let version = DocumentVersion::from_content(content.as_bytes());
        let weight = counter.weigh(&content);

        Ok(Document {
            id,
            category,
            version,
            weight,
        })
    }
}

impl From<&Document> for Candidate {
    fn from(doc: &Document) -> Self {
        Candidate {
            id: doc.id.clone(),
            weight: doc.weight,
        }
    }
}
