use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::types::identifiers::Category;

/// Scanned documents partitioned by category.
///
/// Documents inside a category are kept sorted by id so that the selector's
/// positional tie-break is reproducible across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryPool {
    inner: BTreeMap<Category, Vec<Document>>,
}

impl CategoryPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group documents by their category.
    pub fn from_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let mut pool = CategoryPool::new();
        for doc in documents {
            pool.insert(doc);
        }
        pool
    }

    /// Insert keeping the category list ordered by id. Duplicate ids are
    /// kept; the selector rejects them.
    pub fn insert(&mut self, document: Document) {
        let docs = self.inner.entry(document.category.clone()).or_default();
        let pos = docs.partition_point(|d| d.id <= document.id);
        docs.insert(pos, document);
    }

    pub fn get(&self, category: &Category) -> Option<&[Document]> {
        self.inner.get(category).map(Vec::as_slice)
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.inner.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, &[Document])> {
        self.inner.iter().map(|(c, docs)| (c, docs.as_slice()))
    }

    /// Total weight of every document in `category` (0 when unknown).
    /// Saturates at `u64::MAX`.
    pub fn total_weight(&self, category: &Category) -> u64 {
        self.inner
            .get(category)
            .map(|docs| docs.iter().map(|d| d.weight).fold(0u64, u64::saturating_add))
            .unwrap_or(0)
    }

    /// Number of documents across all categories.
    pub fn len(&self) -> usize {
        self.inner.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.values().all(Vec::is_empty)
    }

    pub fn category_count(&self) -> usize {
        self.inner.len()
    }
}
