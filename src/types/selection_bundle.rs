use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::types::identifiers::{Category, DocumentId, DocumentVersion};

/// Per-category budget, validated to be non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capacity(u64);

impl Capacity {
    /// Validate a configured capacity. Negative budgets are rejected.
    pub fn new(value: i64) -> Result<Self, SelectionError> {
        u64::try_from(value)
            .map(Capacity)
            .map_err(|_| SelectionError::InvalidCapacity(value))
    }

    pub const fn from_u64(value: u64) -> Self {
        Capacity(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Internal: an item reduced to what the selector needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: DocumentId,
    pub weight: u64,
}

impl Candidate {
    pub fn new(id: impl Into<String>, weight: u64) -> Self {
        Self {
            id: DocumentId::new(id),
            weight,
        }
    }
}

/// A document chosen for materialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedDocument {
    pub id: DocumentId,
    pub version: DocumentVersion,
    pub weight: u64,
}

/// Metadata describing the outcome of one category's selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    pub capacity: u64,

    pub total_weight: u64,
    pub weight_used: u64,
    pub headroom: u64,

    pub documents_considered: usize,
    pub documents_selected: usize,
    pub documents_excluded_by_capacity: usize,
}

/// Selected documents of one category, sorted by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySelection {
    pub documents: Vec<SelectedDocument>,
    pub summary: CategorySummary,
}

impl CategorySelection {
    pub fn ids(&self) -> BTreeSet<&DocumentId> {
        self.documents.iter().map(|d| &d.id).collect()
    }
}

/// The final result of a selection run across every category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub capacity: u64,
    pub categories: BTreeMap<Category, CategorySelection>,
}

impl Selection {
    pub fn get(&self, category: &str) -> Option<&CategorySelection> {
        self.categories.get(&Category::new(category))
    }

    pub fn total_selected(&self) -> usize {
        self.categories.values().map(|c| c.documents.len()).sum()
    }

    pub fn summaries(&self) -> impl Iterator<Item = &CategorySummary> {
        self.categories.values().map(|c| &c.summary)
    }

    pub fn iter_documents(&self) -> impl Iterator<Item = (&Category, &SelectedDocument)> {
        self.categories
            .iter()
            .flat_map(|(category, sel)| sel.documents.iter().map(move |d| (category, d)))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("Invalid capacity: {0} (must be >= 0)")]
    InvalidCapacity(i64),

    #[error("Duplicate item in category input: {0}")]
    DuplicateItem(DocumentId),

    #[error("Selected item {0} is not part of the candidate list")]
    UnknownItem(DocumentId),

    #[error("Selection uses {weight_used} which exceeds capacity {capacity}")]
    Infeasible { weight_used: u64, capacity: u64 },

    #[error("Selection holds {selected} items but {achievable} fit within capacity")]
    NotOptimal { selected: usize, achievable: usize },
}
