pub mod budgeting;
pub mod validation;

use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;
use tracing::debug;

use crate::corpus::CategoryPool;
use crate::document::Document;
use crate::types::selection_bundle::{
	Candidate, Capacity, CategorySelection, CategorySummary, SelectedDocument, Selection,
	SelectionError,
};
use crate::types::identifiers::Category;
pub use budgeting::{apply_capacity, select, CapacityResult};
pub use validation::{max_feasible_count, verify_selection};

/// Solves the capacity problem independently for every category of a pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct CapacitySelector;

impl CapacitySelector {
	pub fn new() -> Self {
		Self
	}

	pub fn select_pool(
		&self,
		pool: &CategoryPool,
		capacity: i64,
	) -> Result<Selection, SelectionError> {
		// 0. Validate once, before any category is touched
		let capacity = Capacity::new(capacity)?;

		// 1. One task per category; BTreeMap keeps output order independent of scheduling
		let categories: Vec<(&Category, &[Document])> = pool.iter().collect();
		let selected: BTreeMap<Category, CategorySelection> = categories
			.par_iter()
			.map(|(category, docs)| {
				self.select_category(category, docs, capacity)
					.map(|sel| ((*category).clone(), sel))
			})
			.collect::<Result<_, _>>()?;

		Ok(Selection {
			capacity: capacity.get(),
			categories: selected,
		})
	}

	pub fn select_category(
		&self,
		category: &Category,
		docs: &[Document],
		capacity: Capacity,
	) -> Result<CategorySelection, SelectionError> {
		let candidates: Vec<Candidate> = docs.iter().map(Candidate::from).collect();

		// 2. Greedy pass
		let CapacityResult {
			selected,
			weight_used,
			documents_considered,
			documents_selected,
			documents_excluded_by_capacity,
		} = apply_capacity(&candidates, capacity)?;

		// 3. Audit the result before anything is copied
		verify_selection(&candidates, &selected, capacity)?;

		let chosen: BTreeSet<_> = selected.iter().collect();
		let mut documents: Vec<SelectedDocument> = docs
			.iter()
			.filter(|d| chosen.contains(&d.id))
			.map(|d| SelectedDocument {
				id: d.id.clone(),
				version: d.version.clone(),
				weight: d.weight,
			})
			.collect();
		documents.sort_by(|a, b| a.id.cmp(&b.id));

		let total_weight = docs.iter().map(|d| d.weight).fold(0u64, u64::saturating_add);
		let summary = CategorySummary {
			category: category.clone(),
			capacity: capacity.get(),
			total_weight,
			weight_used,
			headroom: capacity.get() - weight_used,
			documents_considered,
			documents_selected,
			documents_excluded_by_capacity,
		};

		debug!(
			category = %category,
			selected = summary.documents_selected,
			considered = summary.documents_considered,
			weight_used,
			"category selected"
		);

		Ok(CategorySelection { documents, summary })
	}
}
