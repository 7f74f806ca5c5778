use std::collections::BTreeSet;

use crate::types::identifiers::DocumentId;
use crate::types::selection_bundle::{Candidate, Capacity, SelectionError};

pub struct CapacityResult {
    /// Selected ids, sorted.
    pub selected: Vec<DocumentId>,
    pub weight_used: u64,
    pub documents_considered: usize,
    pub documents_selected: usize,
    pub documents_excluded_by_capacity: usize,
}

/// Choose the largest subset of `candidates` whose weights fit in `capacity`.
///
/// Fails with [`SelectionError::InvalidCapacity`] for negative capacities and
/// [`SelectionError::DuplicateItem`] when an id appears twice.
pub fn select(candidates: &[Candidate], capacity: i64) -> Result<CapacityResult, SelectionError> {
    let capacity = Capacity::new(capacity)?;
    apply_capacity(candidates, capacity)
}

/// Unit-value knapsack: take the lightest items first until the next one does
/// not fit. Ties keep input order.
pub fn apply_capacity(
    candidates: &[Candidate],
    capacity: Capacity,
) -> Result<CapacityResult, SelectionError> {
    reject_duplicates(candidates)?;

    let budget = capacity.get();

    // Stable sort: equal weights stay in input order
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by_key(|&i| candidates[i].weight);

    debug_assert!(order.windows(2).all(|w| {
        let (a, b) = (&candidates[w[0]], &candidates[w[1]]);
        a.weight < b.weight || (a.weight == b.weight && w[0] < w[1])
    }));

    let mut selected = Vec::new();
    let mut weight_used: u64 = 0;

    for &i in &order {
        let candidate = &candidates[i];
        match weight_used.checked_add(candidate.weight) {
            Some(next) if next <= budget => {
                weight_used = next;
                selected.push(candidate.id.clone());
            }
            // Every later item weighs at least as much.
            _ => break,
        }
    }

    selected.sort();

    let documents_selected = selected.len();
    Ok(CapacityResult {
        selected,
        weight_used,
        documents_considered: candidates.len(),
        documents_selected,
        documents_excluded_by_capacity: candidates.len() - documents_selected,
    })
}

fn reject_duplicates(candidates: &[Candidate]) -> Result<(), SelectionError> {
    let mut seen = BTreeSet::new();
    for candidate in candidates {
        if !seen.insert(&candidate.id) {
            return Err(SelectionError::DuplicateItem(candidate.id.clone()));
        }
    }
    Ok(())
}
