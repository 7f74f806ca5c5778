use std::collections::{BTreeMap, BTreeSet};

use crate::types::identifiers::DocumentId;
use crate::types::selection_bundle::{Candidate, Capacity, SelectionError};

/// Largest number of items from `weights` whose sum stays within `capacity`.
pub fn max_feasible_count(weights: impl IntoIterator<Item = u64>, capacity: Capacity) -> usize {
    let mut sorted: Vec<u64> = weights.into_iter().collect();
    sorted.sort_unstable();

    let mut used: u64 = 0;
    let mut count = 0;
    for w in sorted {
        match used.checked_add(w) {
            Some(next) if next <= capacity.get() => {
                used = next;
                count += 1;
            }
            _ => break,
        }
    }
    count
}

/// Check that `selected` is a feasible, maximum-cardinality subset of `candidates`.
pub fn verify_selection(
    candidates: &[Candidate],
    selected: &[DocumentId],
    capacity: Capacity,
) -> Result<(), SelectionError> {
    let weights: BTreeMap<&DocumentId, u64> =
        candidates.iter().map(|c| (&c.id, c.weight)).collect();

    let mut seen = BTreeSet::new();
    let mut weight_used: u64 = 0;
    for id in selected {
        let weight = *weights
            .get(id)
            .ok_or_else(|| SelectionError::UnknownItem(id.clone()))?;
        if !seen.insert(id) {
            return Err(SelectionError::DuplicateItem(id.clone()));
        }
        weight_used = weight_used.saturating_add(weight);
    }

    if weight_used > capacity.get() {
        return Err(SelectionError::Infeasible {
            weight_used,
            capacity: capacity.get(),
        });
    }

    let achievable = max_feasible_count(candidates.iter().map(|c| c.weight), capacity);
    if selected.len() < achievable {
        return Err(SelectionError::NotOptimal {
            selected: selected.len(),
            achievable,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<Candidate> {
        vec![
            Candidate::new("a", 50),
            Candidate::new("b", 30),
            Candidate::new("c", 40),
            Candidate::new("d", 10),
        ]
    }

    fn ids(list: &[&str]) -> Vec<DocumentId> {
        list.iter().map(|s| DocumentId::new(*s)).collect()
    }

    #[test]
    fn accepts_optimal_selection() {
        let cap = Capacity::from_u64(80);
        verify_selection(&candidates(), &ids(&["b", "c", "d"]), cap).unwrap();
    }

    #[test]
    fn rejects_over_capacity() {
        let cap = Capacity::from_u64(80);
        let err = verify_selection(&candidates(), &ids(&["a", "c"]), cap).unwrap_err();
        assert!(matches!(err, SelectionError::Infeasible { weight_used: 90, capacity: 80 }));
    }

    #[test]
    fn rejects_suboptimal_selection() {
        let cap = Capacity::from_u64(80);
        let err = verify_selection(&candidates(), &ids(&["a", "b"]), cap).unwrap_err();
        assert!(matches!(err, SelectionError::NotOptimal { selected: 2, achievable: 3 }));
    }

    #[test]
    fn rejects_unknown_ids() {
        let cap = Capacity::from_u64(80);
        let err = verify_selection(&candidates(), &ids(&["x"]), cap).unwrap_err();
        assert!(matches!(err, SelectionError::UnknownItem(_)));
    }

    #[test]
    fn max_count_with_zero_capacity_counts_zero_weights() {
        assert_eq!(max_feasible_count([0, 0, 1, 5], Capacity::from_u64(0)), 2);
        assert_eq!(max_feasible_count(Vec::<u64>::new(), Capacity::from_u64(10)), 0);
    }
}
