use corpus_balance::corpus::CategoryPool;
use corpus_balance::document::{Category, Document, DocumentId, DocumentVersion};
use corpus_balance::selection::{select, CapacitySelector};
use corpus_balance::types::{Candidate, SelectionError};

fn make_doc(category: &str, name: &str, weight: u64) -> Document {
    // Weigh by characters: content of `weight` chars
    let content = "x".repeat(weight as usize);
    Document::ingest(
        DocumentId::new(format!("{category}_{name}.txt")),
        Category::new(category),
        content.into_bytes(),
        &corpus_balance::corpus::CharacterCounter,
    )
    .unwrap()
}

fn ids(selected: &[DocumentId]) -> Vec<&str> {
    selected.iter().map(|id| id.as_str()).collect()
}

#[test]
fn scenario_a_lightest_three_fill_capacity_exactly() {
    let items = vec![
        Candidate::new("a", 50),
        Candidate::new("b", 30),
        Candidate::new("c", 40),
        Candidate::new("d", 10),
    ];

    let result = select(&items, 80).unwrap();

    assert_eq!(ids(&result.selected), vec!["b", "c", "d"]);
    assert_eq!(result.weight_used, 80);
    assert_eq!(result.documents_selected, 3);
    assert_eq!(result.documents_excluded_by_capacity, 1);
}

#[test]
fn scenario_b_single_item_too_heavy() {
    let items = vec![Candidate::new("a", 100)];

    let result = select(&items, 50).unwrap();

    assert!(result.selected.is_empty());
    assert_eq!(result.weight_used, 0);
    assert_eq!(result.documents_considered, 1);
}

#[test]
fn scenario_c_categories_are_solved_independently() {
    let docs = vec![
        make_doc("genre1", "a", 10),
        make_doc("genre1", "b", 10),
        make_doc("genre1", "c", 20),
        make_doc("genre1", "d", 20),
        make_doc("genre1", "e", 40),
        make_doc("genre1", "f", 50),
        make_doc("genre2", "a", 30),
        make_doc("genre2", "b", 30),
        make_doc("genre2", "c", 40),
        make_doc("genre2", "d", 60),
    ];
    let pool = CategoryPool::from_documents(docs);

    let selection = CapacitySelector::new().select_pool(&pool, 100).unwrap();

    assert_eq!(selection.total_selected(), 8);

    let g1 = selection.get("genre1").unwrap();
    assert_eq!(g1.documents.len(), 5);
    assert_eq!(g1.summary.weight_used, 100);
    assert_eq!(g1.summary.total_weight, 150);
    assert!(!g1.ids().contains(&DocumentId::new("genre1_f.txt")));

    let g2 = selection.get("genre2").unwrap();
    assert_eq!(g2.documents.len(), 3);
    assert_eq!(g2.summary.weight_used, 100);
    assert_eq!(g2.summary.headroom, 0);

    for summary in selection.summaries() {
        assert!(summary.weight_used <= summary.capacity);
    }
}

#[test]
fn scenario_d_negative_capacity_is_rejected() {
    let items = vec![Candidate::new("a", 1)];
    assert!(matches!(
        select(&items, -1),
        Err(SelectionError::InvalidCapacity(-1))
    ));

    let pool = CategoryPool::from_documents(vec![make_doc("genre1", "a", 1)]);
    assert!(matches!(
        CapacitySelector::new().select_pool(&pool, -5),
        Err(SelectionError::InvalidCapacity(-5))
    ));
}

#[test]
fn empty_input_selects_nothing() {
    let result = select(&[], 0).unwrap();
    assert!(result.selected.is_empty());

    let result = select(&[], 1_000).unwrap();
    assert!(result.selected.is_empty());
    assert_eq!(result.documents_considered, 0);
}

#[test]
fn zero_capacity_keeps_only_zero_weight_items() {
    let items = vec![
        Candidate::new("empty1", 0),
        Candidate::new("one", 1),
        Candidate::new("empty2", 0),
        Candidate::new("big", 900),
    ];

    let result = select(&items, 0).unwrap();

    assert_eq!(ids(&result.selected), vec!["empty1", "empty2"]);
    assert_eq!(result.weight_used, 0);
}

#[test]
fn zero_weight_items_never_cost_capacity() {
    let items = vec![
        Candidate::new("heavy", 70),
        Candidate::new("blank", 0),
        Candidate::new("mid", 30),
    ];

    let result = select(&items, 30).unwrap();

    assert_eq!(ids(&result.selected), vec!["blank", "mid"]);
}

#[test]
fn duplicate_ids_in_a_category_are_fatal() {
    let docs = vec![make_doc("genre1", "a", 1), make_doc("genre1", "a", 2)];
    let pool = CategoryPool::from_documents(docs);

    let err = CapacitySelector::new().select_pool(&pool, 10).unwrap_err();
    assert!(matches!(err, SelectionError::DuplicateItem(id) if id.as_str() == "genre1_a.txt"));
}

#[test]
fn selected_documents_carry_content_versions() {
    let doc = make_doc("genre1", "a", 3);
    let expected_version = doc.version.clone();
    let pool = CategoryPool::from_documents(vec![doc]);

    let selection = CapacitySelector::new().select_pool(&pool, 3).unwrap();
    let chosen = &selection.get("genre1").unwrap().documents[0];

    assert_eq!(chosen.version, expected_version);
    assert_eq!(chosen.weight, 3);
}

#[test]
fn huge_weights_saturate_category_totals() {
    let heavy = Document {
        id: DocumentId::new("genre1_a.txt"),
        category: Category::new("genre1"),
        version: DocumentVersion::from_content(b"a"),
        weight: u64::MAX,
    };
    let light = make_doc("genre1", "b", 1);
    let pool = CategoryPool::from_documents(vec![heavy, light]);

    let selection = CapacitySelector::new().select_pool(&pool, 10).unwrap();
    let g1 = selection.get("genre1").unwrap();

    assert_eq!(g1.summary.total_weight, u64::MAX);
    assert_eq!(g1.summary.weight_used, 1);
    let b = DocumentId::new("genre1_b.txt");
    assert_eq!(g1.ids().into_iter().collect::<Vec<_>>(), vec![&b]);
    assert_eq!(pool.total_weight(&Category::new("genre1")), u64::MAX);
}
