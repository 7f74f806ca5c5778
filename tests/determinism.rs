use std::fs;
use std::path::Path;

use chrono::{TimeZone, Utc};
use corpus_balance::corpus::{CorpusScanner, ScanOptions, WeightMode};
use corpus_balance::materialize::RunManifest;
use corpus_balance::selection::CapacitySelector;
use corpus_balance::types::Selection;
use corpus_balance::BalanceConfig;
use tempfile::tempdir;

fn write_file(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

/// Many equal weights so that the tie-break decides the outcome.
fn seed_ties(dir: &Path) {
    for name in ["e", "b", "d", "a", "c"] {
        write_file(&dir.join(format!("conte_{name}.txt")), "deux mots");
    }
    for name in ["z", "y", "x"] {
        write_file(&dir.join(format!("fable_{name}.txt")), "trois petits mots");
    }
}

fn select_once(dir: &Path, capacity: i64) -> Selection {
    let scan = CorpusScanner::new(ScanOptions {
        mode: WeightMode::Words,
        ..ScanOptions::default()
    })
    .scan(dir)
    .unwrap();
    CapacitySelector::new()
        .select_pool(&scan.pool, capacity)
        .unwrap()
}

#[test]
fn repeated_runs_serialize_identically() {
    let dir = tempdir().unwrap();
    seed_ties(dir.path());

    let first = select_once(dir.path(), 6);
    let second = select_once(dir.path(), 6);

    let json1 = serde_json::to_string_pretty(&first).unwrap();
    let json2 = serde_json::to_string_pretty(&second).unwrap();
    assert_eq!(json1, json2, "Selection output is not deterministic");
}

#[test]
fn ties_break_on_file_name_order() {
    let dir = tempdir().unwrap();
    seed_ties(dir.path());

    let selection = select_once(dir.path(), 6);

    let conte: Vec<&str> = selection
        .get("conte")
        .unwrap()
        .documents
        .iter()
        .map(|d| d.id.as_str())
        .collect();
    assert_eq!(conte, vec!["conte_a.txt", "conte_b.txt", "conte_c.txt"]);

    let fable: Vec<&str> = selection
        .get("fable")
        .unwrap()
        .documents
        .iter()
        .map(|d| d.id.as_str())
        .collect();
    assert_eq!(fable, vec!["fable_x.txt", "fable_y.txt"]);
}

#[test]
fn identical_corpora_in_different_folders_select_the_same_ids() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();
    seed_ties(dir1.path());
    seed_ties(dir2.path());

    assert_eq!(select_once(dir1.path(), 7), select_once(dir2.path(), 7));
}

#[test]
fn manifest_run_version_is_stable() {
    let dir = tempdir().unwrap();
    seed_ties(dir.path());
    let config = BalanceConfig::new(dir.path(), 6);

    let selection = select_once(dir.path(), 6);
    let mut m1 = RunManifest::build(&selection, &config, WeightMode::Words).unwrap();
    let mut m2 = RunManifest::build(&selection, &config, WeightMode::Words).unwrap();

    assert_eq!(m1.run_version, m2.run_version);

    // created_at is informational; everything else must match byte for byte
    let fixed_time = Utc.timestamp_opt(0, 0).unwrap();
    m1.created_at = fixed_time;
    m2.created_at = fixed_time;
    assert_eq!(
        serde_json::to_string_pretty(&m1).unwrap(),
        serde_json::to_string_pretty(&m2).unwrap()
    );

    let mut other = config.clone();
    other.capacity = 7;
    let m3 = RunManifest::build(&selection, &other, WeightMode::Words).unwrap();
    assert_ne!(m1.run_version, m3.run_version, "config must feed the run version");
}
