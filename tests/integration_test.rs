use std::fs;
use std::path::PathBuf;

use filestat::config::Config;
use filestat::record;
use filestat::snapshot::{Delta, FileStats, Snapshot};
use filestat::store::delta::DeltaAggregator;
use filestat::store::sqlite::SqliteStore;
use filestat::store::{HistoryKey, SnapshotStore};

fn config_for(db: PathBuf) -> Config {
    Config {
        db_path: Some(db),
        extensions: vec!["java".to_string()],
        json_output: false,
        verbose: false,
    }
}

#[test]
fn history_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("history.db");
    let key = HistoryKey::new("proj", "Main.java").unwrap();

    {
        let mut store = SqliteStore::open(&db).unwrap();
        record::record_file(&mut store, "proj", "Main.java", FileStats::new(10, 200, 2), 1).unwrap();
    }

    let mut store = SqliteStore::open(&db).unwrap();
    let second = record::record_file(&mut store, "proj", "Main.java", FileStats::new(15, 260, 3), 2).unwrap();
    assert_eq!(
        second.delta,
        Some(Delta {
            new_lines: 5,
            new_file_length: 60,
            new_methods: 1,
        })
    );
    assert_eq!(store.lookup_history(&key).unwrap().len(), 2);
}

#[test]
fn aggregator_uses_latest_of_three_persisted_snapshots() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let key = HistoryKey::new("proj", "a.txt").unwrap();
    for lines in [20, 15] {
        store
            .append(&key, &Snapshot::new(FileStats::new(lines, lines * 10, 1), 0))
            .unwrap();
    }

    let aggregator = DeltaAggregator::load(&store, "proj", "a.txt").unwrap();
    let enriched = aggregator.enrich_with_delta(Snapshot::new(FileStats::new(10, 100, 1), 0));
    assert_eq!(enriched.delta.unwrap().new_lines, -5);
}

#[test]
fn recording_a_directory_twice_reports_growth() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    fs::create_dir_all(&src).unwrap();
    let file = src.join("Main.java");

    fs::write(&file, "class Main {\n    void a() {\n    }\n}\n").unwrap();

    let config = config_for(dir.path().join("filestat.db"));
    let mut store = SqliteStore::open(&config.database().unwrap()).unwrap();

    let first = record::run(&mut store, "proj", dir.path(), &[src.clone()], &config).unwrap();
    assert_eq!(first.recorded.len(), 1);
    assert_eq!(first.recorded[0].file, "src/Main.java");
    assert!(first.recorded[0].snapshot.delta.is_none());

    fs::write(
        &file,
        "class Main {\n    void a() {\n    }\n\n    void b() {\n    }\n}\n",
    )
    .unwrap();

    let second = record::run(&mut store, "proj", dir.path(), &[src], &config).unwrap();
    let delta = second.recorded[0].snapshot.delta.unwrap();
    assert_eq!(delta.new_lines, 3);
    assert_eq!(delta.new_methods, 1);
    assert!(delta.new_file_length > 0);
}

#[test]
fn unchanged_file_records_zero_delta() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("Same.java");
    fs::write(&file, "class Same {}\n").unwrap();

    let config = config_for(dir.path().join("filestat.db"));
    let mut store = SqliteStore::open_in_memory().unwrap();

    record::run(&mut store, "proj", dir.path(), &[file.clone()], &config).unwrap();
    let second = record::run(&mut store, "proj", dir.path(), &[file], &config).unwrap();

    assert!(second.recorded[0].snapshot.delta.unwrap().is_unchanged());
}

#[test]
fn projects_do_not_share_history() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    record::record_file(&mut store, "a", "f.rs", FileStats::new(100, 100, 10), 0).unwrap();

    let other = record::record_file(&mut store, "b", "f.rs", FileStats::new(1, 1, 1), 0).unwrap();
    assert!(other.delta.is_none());
    assert_eq!(store.projects().unwrap(), vec!["a", "b"]);
}

#[test]
fn same_file_name_in_two_directories_keeps_separate_histories() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    fs::create_dir_all(&a).unwrap();
    fs::create_dir_all(&b).unwrap();
    fs::write(a.join("Lib.java"), "class Lib {}\n").unwrap();
    fs::write(b.join("Lib.java"), "class Lib {\n\n\n\n\n}\n").unwrap();

    let config = config_for(dir.path().join("filestat.db"));
    let mut store = SqliteStore::open_in_memory().unwrap();

    let result = record::run(&mut store, "proj", dir.path(), &[a, b], &config).unwrap();
    let ids: Vec<&str> = result.recorded.iter().map(|r| r.file.as_str()).collect();
    assert_eq!(ids, vec!["a/Lib.java", "b/Lib.java"]);
    assert!(result.recorded.iter().all(|r| r.snapshot.delta.is_none()));
    assert_eq!(store.files("proj").unwrap(), vec!["a/Lib.java", "b/Lib.java"]);
}

#[test]
fn file_and_directory_arguments_reach_the_same_history() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    fs::create_dir_all(&src).unwrap();
    let file = src.join("Lib.java");
    fs::write(&file, "class Lib {}\n").unwrap();

    let config = config_for(dir.path().join("filestat.db"));
    let mut store = SqliteStore::open_in_memory().unwrap();

    record::run(&mut store, "proj", dir.path(), &[src.clone()], &config).unwrap();
    fs::write(&file, "class Lib {\n}\n").unwrap();
    let second = record::run(&mut store, "proj", dir.path(), &[src.join(".").join("Lib.java")], &config).unwrap();

    assert_eq!(second.recorded[0].file, "src/Lib.java");
    assert_eq!(second.recorded[0].snapshot.delta.unwrap().new_lines, 1);
    assert_eq!(store.files("proj").unwrap(), vec!["src/Lib.java"]);
}
