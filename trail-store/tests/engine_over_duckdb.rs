//! End-to-end tests: graph engine snapshots built from a DuckDB store.

use tempfile::TempDir;
use trail_core::{EngineState, GraphEngine, GraphError, Shelter};
use trail_store::{Dataset, TrailBase, TrailRecord};

fn scenario_dataset() -> Dataset {
    Dataset {
        shelters: vec![
            Shelter::new(1, "A", "Val A", 1800, 40, true),
            Shelter::new(2, "B", "Val B", 2100, 25, true),
            Shelter::new(3, "C", "Val C", 2400, 12, false),
            Shelter::new(4, "D", "Val D", 1950, 60, true),
        ],
        trails: vec![
            TrailRecord::new(1, 2, 2000),
            TrailRecord::new(2, 3, 2010),
            TrailRecord::new(3, 2, 2012),
        ],
    }
}

fn create_db(dir: &TempDir, dataset: &Dataset) -> std::path::PathBuf {
    let path = dir.path().join("trailbase");
    let db = TrailBase::open(&path).unwrap();
    db.import_dataset(dataset).unwrap();
    path
}

fn names(shelters: &[&Shelter]) -> Vec<String> {
    shelters.iter().map(|s| s.name.clone()).collect()
}

#[test]
fn test_snapshots_follow_the_year() {
    let dir = TempDir::new().unwrap();
    let path = create_db(&dir, &scenario_dataset());

    let db = TrailBase::open_read_only(&path).unwrap();
    let mut engine = GraphEngine::new(db).unwrap();

    let summary = engine.build(2000).unwrap();
    assert_eq!(summary.node_count, 2);
    assert_eq!(engine.component_count(), 1);
    assert_eq!(names(&engine.reachable(1)), vec!["B"]);

    let summary = engine.build(2024).unwrap();
    assert_eq!(summary.trails_fetched, 3);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(summary.edge_count, 2);
    assert_eq!(engine.degree_of(2), 2);
    assert_eq!(names(&engine.reachable(1)), vec!["B", "C"]);
    assert_eq!(engine.degree_of(4), 0);
}

#[test]
fn test_year_before_any_trail_is_empty() {
    let dir = TempDir::new().unwrap();
    let path = create_db(&dir, &scenario_dataset());

    let mut engine = GraphEngine::new(TrailBase::open_read_only(&path).unwrap()).unwrap();
    engine.build(1950).unwrap();
    assert_eq!(engine.state(), EngineState::Empty);
    assert_eq!(engine.component_count(), 0);
    assert!(engine.nodes().is_empty());
}

#[test]
fn test_dangling_trail_in_database() {
    let mut dataset = scenario_dataset();
    dataset.trails.push(TrailRecord::new(4, 42, 2015));

    let dir = TempDir::new().unwrap();
    let path = create_db(&dir, &dataset);
    let mut engine = GraphEngine::new(TrailBase::open_read_only(&path).unwrap()).unwrap();

    engine.build(2010).unwrap();
    assert_eq!(engine.state(), EngineState::Built);

    let err = engine.build(2015).unwrap_err();
    assert!(matches!(err, GraphError::DanglingShelter { missing: 42, .. }));
    assert_eq!(engine.state(), EngineState::Empty);
}

#[test]
fn test_dataset_file_import() {
    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("seed.json");
    std::fs::write(
        &json_path,
        serde_json::to_string_pretty(&scenario_dataset()).unwrap(),
    )
    .unwrap();

    let dataset = Dataset::load(&json_path).unwrap();
    let db = TrailBase::open_in_memory().unwrap();
    db.import_dataset(&dataset).unwrap();

    let stats = db.stats().unwrap();
    assert_eq!(stats.shelter_count, 4);
    assert_eq!(stats.trail_count, 3);
}

#[test]
fn test_missing_dataset_file() {
    let dir = TempDir::new().unwrap();
    let err = Dataset::load(dir.path().join("nope.json")).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read dataset"));
}
