use std::fs;

use pretty_assertions::assert_eq;

use dynamic_pricing::{
    ArtifactStore, CoefficientArtifact, CsvObservationStore, Item, JsonArtifactStore,
    ObservationStore, PricingError,
};

fn sample_artifact() -> CoefficientArtifact {
    CoefficientArtifact {
        coefficients: vec![0.9, 0.0005, 0.0, 0.0, 0.0, 0.1],
        r2: 0.82,
        mae: 1.4,
    }
}

#[test]
fn json_artifact_store_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonArtifactStore::new(dir.path().join("model.json"));

    assert_eq!(store.load().unwrap(), None);

    let artifact = sample_artifact();
    store.save(&artifact).unwrap();
    assert_eq!(store.load().unwrap(), Some(artifact));
}

#[test]
fn json_artifact_store_overwrites_wholesale() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonArtifactStore::new(dir.path().join("model.json"));

    store.save(&sample_artifact()).unwrap();
    let replacement = CoefficientArtifact {
        coefficients: vec![0.0; 6],
        r2: 0.0,
        mae: 9.9,
    };
    store.save(&replacement).unwrap();
    assert_eq!(store.load().unwrap(), Some(replacement));
}

#[test]
fn json_artifact_store_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonArtifactStore::new(dir.path().join("nested/state/model.json"));
    store.save(&sample_artifact()).unwrap();
    assert!(store.path().exists());
}

fn write_csv_fixture(dir: &std::path::Path) {
    fs::write(
        dir.join("items.csv"),
        "id,name,category,cost_price,min_price,max_price\n\
         1,Desk Lamp,lighting,40.0,50.0,150.0\n",
    )
    .unwrap();
    fs::write(
        dir.join("sales.csv"),
        "item_id,date,units_sold,price\n\
         1,2024-03-01,20,100.0\n\
         1,2024-03-02,22,101.0\n",
    )
    .unwrap();
    fs::write(
        dir.join("demand.csv"),
        "item_id,date,views,add_to_cart\n\
         1,2024-03-01,500,60\n\
         1,2024-03-02,480,55\n",
    )
    .unwrap();
    fs::write(
        dir.join("competitor.csv"),
        "item_id,date,competitor_price\n\
         1,2024-03-01,98.0\n",
    )
    .unwrap();
}

#[test]
fn csv_store_loads_all_streams() {
    let dir = tempfile::tempdir().unwrap();
    write_csv_fixture(dir.path());

    let store = CsvObservationStore::open(dir.path()).unwrap();
    assert_eq!(store.list_sales(None).unwrap().len(), 2);
    assert_eq!(store.list_demand(Some(1)).unwrap().len(), 2);
    assert_eq!(store.list_competitor(Some(1)).unwrap().len(), 1);
    assert_eq!(store.list_sales(Some(99)).unwrap().len(), 0);

    let item = store.get_item(1).unwrap();
    assert_eq!(item.name, "Desk Lamp");
    assert_eq!(item.min_price, 50.0);

    let err = store.get_item(99).unwrap_err();
    assert!(matches!(err, PricingError::ItemNotFound(99)));
}

#[test]
fn csv_store_rejects_inverted_price_bands() {
    let dir = tempfile::tempdir().unwrap();
    write_csv_fixture(dir.path());
    fs::write(
        dir.path().join("items.csv"),
        "id,name,category,cost_price,min_price,max_price\n\
         1,Broken,misc,10.0,90.0,50.0\n",
    )
    .unwrap();

    match CsvObservationStore::open(dir.path()).unwrap_err() {
        PricingError::ConstraintViolation { min, max } => {
            assert_eq!(min, 90.0);
            assert_eq!(max, 50.0);
        }
        other => panic!("expected ConstraintViolation, got {other:?}"),
    }
}

#[test]
fn item_constructor_enforces_the_band() {
    assert!(Item::new(1, "ok", "misc", 10.0, 50.0, 150.0).is_ok());
    assert!(Item::new(1, "equal", "misc", 10.0, 50.0, 50.0).is_ok());
    let err = Item::new(1, "bad", "misc", 10.0, 90.0, 50.0).unwrap_err();
    assert!(matches!(err, PricingError::ConstraintViolation { .. }));
}
