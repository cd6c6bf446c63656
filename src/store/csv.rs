//! CSV-backed observation store
//!
//! Loads a pre-populated observation history from four flat files in one
//! directory: `items.csv`, `sales.csv`, `demand.csv` and `competitor.csv`.
//! Column headers match the record field names; dates are `YYYY-MM-DD`.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::store::{
    CompetitorRecord, DemandRecord, InMemoryObservationStore, Item, ObservationStore, SalesRecord,
};

/// Observation store loaded from CSV files at startup.
#[derive(Debug, Clone)]
pub struct CsvObservationStore {
    inner: InMemoryObservationStore,
}

impl CsvObservationStore {
    /// Load all four files from `dir`, validating item price bands.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut inner = InMemoryObservationStore::new();

        for item in read_records::<Item>(&dir.join("items.csv"))? {
            item.validate_band()?;
            inner.insert_item(item);
        }
        for record in read_records::<SalesRecord>(&dir.join("sales.csv"))? {
            inner.record_sale(record);
        }
        for record in read_records::<DemandRecord>(&dir.join("demand.csv"))? {
            inner.record_demand(record);
        }
        for record in read_records::<CompetitorRecord>(&dir.join("competitor.csv"))? {
            inner.record_competitor(record);
        }

        Ok(Self { inner })
    }
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

impl ObservationStore for CsvObservationStore {
    fn list_sales(&self, item_id: Option<i64>) -> Result<Vec<SalesRecord>> {
        self.inner.list_sales(item_id)
    }

    fn list_demand(&self, item_id: Option<i64>) -> Result<Vec<DemandRecord>> {
        self.inner.list_demand(item_id)
    }

    fn list_competitor(&self, item_id: Option<i64>) -> Result<Vec<CompetitorRecord>> {
        self.inner.list_competitor(item_id)
    }

    fn get_item(&self, item_id: i64) -> Result<Item> {
        self.inner.get_item(item_id)
    }
}
