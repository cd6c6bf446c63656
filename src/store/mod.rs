//! Observation and artifact storage
//!
//! The pricing core treats record storage as an external collaborator: it only
//! needs read access to the three observation streams keyed by item and date,
//! plus load/save of a single coefficient artifact. Both sides are expressed
//! as traits so tests can substitute in-memory stores.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};
use crate::model::CoefficientArtifact;

mod artifact;
mod csv;
mod memory;

pub use self::artifact::JsonArtifactStore;
pub use self::csv::CsvObservationStore;
pub use self::memory::{InMemoryArtifactStore, InMemoryObservationStore};

/// A catalog item with its allowable price band.
///
/// `cost_price` is advisory only; it is not enforced as a floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub cost_price: f64,
    pub min_price: f64,
    pub max_price: f64,
}

impl Item {
    /// Create an item, rejecting an inverted price band.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        category: impl Into<String>,
        cost_price: f64,
        min_price: f64,
        max_price: f64,
    ) -> Result<Self> {
        let item = Self {
            id,
            name: name.into(),
            category: category.into(),
            cost_price,
            min_price,
            max_price,
        };
        item.validate_band()?;
        Ok(item)
    }

    /// Check the `min_price <= max_price` invariant.
    pub fn validate_band(&self) -> Result<()> {
        if self.min_price > self.max_price {
            return Err(PricingError::ConstraintViolation {
                min: self.min_price,
                max: self.max_price,
            });
        }
        Ok(())
    }
}

/// One day's sales record for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub item_id: i64,
    pub date: NaiveDate,
    pub units_sold: u32,
    pub price: f64,
}

/// One day's demand signals for one item.
///
/// The conversion rate is derived at assembly time from these counts, so a
/// zero-view day cannot produce an undefined rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandRecord {
    pub item_id: i64,
    pub date: NaiveDate,
    pub views: u32,
    pub add_to_cart: u32,
}

/// One day's observed competitor price for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorRecord {
    pub item_id: i64,
    pub date: NaiveDate,
    pub competitor_price: f64,
}

/// Read access to the per-item observation history.
///
/// Passing `None` for `item_id` returns the full history across all items.
pub trait ObservationStore {
    fn list_sales(&self, item_id: Option<i64>) -> Result<Vec<SalesRecord>>;

    fn list_demand(&self, item_id: Option<i64>) -> Result<Vec<DemandRecord>>;

    fn list_competitor(&self, item_id: Option<i64>) -> Result<Vec<CompetitorRecord>>;

    /// Look up an item's catalog entry, failing with `ItemNotFound`.
    fn get_item(&self, item_id: i64) -> Result<Item>;
}

/// Persistence for the single fitted coefficient artifact.
///
/// A save overwrites any prior artifact wholesale. Retraining while another
/// caller is serving suggestions is not synchronized here; callers are
/// expected to serialize retrains.
pub trait ArtifactStore {
    fn load(&self) -> Result<Option<CoefficientArtifact>>;

    fn save(&mut self, artifact: &CoefficientArtifact) -> Result<()>;
}
