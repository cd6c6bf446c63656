//! # Dynamic Pricing
//!
//! A Rust library that recommends a next-period price for a catalog item from
//! its recent sales, demand-signal and competitor-price history.
//!
//! ## Features
//!
//! - Dataset assembly: joins the three observation streams per item and date,
//!   fills missing competitor prices, derives next-period labels without ever
//!   shifting across an item boundary
//! - Trend-aware fitting: minimizes pointwise absolute error plus a weighted
//!   trend-direction penalty over a 6-weight linear model, with a
//!   reproducible train/eval split and R²/MAE diagnostics
//! - Price suggestion: applies the persisted coefficients to an item's latest
//!   feature row and clamps the result into its configured price band
//! - Pluggable storage: in-memory, CSV-file and JSON-file store
//!   implementations behind small traits
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use dynamic_pricing::{
//!     CompetitorRecord, DemandRecord, InMemoryArtifactStore, InMemoryObservationStore, Item,
//!     PricingEngine, SalesRecord,
//! };
//!
//! # fn main() -> dynamic_pricing::Result<()> {
//! let mut observations = InMemoryObservationStore::new();
//! observations.insert_item(Item::new(1, "desk lamp", "lighting", 40.0, 50.0, 150.0)?);
//! let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! for day in 0..10u64 {
//!     let date = start + chrono::Days::new(day);
//!     observations.record_sale(SalesRecord {
//!         item_id: 1,
//!         date,
//!         units_sold: 20 + day as u32,
//!         price: 100.0 + day as f64,
//!     });
//!     observations.record_demand(DemandRecord {
//!         item_id: 1,
//!         date,
//!         views: 500,
//!         add_to_cart: 60,
//!     });
//!     observations.record_competitor(CompetitorRecord {
//!         item_id: 1,
//!         date,
//!         competitor_price: 98.0,
//!     });
//! }
//!
//! let mut engine = PricingEngine::new(observations, InMemoryArtifactStore::new());
//! engine.train(true)?;
//! let price = engine.suggest_price(1)?;
//! assert!((50.0..=150.0).contains(&price));
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod model;
pub mod optimizer;
pub mod store;

// Re-export commonly used types
pub use crate::data::{assemble, Dataset, ObservationRow, TrainingRow};
pub use crate::engine::{PricePoint, PricingEngine};
pub use crate::error::{PricingError, Result};
pub use crate::metrics::RegressionMetrics;
pub use crate::model::{
    predict, trend_difference_loss, CoefficientArtifact, FitOptions, TrendAwareFitter,
    FEATURE_COLUMNS, FEATURE_COUNT,
};
pub use crate::store::{
    ArtifactStore, CompetitorRecord, CsvObservationStore, DemandRecord, InMemoryArtifactStore,
    InMemoryObservationStore, Item, JsonArtifactStore, ObservationStore, SalesRecord,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
