//! Pricing engine facade
//!
//! Ties the assembler, fitter and stores together behind the three operations
//! an API layer needs: train, suggest a price, and read the price history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data::assemble;
use crate::error::{PricingError, Result};
use crate::model::{predict, CoefficientArtifact, TrendAwareFitter};
use crate::store::{ArtifactStore, ObservationStore};

/// One historical price point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Synchronous pricing engine over injected stores.
///
/// Training and inference are discrete batch operations; the only shared
/// state is the persisted artifact. A retrain overwrites it wholesale, so
/// callers that retrain while serving must serialize those calls themselves.
#[derive(Debug)]
pub struct PricingEngine<S, A> {
    observations: S,
    artifacts: A,
    fitter: TrendAwareFitter,
}

impl<S: ObservationStore, A: ArtifactStore> PricingEngine<S, A> {
    pub fn new(observations: S, artifacts: A) -> Self {
        Self {
            observations,
            artifacts,
            fitter: TrendAwareFitter::default(),
        }
    }

    pub fn with_fitter(observations: S, artifacts: A, fitter: TrendAwareFitter) -> Self {
        Self {
            observations,
            artifacts,
            fitter,
        }
    }

    pub fn artifacts(&self) -> &A {
        &self.artifacts
    }

    /// Fit the model over the full current dataset and persist the result.
    ///
    /// With `force = false` an existing artifact is returned as-is, without
    /// refitting; with `force = true` the model is always refitted and the
    /// prior artifact overwritten. Fails with `DataInsufficient` when no
    /// usable training rows exist.
    pub fn train(&mut self, force: bool) -> Result<CoefficientArtifact> {
        if !force {
            if let Some(artifact) = self.artifacts.load()? {
                artifact.validate()?;
                tracing::debug!("reusing persisted coefficient artifact");
                return Ok(artifact);
            }
        }

        let dataset = assemble(&self.observations, None)?;
        let rows = dataset.training_rows();
        let artifact = self.fitter.fit(&rows)?;
        self.artifacts.save(&artifact)?;
        tracing::info!(
            rows = rows.len(),
            r2 = artifact.r2,
            mae = artifact.mae,
            "trained pricing model"
        );
        Ok(artifact)
    }

    /// Suggest a next-period price for one item, clamped to its price band
    /// and rounded to two decimals.
    ///
    /// Fails with `ModelMissing` when no artifact has been trained yet: the
    /// caller decides whether to trigger training, rather than paying a
    /// surprise fitting cost on a read path.
    pub fn suggest_price(&self, item_id: i64) -> Result<f64> {
        let artifact = self.artifacts.load()?.ok_or(PricingError::ModelMissing)?;
        artifact.validate()?;

        let item = self.observations.get_item(item_id)?;
        let dataset = assemble(&self.observations, Some(item_id))?;
        let latest = dataset
            .latest_row(item_id)
            .ok_or(PricingError::ItemNotFound(item_id))?;

        let raw = predict(&artifact.coefficients, &latest.features);
        let clamped = raw.max(item.min_price).min(item.max_price);
        Ok(round_cents(clamped))
    }

    /// The item's recorded prices in chronological order.
    pub fn price_history(&self, item_id: i64) -> Result<Vec<PricePoint>> {
        let mut sales = self.observations.list_sales(Some(item_id))?;
        if sales.is_empty() {
            return Err(PricingError::ItemNotFound(item_id));
        }
        sales.sort_by_key(|record| record.date);
        Ok(sales
            .into_iter()
            .map(|record| PricePoint {
                date: record.date,
                price: record.price,
            })
            .collect())
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
