//! Trend-aware linear pricing model
//!
//! Fits a plain linear combination of the six observation features to the
//! next-period price, minimizing a loss that charges both absolute prediction
//! error and trend-direction error against the previous price.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::data::TrainingRow;
use crate::error::{PricingError, Result};
use crate::metrics::RegressionMetrics;
use crate::optimizer::NelderMead;

/// The authoritative feature order, shared by training and inference
/// assembly. Coefficients are stored and applied in exactly this order.
pub const FEATURE_COLUMNS: [&str; 6] = [
    "price",
    "units_sold",
    "views",
    "add_to_cart",
    "conversion_rate",
    "competitor_price",
];

/// Number of feature columns.
pub const FEATURE_COUNT: usize = FEATURE_COLUMNS.len();

/// The persisted model state: one weight per feature column, applied as a
/// plain dot product with no intercept, plus the evaluation diagnostics
/// captured when it was fitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientArtifact {
    pub coefficients: Vec<f64>,
    pub r2: f64,
    pub mae: f64,
}

impl CoefficientArtifact {
    /// Reject an artifact whose weight count does not match the feature list.
    pub fn validate(&self) -> Result<()> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(PricingError::MalformedArtifact {
                found: self.coefficients.len(),
                expected: FEATURE_COUNT,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for CoefficientArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Fitted coefficients:")?;
        for (name, value) in FEATURE_COLUMNS.iter().zip(self.coefficients.iter()) {
            writeln!(f, "  {name:>16}: {value:>12.6}")?;
        }
        writeln!(f, "  R²:  {:.4}", self.r2)?;
        writeln!(f, "  MAE: {:.2}", self.mae)?;
        Ok(())
    }
}

/// Apply fitted coefficients to one feature vector.
pub fn predict(coefficients: &[f64], features: &[f64; FEATURE_COUNT]) -> f64 {
    coefficients
        .iter()
        .zip(features.iter())
        .map(|(c, x)| c * x)
        .sum()
}

/// Loss for a candidate coefficient vector: pointwise absolute error plus a
/// weighted trend-direction penalty against the previous price.
///
/// NOTE: because both trend terms share the same `prev_price` reference, the
/// penalty collapses algebraically to `|y - pred|` and the loss is effectively
/// `(1 + lambda) * MAE`. The literal form is kept on purpose: it matches the
/// behaviour of the procedure this reimplements, and `lambda` keeps its
/// documented meaning if the reference is ever replaced by a detached
/// baseline.
pub fn trend_difference_loss(coefficients: &[f64], rows: &[TrainingRow], lambda: f64) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let total: f64 = rows
        .iter()
        .map(|row| {
            let prediction = predict(coefficients, &row.features);
            let mae = (row.price_tomorrow - prediction).abs();
            let actual_trend = row.price_tomorrow - row.prev_price;
            let predicted_trend = prediction - row.prev_price;
            let trend_penalty = (actual_trend - predicted_trend).abs();
            mae + lambda * trend_penalty
        })
        .sum();
    total / rows.len() as f64
}

/// Tuning knobs for a fit.
#[derive(Debug, Clone)]
pub struct FitOptions {
    /// Weight of the trend-direction penalty.
    pub lambda: f64,
    /// Fraction of rows held out for evaluation.
    pub eval_ratio: f64,
    /// Seed for the reproducible train/eval split.
    pub seed: u64,
    /// Minimizer configuration.
    pub optimizer: NelderMead,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            lambda: 0.5,
            eval_ratio: 0.2,
            seed: 42,
            optimizer: NelderMead::default(),
        }
    }
}

/// Fits the coefficient vector by minimizing the trend-difference loss.
#[derive(Debug, Clone, Default)]
pub struct TrendAwareFitter {
    options: FitOptions,
}

impl TrendAwareFitter {
    pub fn new(options: FitOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Fit coefficients over `rows`, evaluating on the held-out partition.
    ///
    /// Identical rows and an identical seed produce an identical artifact.
    /// Fails with `DataInsufficient` when no rows are supplied.
    pub fn fit(&self, rows: &[TrainingRow]) -> Result<CoefficientArtifact> {
        if rows.is_empty() {
            return Err(PricingError::DataInsufficient);
        }

        let (train, eval) = split_rows(rows, self.options.eval_ratio, self.options.seed);
        let lambda = self.options.lambda;

        let coefficients = self.options.optimizer.minimize(
            |candidate| trend_difference_loss(candidate, &train, lambda),
            &vec![0.0; FEATURE_COUNT],
        );
        tracing::debug!(?coefficients, "optimizer finished");

        // Diagnostics fall back to the train partition when the eval
        // partition rounds down to empty.
        let eval_rows = if eval.is_empty() { &train } else { &eval };
        let actual: Vec<f64> = eval_rows.iter().map(|r| r.price_tomorrow).collect();
        let predicted: Vec<f64> = eval_rows
            .iter()
            .map(|r| predict(&coefficients, &r.features))
            .collect();
        let metrics = RegressionMetrics::compute(&actual, &predicted)?;

        Ok(CoefficientArtifact {
            coefficients,
            r2: metrics.r2,
            mae: metrics.mae,
        })
    }
}

/// Random but reproducible row split: shuffle indices with a seeded RNG and
/// hold out `eval_ratio` of them.
fn split_rows(
    rows: &[TrainingRow],
    eval_ratio: f64,
    seed: u64,
) -> (Vec<TrainingRow>, Vec<TrainingRow>) {
    let mut indices: Vec<usize> = (0..rows.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let mut eval_len = (rows.len() as f64 * eval_ratio).round() as usize;
    if eval_len >= rows.len() {
        eval_len = rows.len() - 1;
    }

    let (eval_idx, train_idx) = indices.split_at(eval_len);
    let eval = eval_idx.iter().map(|&i| rows[i].clone()).collect();
    let train = train_idx.iter().map(|&i| rows[i].clone()).collect();
    (train, eval)
}
