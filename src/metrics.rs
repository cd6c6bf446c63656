//! Diagnostics for a fitted pricing model

use crate::error::{PricingError, Result};

/// Evaluation-split diagnostics reported after a fit.
///
/// These never gate acceptance; a fitted artifact is always persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionMetrics {
    /// Coefficient of determination
    pub r2: f64,
    /// Mean absolute error
    pub mae: f64,
}

impl RegressionMetrics {
    /// Compute R² and MAE of `predicted` against `actual`.
    pub fn compute(actual: &[f64], predicted: &[f64]) -> Result<Self> {
        if actual.len() != predicted.len() || actual.is_empty() {
            return Err(PricingError::DataError(
                "actual and predicted values must have the same non-zero length".to_string(),
            ));
        }

        let n = actual.len() as f64;
        let mean = actual.iter().sum::<f64>() / n;

        let mae = actual
            .iter()
            .zip(predicted.iter())
            .map(|(a, p)| (a - p).abs())
            .sum::<f64>()
            / n;

        let ss_res: f64 = actual
            .iter()
            .zip(predicted.iter())
            .map(|(a, p)| (a - p).powi(2))
            .sum();
        let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();

        // A constant actual series has no variance to explain.
        let r2 = if ss_tot == 0.0 { 0.0 } else { 1.0 - ss_res / ss_tot };

        Ok(Self { r2, mae })
    }
}

impl std::fmt::Display for RegressionMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Model Performance:")?;
        writeln!(f, "  R²:  {:.4}", self.r2)?;
        writeln!(f, "  MAE: {:.2}", self.mae)?;
        Ok(())
    }
}
