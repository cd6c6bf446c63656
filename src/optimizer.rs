//! Derivative-free minimization for the fitting step
//!
//! The trend-difference loss is convex but piecewise linear, so the fitter
//! uses a Nelder-Mead simplex: it needs no gradients, it is fully
//! deterministic for a fixed starting point, and the parameter dimension is
//! tiny (one weight per feature column).

use std::cmp::Ordering;

/// Nelder-Mead downhill simplex minimizer.
#[derive(Debug, Clone)]
pub struct NelderMead {
    /// Maximum number of simplex iterations.
    pub max_iter: usize,
    /// Displacement used to seed simplex vertices on zero coordinates.
    pub init_step: f64,
    /// Convergence threshold on coordinate spread across the simplex.
    pub x_tol: f64,
    /// Convergence threshold on objective spread across the simplex.
    pub f_tol: f64,
}

impl Default for NelderMead {
    fn default() -> Self {
        Self {
            max_iter: 5000,
            init_step: 0.1,
            x_tol: 1e-8,
            f_tol: 1e-10,
        }
    }
}

const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;

impl NelderMead {
    /// Minimize `f` starting from `start`, returning the best point found.
    pub fn minimize<F>(&self, f: F, start: &[f64]) -> Vec<f64>
    where
        F: Fn(&[f64]) -> f64,
    {
        let n = start.len();
        if n == 0 {
            return Vec::new();
        }

        // Initial simplex: the start point plus one vertex displaced along
        // each axis. Non-zero coordinates are nudged proportionally.
        let mut simplex: Vec<(Vec<f64>, f64)> = Vec::with_capacity(n + 1);
        simplex.push((start.to_vec(), f(start)));
        for i in 0..n {
            let mut vertex = start.to_vec();
            vertex[i] += if vertex[i] == 0.0 {
                self.init_step
            } else {
                0.05 * vertex[i]
            };
            let value = f(&vertex);
            simplex.push((vertex, value));
        }

        for _ in 0..self.max_iter {
            simplex.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

            if self.converged(&simplex) {
                break;
            }

            // Centroid of every vertex except the worst.
            let mut centroid = vec![0.0; n];
            for (vertex, _) in &simplex[..n] {
                for j in 0..n {
                    centroid[j] += vertex[j];
                }
            }
            for value in centroid.iter_mut() {
                *value /= n as f64;
            }

            let (worst, f_worst) = simplex[n].clone();
            let f_best = simplex[0].1;
            let f_second_worst = simplex[n - 1].1;

            let reflected = blend(&centroid, &worst, REFLECT);
            let f_reflected = f(&reflected);

            if f_reflected < f_best {
                let expanded = blend(&centroid, &worst, EXPAND);
                let f_expanded = f(&expanded);
                simplex[n] = if f_expanded < f_reflected {
                    (expanded, f_expanded)
                } else {
                    (reflected, f_reflected)
                };
            } else if f_reflected < f_second_worst {
                simplex[n] = (reflected, f_reflected);
            } else {
                // Contract toward whichever of worst/reflected is better.
                let contracted = if f_reflected < f_worst {
                    blend(&centroid, &reflected, -CONTRACT)
                } else {
                    blend(&centroid, &worst, -CONTRACT)
                };
                let f_contracted = f(&contracted);
                if f_contracted < f_worst.min(f_reflected) {
                    simplex[n] = (contracted, f_contracted);
                } else {
                    // Shrink every vertex toward the best.
                    let best = simplex[0].0.clone();
                    for (vertex, value) in simplex.iter_mut().skip(1) {
                        for j in 0..n {
                            vertex[j] = best[j] + SHRINK * (vertex[j] - best[j]);
                        }
                        *value = f(vertex);
                    }
                }
            }
        }

        simplex.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        simplex.swap_remove(0).0
    }

    fn converged(&self, simplex: &[(Vec<f64>, f64)]) -> bool {
        let (best, f_best) = &simplex[0];
        let mut f_spread: f64 = 0.0;
        let mut x_spread: f64 = 0.0;
        for (vertex, value) in &simplex[1..] {
            f_spread = f_spread.max((value - f_best).abs());
            for (a, b) in vertex.iter().zip(best.iter()) {
                x_spread = x_spread.max((a - b).abs());
            }
        }
        f_spread <= self.f_tol && x_spread <= self.x_tol
    }
}

/// Point on the line through `away`-to-centroid, extended by `factor` past the
/// centroid. Negative factors land between the centroid and `away`.
fn blend(centroid: &[f64], away: &[f64], factor: f64) -> Vec<f64> {
    centroid
        .iter()
        .zip(away.iter())
        .map(|(c, a)| c + factor * (c - a))
        .collect()
}
