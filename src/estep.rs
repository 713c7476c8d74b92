use ndarray::Array1;

use crate::error::{Result, numerical};
use crate::sparse::SparsityPattern;

/// Expected comparison weights for the current strengths.
///
/// `values[p] = nij[p] / (pi[i] + pi[j])` for every stored position `p = (i, j)`.
/// `values` is parallel to `pattern` and is overwritten in place.
pub fn e_step(pattern: &SparsityPattern, pi: &Array1<f64>, values: &mut [f64]) -> Result<()> {
    debug_assert_eq!(values.len(), pattern.len());
    let rows = pattern.rows();
    let cols = pattern.cols();
    let counts = pattern.counts();
    for p in 0..pattern.len() {
        let (i, j) = (rows[p], cols[p]);
        let s = pi[i] + pi[j];
        if !(s.is_finite() && s > 0.0) {
            numerical!("strength sum {s} for pair ({i}, {j}) is not positive and finite");
        }
        values[p] = counts[p] / s;
    }
    Ok(())
}

/// Row sums implied by the model: `Σ_j N[k, j] · pi[k] + b · pi[k]`.
pub fn model_row_sums(
    pattern: &SparsityPattern,
    values: &[f64],
    pi: &Array1<f64>,
    b: f64,
    out: &mut Array1<f64>,
) {
    out.fill(0.0);
    for (&r, &v) in pattern.rows().iter().zip(values) {
        out[r] += v * pi[r];
    }
    out.scaled_add(b, pi);
}

/// Row sums of the current E-step values plus `b`.
pub fn denominators(pattern: &SparsityPattern, values: &[f64], b: f64, out: &mut Array1<f64>) {
    out.fill(0.0);
    for (&r, &v) in pattern.rows().iter().zip(values) {
        out[r] += v;
    }
    *out += b;
}

/// `|numer - rowsums|` elementwise.
pub fn residuals(numer: &Array1<f64>, rowsums: &Array1<f64>, out: &mut Array1<f64>) {
    out.assign(numer);
    *out -= rowsums;
    out.mapv_inplace(f64::abs);
}

/// Every residual within `epsilon`.
pub fn within_tolerance(res: &Array1<f64>, epsilon: f64) -> bool {
    res.iter().all(|&r| r <= epsilon)
}
