//! Starting strengths for the EM loop.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, numerical};
use crate::sparse::CscMatrix;
use crate::utils::{l1_distance, normalize_l1, normalize_l2};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InitStrategy {
    Uniform,
    SpectralDominantEigenvector,
}

/// Which starts the caller allows.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitPolicy {
    /// Spectral start whenever [`choose_strategy`] allows it.
    #[default]
    Auto,
    Uniform,
}

/// What to do when the spectral start cannot be computed.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpectralFallback {
    #[default]
    Uniform,
    Abort,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PowerIteration {
    pub max_iter: usize,
    pub tolerance: f64,
}

/// Spectral start needs more than two items and no all-zero column of `w`.
pub fn choose_strategy(w: &CscMatrix) -> InitStrategy {
    if w.ncols() > 2 && w.col_sums().iter().all(|&s| s != 0.0) {
        InitStrategy::SpectralDominantEigenvector
    } else {
        InitStrategy::Uniform
    }
}

pub fn uniform_pi(k: usize) -> Array1<f64> {
    Array1::from_elem(k, 1.0 / k as f64)
}

/// Initial strengths for a diagonal-free wins matrix.
pub fn initial_pi(
    w: &CscMatrix,
    policy: InitPolicy,
    fallback: SpectralFallback,
    power: PowerIteration,
) -> Result<(Array1<f64>, InitStrategy)> {
    let k = w.nrows();
    let strategy = match policy {
        InitPolicy::Uniform => InitStrategy::Uniform,
        InitPolicy::Auto => choose_strategy(w),
    };
    match strategy {
        InitStrategy::Uniform => Ok((uniform_pi(k), strategy)),
        InitStrategy::SpectralDominantEigenvector => match spectral_pi(w, power) {
            Ok(pi) => Ok((pi, strategy)),
            Err(e) if fallback == SpectralFallback::Uniform => {
                warn!(error = %e, "spectral start failed, starting from uniform strengths");
                Ok((uniform_pi(k), InitStrategy::Uniform))
            }
            Err(e) => Err(e),
        },
    }
}

/// Absolute dominant eigenvector of `w` with each column divided by its sum,
/// scaled to unit L2 norm.
///
/// The column-stochastic operator `M` is iterated in its lazy form
/// `(I + M) / 2`, which shares the eigenvector of eigenvalue 1 but has no
/// other eigenvalue on the unit circle.
pub fn spectral_pi(w: &CscMatrix, power: PowerIteration) -> Result<Array1<f64>> {
    let k = w.nrows();
    let col_sums = w.col_sums();
    let mut inv = Vec::with_capacity(k);
    for (j, &s) in col_sums.iter().enumerate() {
        if s == 0.0 {
            numerical!("column {j} sums to zero");
        }
        inv.push(1.0 / s);
    }

    let mut x = vec![1.0 / k as f64; k];
    let mut z = vec![0.0; k];
    let mut mx = vec![0.0; k];
    let mut converged = false;
    for round in 0..power.max_iter {
        for j in 0..k {
            z[j] = x[j] * inv[j];
        }
        w.mul_vec(&z, &mut mx);
        for i in 0..k {
            mx[i] = 0.5 * (x[i] + mx[i]);
        }
        if !normalize_l1(&mut mx) {
            numerical!("power iteration collapsed to zero at round {round}");
        }
        let delta = l1_distance(&x, &mx);
        std::mem::swap(&mut x, &mut mx);
        if delta <= power.tolerance {
            debug!(rounds = round + 1, delta, "power iteration converged");
            converged = true;
            break;
        }
    }
    if !converged {
        numerical!(
            "power iteration did not converge within {} rounds",
            power.max_iter
        );
    }

    if !normalize_l2(&mut x) {
        numerical!("dominant eigenvector has zero norm");
    }
    let pi = Array1::from_iter(x.into_iter().map(f64::abs));
    if let Some(i) = pi.iter().position(|v| !(v.is_finite() && *v > 0.0)) {
        numerical!("dominant eigenvector has non-positive entry {} at item {i}", pi[i]);
    }
    Ok(pi)
}
