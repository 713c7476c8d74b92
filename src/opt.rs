use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, invalid, numerical};
use crate::estep::{denominators, e_step, model_row_sums, residuals, within_tolerance};
use crate::ingest::{Comparisons, check_b};
use crate::init::{InitPolicy, PowerIteration, SpectralFallback, initial_pi};
use crate::model::BtFit;
use crate::progress;
use crate::sparse::CscMatrix;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmConfig {
    /// Maximum EM rounds.
    pub max_iter: usize,
    /// Per-item tolerance on `|numer - rowsums|`.
    pub epsilon: f64,
    pub init: InitPolicy,
    pub spectral_fallback: SpectralFallback,
    pub spectral_max_iter: usize,
    pub spectral_tolerance: f64,
    pub progress: bool,
}

impl Default for EmConfig {
    fn default() -> Self {
        Self {
            max_iter: 100,
            epsilon: 1e-2,
            init: InitPolicy::Auto,
            spectral_fallback: SpectralFallback::Uniform,
            spectral_max_iter: 10_000,
            spectral_tolerance: 1e-12,
            progress: false,
        }
    }
}

impl EmConfig {
    fn power_iteration(&self) -> PowerIteration {
        PowerIteration {
            max_iter: self.spectral_max_iter,
            tolerance: self.spectral_tolerance,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EmState {
    Running,
    Converged,
    MaxedOut,
}

/// Fit Bradley-Terry strengths to the wins matrix `w`.
///
/// `a` is the prior on wins, `b` the prior on comparisons. The returned `pi`
/// sums to one; `converged` is false when `max_iter` rounds ran out first.
pub fn fit(w: &CscMatrix, a: f64, b: f64, config: &EmConfig) -> Result<BtFit> {
    check_b(b)?;
    if !(config.epsilon.is_finite() && config.epsilon >= 0.0) {
        invalid!("epsilon must be finite and >= 0, got {}", config.epsilon);
    }

    let data = Comparisons::new(w, a)?;
    let k = data.n_items();
    let (mut pi, strategy) = initial_pi(
        &data.wins,
        config.init,
        config.spectral_fallback,
        config.power_iteration(),
    )?;
    debug!(items = k, pairs = data.totals.len(), ?strategy, "starting EM");

    let pattern = &data.totals;
    let mut values = vec![0.0f64; pattern.len()];
    let mut rowsums = Array1::zeros(k);
    let mut res = Array1::zeros(k);
    let mut denom = Array1::zeros(k);

    let pb = config
        .progress
        .then(|| progress::bar(config.max_iter as u64, "EM", "fitting"));

    let mut iters = 0usize;
    let mut state = EmState::Running;
    while state == EmState::Running {
        if iters == config.max_iter {
            state = EmState::MaxedOut;
            break;
        }
        iters += 1;

        e_step(pattern, &pi, &mut values)?;

        model_row_sums(pattern, &values, &pi, b, &mut rowsums);
        residuals(&data.numer, &rowsums, &mut res);
        if within_tolerance(&res, config.epsilon) {
            state = EmState::Converged;
        }
        debug!(
            round = iters,
            max_residual = res.iter().cloned().fold(0.0, f64::max),
            "EM round"
        );

        denominators(pattern, &values, b, &mut denom);
        m_step(&data.numer, &denom, &mut pi)?;

        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = pb {
        pb.finish_with_message(format!("{state:?} after {iters} rounds"));
    }

    let converged = state == EmState::Converged;
    info!(iters, converged, "EM finished");
    BtFit::from_unnormalized(pi, iters, converged)
}

/// The literal CSC call surface: raw column-compressed arrays plus `maxit`
/// and `epsilon`, everything else at its default.
#[allow(clippy::too_many_arguments)]
pub fn fit_csc(
    dims: (usize, usize),
    row_indices: &[usize],
    col_pointers: &[usize],
    values: &[f64],
    a: f64,
    b: f64,
    maxit: usize,
    epsilon: f64,
) -> Result<BtFit> {
    let w = CscMatrix::from_parts(dims.0, dims.1, row_indices, col_pointers, values)?;
    let config = EmConfig {
        max_iter: maxit,
        epsilon,
        ..EmConfig::default()
    };
    fit(&w, a, b, &config)
}

/// `pi = numer / denom`, left unnormalized.
pub fn m_step(numer: &Array1<f64>, denom: &Array1<f64>, pi: &mut Array1<f64>) -> Result<()> {
    if let Some(k) = denom.iter().position(|d| !(d.is_finite() && *d > 0.0)) {
        numerical!(
            "M-step denominator {} for item {k} is not positive and finite",
            denom[k]
        );
    }
    pi.assign(numer);
    *pi /= denom;
    Ok(())
}
