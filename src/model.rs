use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{Result, numerical};
use crate::opt::EmState;
use crate::sparse::CscMatrix;
use crate::utils::normalize_l1;

/// Outcome of one fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BtFit {
    /// Strengths, summing to one.
    pub pi: Vec<f64>,
    /// EM rounds actually executed.
    pub iters: usize,
    pub converged: bool,
}

impl BtFit {
    pub(crate) fn from_unnormalized(pi: Array1<f64>, iters: usize, converged: bool) -> Result<Self> {
        let mut pi = pi.to_vec();
        if !normalize_l1(&mut pi) {
            numerical!("final strengths do not have a positive finite sum");
        }
        Ok(Self {
            pi,
            iters,
            converged,
        })
    }

    pub fn n_items(&self) -> usize {
        self.pi.len()
    }

    pub fn state(&self) -> EmState {
        if self.converged {
            EmState::Converged
        } else {
            EmState::MaxedOut
        }
    }

    /// Model probability that item `i` beats item `j`.
    pub fn win_probability(&self, i: usize, j: usize) -> Option<f64> {
        let pi = *self.pi.get(i)?;
        let pj = *self.pi.get(j)?;
        let s = pi + pj;
        (s > 0.0).then(|| pi / s)
    }

    /// Item indices by decreasing strength; ties keep index order.
    pub fn ranking(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.pi.len()).collect();
        order.sort_by(|&x, &y| self.pi[y].total_cmp(&self.pi[x]).then(x.cmp(&y)));
        order
    }

    /// `Σ W[i,j] · ln(pi[i] / (pi[i] + pi[j]))` over off-diagonal entries.
    pub fn log_likelihood(&self, w: &CscMatrix) -> f64 {
        let mut ll = 0.0;
        for (i, j, count) in w.iter() {
            if i == j || i >= self.pi.len() || j >= self.pi.len() {
                continue;
            }
            ll += count * (self.pi[i] / (self.pi[i] + self.pi[j])).ln();
        }
        ll
    }
}
