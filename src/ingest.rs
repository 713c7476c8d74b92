use ndarray::Array1;

use crate::error::{Result, invalid};
use crate::sparse::{CscMatrix, SparsityPattern};

/// Working structures built once per fit.
#[derive(Debug, Clone)]
pub struct Comparisons {
    /// Wins matrix with the diagonal removed.
    pub wins: CscMatrix,
    /// Positions and counts of `N = W + Wᵗ`.
    pub totals: SparsityPattern,
    /// `rowSum(W) + a - 1`, fixed for the whole run.
    pub numer: Array1<f64>,
}

impl Comparisons {
    pub fn new(w: &CscMatrix, a: f64) -> Result<Self> {
        if !w.is_square() {
            invalid!(
                "comparison matrix must be square, got {}x{}",
                w.nrows(),
                w.ncols()
            );
        }
        if w.nrows() < 2 {
            invalid!("at least two items are required, got {}", w.nrows());
        }
        if !a.is_finite() || a < 1.0 {
            invalid!("a must be finite and >= 1, got {a}");
        }

        let mut wins = w.clone();
        wins.zero_diagonal();

        let n = wins.add(&wins.transpose()?)?;
        let totals = SparsityPattern::from_matrix(&n);

        let numer = wins.row_sums() + (a - 1.0);

        Ok(Self {
            wins,
            totals,
            numer,
        })
    }

    pub fn n_items(&self) -> usize {
        self.wins.nrows()
    }
}

pub(crate) fn check_b(b: f64) -> Result<()> {
    if !b.is_finite() || b < 0.0 {
        invalid!("b must be finite and >= 0, got {b}");
    }
    Ok(())
}
