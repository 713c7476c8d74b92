//! Bradley-Terry strengths from sparse pairwise comparison counts.
//!
//! [`fit`] takes a `K`x`K` wins matrix `W` (`W[i, j]` = times `i` beat `j`)
//! and the prior hyperparameters `a`, `b`, and runs an EM fixed-point
//! iteration on the symmetrized counts `N = W + Wᵗ` until every item's
//! implied row sum is within `epsilon` of its target, or `max_iter` rounds.

pub mod error;
pub mod estep;
pub mod ingest;
pub mod init;
pub mod io;
pub mod model;
pub mod opt;
pub mod progress;
pub mod simulate;
pub mod sparse;
pub mod utils;

pub use error::BtError;
pub use model::BtFit;
pub use opt::{EmConfig, EmState, fit, fit_csc};
pub use sparse::CscMatrix;
