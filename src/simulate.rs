use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, invalid};
use crate::sparse::CscMatrix;

pub fn new_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Draw `n_per_pair` comparisons for every unordered pair from the
/// Bradley-Terry model with strengths `pi`; returns the wins matrix.
pub fn simulate_comparisons(pi: &[f64], n_per_pair: usize, seed: u64) -> Result<CscMatrix> {
    if let Some(i) = pi.iter().position(|p| !(p.is_finite() && *p > 0.0)) {
        invalid!("strength {} of item {i} must be positive and finite", pi[i]);
    }
    let k = pi.len();
    let mut rng = new_rng(seed);
    let mut triplets = Vec::with_capacity(k * k.saturating_sub(1));
    for i in 0..k {
        for j in (i + 1)..k {
            let p_ij = pi[i] / (pi[i] + pi[j]);
            let mut wins_i = 0usize;
            for _ in 0..n_per_pair {
                if rng.r#gen::<f64>() < p_ij {
                    wins_i += 1;
                }
            }
            triplets.push((i, j, wins_i as f64));
            triplets.push((j, i, (n_per_pair - wins_i) as f64));
        }
    }
    CscMatrix::from_triplets(k, k, &triplets)
}
