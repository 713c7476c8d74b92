use bt_em::BtError;
use bt_em::CscMatrix;
use bt_em::init::{
    InitPolicy, InitStrategy, PowerIteration, SpectralFallback, choose_strategy, initial_pi,
    spectral_pi, uniform_pi,
};

fn approx_eq(a: f64, b: f64, eps: f64) {
    assert!(
        (a - b).abs() <= eps,
        "expected {a} ~= {b} within eps={eps}, got diff={}",
        (a - b).abs()
    );
}

fn three_items() -> CscMatrix {
    CscMatrix::from_triplets(
        3,
        3,
        &[
            (0, 1, 5.0),
            (1, 0, 2.0),
            (1, 2, 3.0),
            (2, 1, 4.0),
            (0, 2, 1.0),
            (2, 0, 6.0),
        ],
    )
    .expect("valid triplets")
}

fn assert_fixed_point(w: &CscMatrix, pi: &[f64]) {
    let col_sums = w.col_sums();
    let k = pi.len();
    for i in 0..k {
        let mut mx = 0.0;
        for j in 0..k {
            mx += w.get(i, j) / col_sums[j] * pi[j];
        }
        approx_eq(mx, pi[i], 1e-9);
    }
}

const POWER: PowerIteration = PowerIteration {
    max_iter: 10_000,
    tolerance: 1e-12,
};

#[test]
fn strategy_requires_three_items_and_no_empty_column() {
    assert_eq!(
        choose_strategy(&three_items()),
        InitStrategy::SpectralDominantEigenvector
    );

    let two = CscMatrix::from_triplets(2, 2, &[(0, 1, 1.0), (1, 0, 1.0)]).expect("valid");
    assert_eq!(choose_strategy(&two), InitStrategy::Uniform);

    let unbeaten = CscMatrix::from_triplets(3, 3, &[(0, 1, 1.0), (0, 2, 1.0), (1, 2, 1.0)])
        .expect("valid");
    assert_eq!(choose_strategy(&unbeaten), InitStrategy::Uniform);
}

#[test]
fn uniform_start_sums_to_one() {
    let pi = uniform_pi(4);
    assert_eq!(pi.to_vec(), vec![0.25; 4]);
}

#[test]
fn spectral_start_is_unit_norm_dominant_eigenvector() {
    let pi = spectral_pi(&three_items(), POWER).expect("spectral start failed");
    approx_eq(pi[0], 0.490658804073837, 1e-9);
    approx_eq(pi[1], 0.5979904174650024, 1e-9);
    approx_eq(pi[2], 0.633767621928467, 1e-9);
    approx_eq(pi.iter().map(|v| v * v).sum::<f64>(), 1.0, 1e-12);

    assert_fixed_point(&three_items(), &pi.to_vec());
}

#[test]
fn spectral_start_handles_periodic_graphs() {
    // Bipartite: items 0,1 only play 2,3, so M has eigenvalue -1 as well as 1.
    let w = CscMatrix::from_triplets(
        4,
        4,
        &[
            (0, 2, 3.0),
            (2, 0, 1.0),
            (0, 3, 1.0),
            (3, 0, 2.0),
            (1, 2, 1.0),
            (2, 1, 4.0),
            (1, 3, 2.0),
            (3, 1, 1.0),
        ],
    )
    .expect("valid");
    let pi = spectral_pi(&w, POWER).expect("spectral start failed");
    assert_fixed_point(&w, &pi.to_vec());
}

#[test]
fn spectral_failure_falls_back_to_uniform_or_aborts() {
    let starved = PowerIteration {
        max_iter: 1,
        tolerance: 0.0,
    };
    let w = three_items();

    let (pi, strategy) = initial_pi(&w, InitPolicy::Auto, SpectralFallback::Uniform, starved)
        .expect("fallback should succeed");
    assert_eq!(strategy, InitStrategy::Uniform);
    assert_eq!(pi.to_vec(), vec![1.0 / 3.0; 3]);

    let err = initial_pi(&w, InitPolicy::Auto, SpectralFallback::Abort, starved)
        .expect_err("expected spectral failure");
    assert!(matches!(err, BtError::NumericalFailure(_)));
    assert!(err.to_string().contains("did not converge"));
}

#[test]
fn uniform_policy_skips_spectral_start() {
    let (pi, strategy) = initial_pi(
        &three_items(),
        InitPolicy::Uniform,
        SpectralFallback::Abort,
        POWER,
    )
    .expect("uniform start");
    assert_eq!(strategy, InitStrategy::Uniform);
    assert_eq!(pi.to_vec(), vec![1.0 / 3.0; 3]);
}
