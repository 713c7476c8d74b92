use bt_em::simulate::simulate_comparisons;
use bt_em::{BtError, EmConfig, fit};

#[test]
fn simulation_is_seeded() {
    let pi = [0.4, 0.3, 0.2, 0.1];
    let a = simulate_comparisons(&pi, 50, 7).expect("simulation failed");
    let b = simulate_comparisons(&pi, 50, 7).expect("simulation failed");
    assert_eq!(a, b);

    let totals = a.add(&a.transpose().expect("transpose")).expect("same shape");
    for i in 0..4 {
        for j in 0..4 {
            if i != j {
                assert_eq!(totals.get(i, j), 50.0);
            }
        }
    }
}

#[test]
fn fit_recovers_simulated_ordering() {
    let truth = [0.4, 0.25, 0.15, 0.12, 0.08];
    let w = simulate_comparisons(&truth, 400, 2024).expect("simulation failed");
    let config = EmConfig {
        max_iter: 1000,
        ..EmConfig::default()
    };
    let out = fit(&w, 1.0, 0.0, &config).expect("fit failed");

    assert!(out.converged);
    assert_eq!(out.ranking()[0], 0);
    assert_eq!(*out.ranking().last().expect("non-empty"), 4);
    for (est, t) in out.pi.iter().zip(truth) {
        assert!((est - t).abs() < 0.05, "estimate {est} far from {t}");
    }
}

#[test]
fn simulation_rejects_non_positive_strengths() {
    let err = simulate_comparisons(&[0.5, 0.0], 10, 1).expect_err("expected rejection");
    assert!(matches!(err, BtError::InvalidArgument(_)));
}
