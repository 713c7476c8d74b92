/// Scale `v` to unit sum. Returns false, leaving `v` untouched, when the sum
/// is not a positive finite number.
pub fn normalize_l1(v: &mut [f64]) -> bool {
    let sum: f64 = v.iter().sum();
    if !(sum.is_finite() && sum > 0.0) {
        return false;
    }
    for x in v.iter_mut() {
        *x /= sum;
    }
    true
}

pub fn normalize_l2(v: &mut [f64]) -> bool {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if !(norm.is_finite() && norm > 0.0) {
        return false;
    }
    for x in v.iter_mut() {
        *x /= norm;
    }
    true
}

pub fn l1_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
}
