use std::f64::consts::TAU;

use crate::model::SamplePlan;

/// `count` angles evenly spaced over [0, 2π).
pub fn angles(count: i64) -> Vec<f64> {
    if count <= 0 {
        return Vec::new();
    }
    let step = TAU / count as f64;
    (0..count).map(|i| i as f64 * step).collect()
}

/// Ring radii from `min_r` to `max_r`: arithmetic when `growth == 1`,
/// geometric otherwise with the last ring pinned to `max_r`.
pub fn rings(count: i64, min_r: f64, max_r: f64, growth: f64) -> Vec<f64> {
    if count <= 0 {
        return Vec::new();
    }
    let n = count as usize;
    if n == 1 {
        return vec![min_r];
    }
    let mut out: Vec<f64> = if growth == 1.0 {
        let step = (max_r - min_r) / (n - 1) as f64;
        (0..n).map(|i| min_r + i as f64 * step).collect()
    } else {
        let mut v = Vec::with_capacity(n);
        let mut r = min_r;
        for i in 0..n {
            v.push(r);
            r *= growth;
            if r > max_r && i < n - 1 {
                r = max_r;
            }
        }
        v
    };
    out[n - 1] = max_r;
    // shrinking growth or min > max would run backwards; keep it monotone
    for i in 1..n - 1 {
        out[i] = out[i].max(out[i - 1]);
    }
    for v in out.iter_mut().take(n - 1) {
        *v = v.min(max_r);
    }
    out
}

pub fn build_plan(angle_count: i64, ring_count: i64, min_r: f64, max_r: f64, growth: f64) -> SamplePlan {
    SamplePlan {
        angles: angles(angle_count),
        rings: rings(ring_count, min_r, max_r, growth),
    }
}
