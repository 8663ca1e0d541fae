use std::collections::HashMap;
use std::f64::consts::TAU;

use crate::geometry::hash::{mix, signed_unit};
use crate::geometry::limits::MAX_FILL_RINGS;
use crate::geometry::math::from_polar;
use crate::geometry::tolerance::{
    FILL_ANGLE_DENSITY, FILL_ANGLE_SPREAD, FILL_MIN_RINGS, FILL_REACH_PCT, FILL_RING_STEP,
};
use crate::model::{Bounds, RingRole, SamplePlan, Seed, Vec2};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Jitter {
    /// Radial displacement bound in mm.
    pub radius: f64,
    /// Angular displacement bound in radians.
    pub angle: f64,
}

/// Unit jitter pairs in [-1, 1) per (ring, angle) sample position.
/// Valid for one pass; every revisit of a position sees the same pair.
#[derive(Debug)]
pub struct JitterMemo {
    seed: u64,
    pairs: HashMap<(u64, u64), (f64, f64)>,
}

impl JitterMemo {
    pub fn new(seed: u64) -> Self {
        JitterMemo { seed, pairs: HashMap::new() }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    /// Keyed by the exact bits of the base radius and angle.
    pub fn pair(&mut self, ring_r: f64, angle: f64) -> (f64, f64) {
        let key = (ring_r.to_bits(), angle.to_bits());
        let seed = self.seed;
        *self.pairs.entry(key).or_insert_with(|| {
            let h = mix(mix(seed, key.0), key.1);
            (signed_unit(mix(h, 1)), signed_unit(mix(h, 2)))
        })
    }
}

/// Linear congruential sample in [0, 1) for fill index `n`.
#[inline]
pub fn fill_lcg(seed: u64, n: u64) -> f64 {
    let v = seed
        .wrapping_mul(n.wrapping_add(1))
        .wrapping_mul(9301)
        .wrapping_add(49297)
        % 233_280;
    v as f64 / 233_280.0
}

/// Jittered primary seeds from the ring/angle grid, dropped when outside `bounds`.
pub fn primary_seeds(
    plan: &SamplePlan,
    origin: Vec2,
    jitter: Jitter,
    bounds: &Bounds,
    memo: &mut JitterMemo,
) -> Vec<Seed> {
    let mut seeds = Vec::with_capacity(plan.rings.len() * plan.angles.len());
    for (ring, &r0) in plan.rings.iter().enumerate() {
        for &a0 in &plan.angles {
            let (ur, ua) = memo.pair(r0, a0);
            let r = r0 + ur * jitter.radius;
            let angle = a0 + ua * jitter.angle;
            let pos = from_polar(origin, r, angle);
            if !bounds.contains(pos) {
                continue;
            }
            seeds.push(Seed { pos, radius: r, angle, role: RingRole::Primary { ring } });
        }
    }
    seeds
}

/// Synthetic rings between the last planned ring and 48% of the shorter side.
/// Empty when the plan already reaches that far.
pub fn fill_seeds(plan: &SamplePlan, origin: Vec2, bounds: &Bounds, seed_value: u64) -> Vec<Seed> {
    let last = match plan.rings.last() {
        Some(&r) => r,
        None => return Vec::new(),
    };
    let outer = bounds.min_side() * FILL_REACH_PCT;
    if !(last < outer) || plan.angles.is_empty() {
        return Vec::new();
    }
    let gap = outer - last;
    let extra_rings = ((gap / FILL_RING_STEP).ceil() as usize).max(FILL_MIN_RINGS).min(MAX_FILL_RINGS);
    let extra_angles = plan.angles.len() * FILL_ANGLE_DENSITY;
    let mut seeds = Vec::new();
    for k in 0..extra_rings {
        let r = last + gap * (k as f64 + 0.5) / extra_rings as f64;
        for i in 0..extra_angles {
            let n = (i + k * 100) as u64;
            let angle = TAU * i as f64 / extra_angles as f64 + fill_lcg(seed_value, n) * FILL_ANGLE_SPREAD;
            let pos = from_polar(origin, r, angle);
            if bounds.contains_strict(pos) {
                seeds.push(Seed { pos, radius: r, angle, role: RingRole::Fill });
            }
        }
    }
    seeds
}

/// Primary seeds followed by fill seeds.
pub fn seed_field(
    plan: &SamplePlan,
    origin: Vec2,
    jitter: Jitter,
    bounds: &Bounds,
    seed_value: u64,
    memo: &mut JitterMemo,
) -> Vec<Seed> {
    let mut seeds = primary_seeds(plan, origin, jitter, bounds, memo);
    seeds.extend(fill_seeds(plan, origin, bounds, seed_value));
    seeds
}
