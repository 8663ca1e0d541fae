use super::hash::{mix, signed_unit};

/// Continuous, deterministic 1-D noise keyed by a channel id.
/// Implementations must return the same value for the same `(x, channel)`.
pub trait Noise1D {
    fn sample(&self, x: f64, channel: u64) -> f64;
}

/// Lattice value noise with smoothstep interpolation; output in [-1, 1).
#[derive(Clone, Copy, Debug)]
pub struct ValueNoise {
    pub seed: u64,
}

impl ValueNoise {
    pub const DEFAULT_SEED: u64 = 12345;

    pub fn new(seed: u64) -> Self {
        ValueNoise { seed }
    }

    #[inline]
    fn lattice(&self, i: i64, channel: u64) -> f64 {
        signed_unit(mix(mix(self.seed, channel), i as u64))
    }
}

impl Default for ValueNoise {
    fn default() -> Self {
        ValueNoise::new(Self::DEFAULT_SEED)
    }
}

impl Noise1D for ValueNoise {
    fn sample(&self, x: f64, channel: u64) -> f64 {
        if !x.is_finite() {
            return 0.0;
        }
        let x0 = x.floor();
        let f = x - x0;
        let i = x0 as i64;
        let s = f * f * (3.0 - 2.0 * f);
        let a = self.lattice(i, channel);
        let b = self.lattice(i.wrapping_add(1), channel);
        a + (b - a) * s
    }
}
