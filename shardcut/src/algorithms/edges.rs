use std::collections::HashMap;
use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::geometry::hash::{edge_hash, unit_f64};
use crate::geometry::math::{frame_of, lerp};
use crate::geometry::noise::{Noise1D, ValueNoise};
use crate::model::{EdgeKey, Vec2};

/// Noise profile along a boundary edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeProfile {
    /// Enveloped sine with a per-edge phase.
    #[default]
    Wave,
    /// Enveloped value noise on a per-edge channel.
    Noise,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeParams {
    pub segments: i64,
    pub amplitude: f64,
    pub frequency: f64,
    pub profile: EdgeProfile,
}

// value noise needs a wider sampling span than the wave's phase to vary along an edge
const NOISE_SPAN: f64 = 40.0;

/// Taper that is zero at both endpoints.
#[inline]
pub fn envelope(t: f64) -> f64 {
    (PI * t).sin() * (0.8 + 0.2 * (TAU * t).sin())
}

/// Phase in [0, 2π) from the edge hash.
#[inline]
pub fn edge_phase(key: &EdgeKey) -> f64 {
    unit_f64(edge_hash(key)) * TAU
}

/// Subdivides `a -> b` and displaces interior samples along the left normal.
/// `a -> b` must already be in canonical order.
fn perturb_canonical(a: Vec2, b: Vec2, key: &EdgeKey, params: &EdgeParams, noise: &dyn Noise1D) -> Vec<Vec2> {
    if params.segments < 2 {
        return vec![a, b];
    }
    let n = params.segments as usize;
    let (_, normal, len) = frame_of(a, b);
    let phase = edge_phase(key);
    let channel = edge_hash(key);
    let mut pts = Vec::with_capacity(n + 1);
    pts.push(a);
    for i in 1..n {
        let t = i as f64 / n as f64;
        let p = lerp(a, b, t);
        let wave = match params.profile {
            EdgeProfile::Wave => (TAU * params.frequency * t + phase).sin(),
            EdgeProfile::Noise => noise.sample(t * params.frequency * NOISE_SPAN, channel),
        };
        let offset = if len > 0.0 { params.amplitude * envelope(t) * wave } else { 0.0 };
        pts.push(Vec2 { x: p.x + normal.x * offset, y: p.y + normal.y * offset });
    }
    pts.push(b);
    pts
}

/// Pass-scoped polyline memo keyed by canonical edge identity.
/// Each key is computed once; later queries copy the stored polyline.
pub struct EdgeCache {
    edges: HashMap<EdgeKey, Vec<Vec2>>,
    noise: Box<dyn Noise1D>,
}

impl Default for EdgeCache {
    fn default() -> Self {
        EdgeCache::new()
    }
}

impl EdgeCache {
    pub fn new() -> Self {
        EdgeCache::with_noise(Box::new(ValueNoise::default()))
    }

    pub fn with_noise(noise: Box<dyn Noise1D>) -> Self {
        EdgeCache { edges: HashMap::new(), noise }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn clear(&mut self) {
        self.edges.clear();
    }

    pub fn get(&self, key: &EdgeKey) -> Option<&[Vec2]> {
        self.edges.get(key).map(|v| v.as_slice())
    }

    /// Perturbed polyline from `p0` to `p1`. Identical (reversed) for `(p1, p0)`
    /// and for every later query in the pass.
    pub fn reconstruct(&mut self, p0: Vec2, p1: Vec2, params: &EdgeParams) -> Vec<Vec2> {
        let (key, forward) = EdgeKey::canonical(p0, p1);
        let noise = &self.noise;
        let stored = self.edges.entry(key).or_insert_with(|| {
            let (a, b) = if forward { (p0, p1) } else { (p1, p0) };
            perturb_canonical(a, b, &key, params, noise.as_ref())
        });
        let mut out = stored.clone();
        if !forward {
            out.reverse();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wavy() -> EdgeParams {
        EdgeParams { segments: 8, amplitude: 3.0, frequency: 1.5, profile: EdgeProfile::Wave }
    }

    #[test]
    fn reverse_query_is_reversed_polyline() {
        let mut cache = EdgeCache::new();
        let p0 = Vec2::new(50.0, 30.0);
        let p1 = Vec2::new(62.345678, 41.222222);
        let fwd = cache.reconstruct(p0, p1, &wavy());
        let mut bwd = cache.reconstruct(p1, p0, &wavy());
        bwd.reverse();
        assert_eq!(fwd, bwd);
        assert_eq!(cache.len(), 1);
        let (key, forward) = EdgeKey::canonical(p0, p1);
        assert!(forward);
        assert_eq!(cache.get(&key), Some(fwd.as_slice()));
        let (other, _) = EdgeKey::canonical(p0, Vec2::new(1.0, 1.0));
        assert!(cache.get(&other).is_none());
    }

    #[test]
    fn first_visitor_direction_does_not_matter() {
        let p0 = Vec2::new(50.0, 30.0);
        let p1 = Vec2::new(62.345678, 41.222222);
        let mut a = EdgeCache::new();
        let mut b = EdgeCache::new();
        let from_a = a.reconstruct(p0, p1, &wavy());
        let _ = b.reconstruct(p1, p0, &wavy());
        let from_b = b.reconstruct(p0, p1, &wavy());
        assert_eq!(from_a, from_b);
    }

    #[test]
    fn endpoints_fixed_and_interior_displaced() {
        let mut cache = EdgeCache::new();
        let p0 = Vec2::new(0.0, 10.0);
        let p1 = Vec2::new(100.0, 10.0);
        let pts = cache.reconstruct(p0, p1, &wavy());
        assert_eq!(pts.len(), 9);
        assert_eq!(pts[0], p0);
        assert_eq!(pts[8], p1);
        assert!(pts[1..8].iter().any(|p| (p.y - 10.0).abs() > 1e-9));
        for (i, p) in pts.iter().enumerate() {
            assert!((p.x - 12.5 * i as f64).abs() < 1e-9, "displacement must be along the normal");
            assert!((p.y - 10.0).abs() <= 3.0 + 1e-9);
        }
    }

    #[test]
    fn few_segments_return_raw_endpoints() {
        let mut cache = EdgeCache::new();
        let p = EdgeParams { segments: 1, ..wavy() };
        let pts = cache.reconstruct(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), &p);
        assert_eq!(pts, vec![Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)]);
    }

    #[test]
    fn zero_amplitude_is_straight_subdivision() {
        let mut cache = EdgeCache::new();
        let p = EdgeParams { amplitude: 0.0, ..wavy() };
        let pts = cache.reconstruct(Vec2::new(0.0, 0.0), Vec2::new(8.0, 8.0), &p);
        for (i, q) in pts.iter().enumerate() {
            assert!((q.x - i as f64).abs() < 1e-12 && (q.y - i as f64).abs() < 1e-12);
        }
    }

    #[test]
    fn noise_profile_is_symmetric_too() {
        let mut cache = EdgeCache::new();
        let p = EdgeParams { profile: EdgeProfile::Noise, ..wavy() };
        let a = Vec2::new(3.0, 90.0);
        let b = Vec2::new(40.0, 70.5);
        let fwd = cache.reconstruct(a, b, &p);
        let mut bwd = cache.reconstruct(b, a, &p);
        bwd.reverse();
        assert_eq!(fwd, bwd);
        assert!(fwd[1..fwd.len() - 1].iter().all(|q| q.x.is_finite() && q.y.is_finite()));
    }

    #[test]
    fn clear_drops_cached_edges() {
        let mut cache = EdgeCache::new();
        let _ = cache.reconstruct(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), &wavy());
        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
    }
}
