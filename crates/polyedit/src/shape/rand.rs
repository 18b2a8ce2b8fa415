//! Random polygon fixtures (radial jitter + replay tokens).
//!
//! Purpose
//! - Seed test levels and benchmarks with reproducible polygon
//!   fixtures. The sampler is parameterizable and deterministic per
//!   `(seed, index)` token.
//!
//! Model
//! - Start from `n` equally spaced angles on [0, 2π), add bounded
//!   angular and radial jitter, and emit the points in angle order.
//!   Sorted-by-angle radial points always form a simple (star-shaped)
//!   polygon, which is all an editor fixture needs; convexity is not
//!   required and not enforced.

use ::rand::rngs::StdRng;
use ::rand::{Rng, SeedableRng};
use nalgebra::Vector2;

use super::Polygon;

/// How many vertices a sampled fixture gets.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}
impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Sampler configuration for radial fixtures.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Per-vertex angular jitter, as a fraction of the even spacing
    /// 2π/n. Clamped to [0, 0.49] so vertex order stays monotone.
    pub angle_jitter_frac: f64,
    /// Relative radial jitter: each radius is `base_radius * (1 + u)`
    /// with `u` uniform in `[-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    /// Nominal fixture radius in local units.
    pub base_radius: f64,
    /// Apply a random global rotation to the whole fixture.
    pub random_phase: bool,
}
impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(8),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 60.0,
            random_phase: true,
        }
    }
}

/// Identifies one draw in a seeded stream, so any fixture can be
/// regenerated without replaying the ones before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing keeps the per-index streams decorrelated.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a random simple polygon fixture around the local origin.
pub fn draw_fixture_radial(cfg: RadialCfg, tok: ReplayToken) -> Polygon {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng).max(3);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.max(0.0);
    let r0 = cfg.base_radius.max(1e-9);
    let delta = 2.0 * std::f64::consts::PI / (n as f64);
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * 2.0 * std::f64::consts::PI
    } else {
        0.0
    };
    let mut angles: Vec<f64> = (0..n)
        .map(|k| {
            let base = phase + (k as f64) * delta;
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            base + jitter
        })
        .collect();
    angles.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let pts: Vec<Vector2<f64>> = angles
        .into_iter()
        .map(|th| {
            let u = (rng.gen::<f64>() * 2.0 - 1.0) * rj;
            let r = (1.0 + u).max(1e-6) * r0;
            Vector2::new(th.cos() * r, th.sin() * r)
        })
        .collect();
    // n >= 3 by construction.
    Polygon::new(&pts).expect("radial sampler emits at least 3 vertices")
}
