//! Random trajectories on the sphere (elliptical clouds + replay tokens).
//!
//! Purpose
//! - Deterministic sampler for point clouds used by property tests, benches
//!   and the CLI smoke runs.
//!
//! Model
//! - Points are drawn uniformly in an ellipse on the tangent plane at `center`
//!   (semi-axes `radius_deg` and `radius_deg * anisotropy`, major axis along
//!   `heading`) and mapped onto the sphere with the exponential map, so the
//!   cloud has the same shape wherever it is centered.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::sphere::{exp_map, from_unit, tangent_basis, to_unit};
use crate::types::{GeoPoint, Trajectory};

/// Point count distribution.
#[derive(Clone, Copy, Debug)]
pub enum PointCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}
impl PointCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            PointCount::Fixed(n) => n.max(1),
            PointCount::Uniform { min, max } => {
                let lo = min.max(1);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Elliptical-cloud sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct TrajectoryCfg {
    pub center: GeoPoint,
    pub point_count: PointCount,
    /// Major semi-axis as an angle (degrees). Clamped to (0, 90].
    pub radius_deg: f64,
    /// Minor/major axis ratio, clamped to [0, 1]. 0 gives points on a geodesic.
    pub anisotropy: f64,
    /// Major-axis direction in degrees counterclockwise from east.
    pub heading_deg: f64,
    /// Ignore `heading_deg` and draw a uniform random heading.
    pub random_heading: bool,
}
impl Default for TrajectoryCfg {
    fn default() -> Self {
        Self {
            center: GeoPoint::new(0.0, 0.0),
            point_count: PointCount::Fixed(32),
            radius_deg: 1.0,
            anisotropy: 0.5,
            heading_deg: 0.0,
            random_heading: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        StdRng::seed_from_u64(mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15))))
    }
}

/// Draw a random elliptical cloud around `cfg.center`.
pub fn draw_trajectory(cfg: TrajectoryCfg, tok: ReplayToken) -> Trajectory {
    let mut rng = tok.to_std_rng();
    let n = cfg.point_count.sample(&mut rng);
    let major = cfg.radius_deg.clamp(1e-9, 90.0).to_radians();
    let minor = major * cfg.anisotropy.clamp(0.0, 1.0);
    let heading = if cfg.random_heading {
        rng.gen::<f64>() * std::f64::consts::TAU
    } else {
        cfg.heading_deg.to_radians()
    };
    let c = to_unit(cfg.center);
    let (east, north) = tangent_basis(&c);
    let (sh, ch) = heading.sin_cos();
    let u_axis = east * ch + north * sh;
    let v_axis = north * ch - east * sh;
    (0..n)
        .map(|_| {
            // Uniform in the unit disk, then stretched.
            let r = rng.gen::<f64>().sqrt();
            let th = rng.gen::<f64>() * std::f64::consts::TAU;
            let t = u_axis * (r * th.cos() * major) + v_axis * (r * th.sin() * minor);
            from_unit(exp_map(&c, &t))
        })
        .collect()
}
