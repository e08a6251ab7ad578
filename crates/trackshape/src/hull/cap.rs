//! Smallest spherical cap around a point cloud.
//!
//! A cloud lies in an open hemisphere iff its smallest enclosing cap is
//! narrower than a hemisphere. The cap axis is then the gnomonic pivot that
//! keeps every point farthest from the projection horizon. Built incrementally
//! (Welzl style) over a fixed pseudo-random order: expected linear time.

use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::sphere::to_unit;
use crate::types::GeoPoint;

/// Smallest cosine to the axis that still counts as inside the open hemisphere.
const HEMISPHERE_EPS: f64 = 1e-9;
/// Membership slack while the cap grows.
const SLACK: f64 = 1e-12;
const ORDER_SEED: u64 = 0x5eed_ca95;

/// Cap `{x : x·axis ≥ cos_radius}` on the unit sphere.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cap {
    pub(crate) axis: Vector3<f64>,
    pub(crate) cos_radius: f64,
}

impl Cap {
    fn around(a: &Vector3<f64>) -> Self {
        Self {
            axis: *a,
            cos_radius: 1.0,
        }
    }

    #[inline]
    fn contains(&self, p: &Vector3<f64>) -> bool {
        p.dot(&self.axis) >= self.cos_radius - SLACK
    }
}

/// Cap with `a` and `b` diametrically opposite on its rim. `None` for antipodes.
fn diametral(a: &Vector3<f64>, b: &Vector3<f64>) -> Option<Cap> {
    let mid = a + b;
    if mid.norm_squared() == 0.0 {
        return None;
    }
    let axis = mid.normalize();
    Some(Cap {
        axis,
        cos_radius: a.dot(&axis),
    })
}

/// Smaller of the two caps with `a`, `b`, `c` on the rim.
fn circumscribed(a: &Vector3<f64>, b: &Vector3<f64>, c: &Vector3<f64>) -> Option<Cap> {
    let normal = (b - a).cross(&(c - a));
    if normal.norm_squared() == 0.0 {
        // Repeated points: the widest pair cap holds all three.
        return [diametral(a, b), diametral(a, c), diametral(b, c)]
            .into_iter()
            .flatten()
            .min_by(|x, y| x.cos_radius.total_cmp(&y.cos_radius));
    }
    let mut axis = normal.normalize();
    if axis.dot(a) < 0.0 {
        axis = -axis;
    }
    Some(Cap {
        axis,
        cos_radius: axis.dot(a),
    })
}

/// Smallest cap containing every point, or `None` when no open hemisphere
/// holds the whole cloud (including the empty cloud).
pub(crate) fn enclosing_cap(points: &[GeoPoint]) -> Option<Cap> {
    let mut units: Vec<Vector3<f64>> = points.iter().map(|&p| to_unit(p)).collect();
    units.shuffle(&mut StdRng::seed_from_u64(ORDER_SEED));
    let mut cap = Cap::around(units.first()?);
    for i in 1..units.len() {
        if cap.contains(&units[i]) {
            continue;
        }
        cap = Cap::around(&units[i]);
        for j in 0..i {
            if cap.contains(&units[j]) {
                continue;
            }
            cap = diametral(&units[i], &units[j])?;
            for k in 0..j {
                if !cap.contains(&units[k]) {
                    cap = circumscribed(&units[i], &units[j], &units[k])?;
                }
            }
        }
    }
    let min_cos = units
        .iter()
        .map(|u| u.dot(&cap.axis))
        .fold(f64::INFINITY, f64::min);
    (min_cos > HEMISPHERE_EPS).then_some(cap)
}
