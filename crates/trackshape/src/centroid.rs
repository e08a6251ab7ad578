//! Centroids of geographic point clouds.
//!
//! - `arithmetic_centroid`: mean of (lon, lat) in a frame rotated onto the cloud,
//!   rotated back. A pivot estimate, not a spherical mean.
//! - `weighted_centroid`: the same, weight-averaged.
//! - `weighted_slerp_centroid`: weighted spherical mean, folded by pairwise slerp
//!   and refined on the tangent plane. Use this one for clouds with a large
//!   angular extent.
//!
//! The planar variants pick their frame from the (weighted) mean of unit vectors,
//! which keeps the cloud away from the antimeridian and the poles while the
//! mean is taken.

use nalgebra::Vector3;

use crate::error::ShapeError;
use crate::rotate::Rotator;
use crate::sphere::{exp_map, from_unit, log_map, slerp, to_unit};
use crate::types::{
    validate_points, validate_weighted, GeoPoint, ShapeCfg, Trajectory, WeightedGeoPoint,
};

/// Arithmetic centroid of a trajectory.
pub fn centroid(trajectory: &Trajectory) -> Result<GeoPoint, ShapeError> {
    arithmetic_centroid(trajectory.points())
}

/// Mean of longitude and latitude taken in a rotated frame centered on the cloud.
pub fn arithmetic_centroid(points: &[GeoPoint]) -> Result<GeoPoint, ShapeError> {
    validate_points(points, "arithmetic centroid")?;
    let weighted: Vec<(GeoPoint, f64)> = points.iter().map(|&p| (p, 1.0)).collect();
    Ok(planar_mean(&weighted, points.len() as f64))
}

/// Weight-averaged centroid. Total weight must be positive.
pub fn weighted_centroid(points: &[WeightedGeoPoint]) -> Result<GeoPoint, ShapeError> {
    let weighted = validate_weighted(points, "weighted centroid")?;
    let total = weighted.iter().map(|&(_, w)| w).sum();
    Ok(planar_mean(&weighted, total))
}

/// Weighted spherical mean with default tolerances.
pub fn weighted_slerp_centroid(points: &[WeightedGeoPoint]) -> Result<GeoPoint, ShapeError> {
    weighted_slerp_centroid_with(points, &ShapeCfg::default())
}

/// Weighted spherical mean.
///
/// Only relative weights matter. Points are first put into a canonical order (weight descending, then
/// longitude, latitude) so the result does not depend on input order. The
/// fold `c ← slerp(c, pᵢ, wᵢ / Wᵢ)` gives the starting estimate; fixed-point
/// steps `c ← exp_c(Σ wᵢ log_c(pᵢ) / W)` then converge to the weighted
/// spherical (Karcher) mean.
pub fn weighted_slerp_centroid_with(
    points: &[WeightedGeoPoint],
    cfg: &ShapeCfg,
) -> Result<GeoPoint, ShapeError> {
    let mut items = validate_weighted(points, "slerp centroid")?;
    items.sort_by(|(p, w), (q, v)| {
        v.total_cmp(w)
            .then_with(|| p.lon().total_cmp(&q.lon()))
            .then_with(|| p.lat().total_cmp(&q.lat()))
    });
    let units: Vec<(f64, Vector3<f64>)> = items.iter().map(|&(p, w)| (w, to_unit(p))).collect();

    let (w0, v0) = units[0];
    let mut acc = v0;
    let mut running = w0;
    for (w, v) in &units[1..] {
        running += w;
        if let Some(next) = slerp(&acc, v, w / running) {
            acc = next;
        }
    }

    let mut converged = false;
    for _ in 0..cfg.max_iterations {
        let mut step = Vector3::zeros();
        for (w, v) in &units {
            step += log_map(&acc, v) * *w;
        }
        step /= running;
        acc = exp_map(&acc, &step);
        if step.norm() < cfg.eps_step {
            converged = true;
            break;
        }
    }
    if !converged {
        tracing::debug!(
            points = units.len(),
            max_iterations = cfg.max_iterations,
            "spherical mean refinement stopped at iteration cap"
        );
    }
    Ok(from_unit(acc))
}

/// Weighted mean of (lon, lat) in a frame centered on the weighted unit-vector mean.
///
/// `weighted` holds only positive weights; `total` is their (finite) sum.
fn planar_mean(weighted: &[(GeoPoint, f64)], total: f64) -> GeoPoint {
    let mut sum = Vector3::zeros();
    for &(p, w) in weighted {
        sum += to_unit(p) * w;
    }
    // A vanishing mean vector (e.g. two antipodal points) leaves no preferred
    // direction; fall back to the first point.
    let pivot = if sum.norm() <= 1e-12 * total {
        weighted[0].0
    } else {
        from_unit(sum)
    };
    let rot = Rotator::new(pivot);
    let (mut lon, mut lat) = (0.0, 0.0);
    for &(p, w) in weighted {
        let q = rot.rotate(p);
        lon += q.lon() * w;
        lat += q.lat() * w;
    }
    rot.unrotate(GeoPoint::new(lon / total, lat / total))
}
