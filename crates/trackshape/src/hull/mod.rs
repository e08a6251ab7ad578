//! Convex hulls of geographic point clouds.
//!
//! Purpose
//! - Compute the convex hull of a trajectory on the sphere without being
//!   fooled by the antimeridian or by clouds that wrap around a pole.
//!
//! Strategy (decided up front by `select_strategy`)
//! - `Standard`: rotate the cloud so the axis of its smallest enclosing cap
//!   sits at (0°, 0°), project gnomonically (great circles → lines) and run
//!   Andrew's monotone chain. This is exact for every cloud inside an open
//!   hemisphere, however wide.
//! - A cloud inside no open hemisphere has the whole sphere as its spherical
//!   hull. Its vertices are then only a planar outline in the rotated (lon, lat)
//!   chart around the arithmetic centroid (`Hull::wraps_sphere`).
//! - `PoleEnclosing(pole)`: all non-pole points in one open hemisphere and no
//!   longitude gap of 180° or more. This is exactly when the pole lies inside
//!   the spherical hull. A longitude-ordered sweep builds the envelope and
//!   the pole is appended as the closing vertex.
//!
//! Hull vertices are the original input points (never re-derived from rotated
//! coordinates), so hulling `hull.vertices()` again reproduces the same vertex set.

mod cap;
mod planar;
mod polar;
mod types;

pub use types::{Hull, HullFrame, HullStrategy, Pole, Projection};

use crate::centroid::arithmetic_centroid;
use crate::error::ShapeError;
use crate::sphere::from_unit;
use crate::types::{validate_points, GeoPoint, ShapeCfg, Trajectory};

/// Convex hull of a trajectory with default tolerances.
pub fn build_convex_hull(trajectory: &Trajectory) -> Result<Hull, ShapeError> {
    build_convex_hull_with(trajectory.points(), &ShapeCfg::default())
}

/// Convex hull of a point set.
///
/// Errors: empty input, non-finite coordinates, latitude outside [−90°, 90°].
pub fn build_convex_hull_with(points: &[GeoPoint], cfg: &ShapeCfg) -> Result<Hull, ShapeError> {
    validate_points(points, "convex hull")?;
    let strategy = select_strategy(points);
    tracing::debug!(points = points.len(), ?strategy, "convex hull");
    let hull = match strategy {
        HullStrategy::PoleEnclosing(pole) => {
            let (vertices, frame) = polar::pole_sweep(points, pole, cfg.eps_planar);
            Hull {
                vertices,
                strategy,
                frame,
            }
        }
        HullStrategy::Standard => {
            let frame = match cap::enclosing_cap(points) {
                Some(cap) => HullFrame::new(from_unit(cap.axis), Projection::Gnomonic),
                None => {
                    tracing::debug!(points = points.len(), "cloud spans no open hemisphere");
                    HullFrame::new(arithmetic_centroid(points)?, Projection::Equirectangular)
                }
            };
            let projected = points.iter().map(|&p| (frame.project(p), p)).collect();
            let vertices = planar::monotone_chain(projected, cfg.eps_planar);
            if vertices.len() < 3 {
                tracing::debug!(vertices = vertices.len(), "degenerate hull");
            }
            Hull {
                vertices,
                strategy,
                frame,
            }
        }
    };
    Ok(hull)
}

/// Decide between the standard and pole-enclosing algorithms.
///
/// Pole-enclosing iff every non-pole point is strictly in one hemisphere and the
/// largest circular gap between sorted longitudes is below 180°.
pub fn select_strategy(points: &[GeoPoint]) -> HullStrategy {
    let mut lons: Vec<f64> = Vec::with_capacity(points.len());
    let (mut north, mut south) = (true, true);
    for p in points.iter().filter(|p| !p.is_pole()) {
        north &= p.lat() > 0.0;
        south &= p.lat() < 0.0;
        lons.push(p.lon());
    }
    let pole = match (north, south) {
        _ if lons.is_empty() => return HullStrategy::Standard,
        (true, false) => Pole::North,
        (false, true) => Pole::South,
        _ => return HullStrategy::Standard,
    };
    lons.sort_by(f64::total_cmp);
    lons.dedup();
    if lons.len() < 3 {
        return HullStrategy::Standard;
    }
    let wrap_gap = lons[0] + 360.0 - lons[lons.len() - 1];
    let max_gap = lons
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold(wrap_gap, f64::max);
    if max_gap < 180.0 - 1e-9 {
        HullStrategy::PoleEnclosing(pole)
    } else {
        HullStrategy::Standard
    }
}
