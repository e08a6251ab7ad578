//! Scalar shape descriptors of a trajectory.
//!
//! Purpose
//! - Area, eccentricity, aspect ratio and radius of gyration, each a pure
//!   function of the trajectory. Every call re-runs the hull/centroid pipeline;
//!   nothing is cached.
//!
//! Conventions
//! - Areas in km², distances in km (sphere radius from `ShapeCfg`, mean Earth
//!   radius by default). Eccentricity and aspect ratio are unitless.
//! - Area is the spherical-excess sum over hull edges, not a planar shoelace.
//!   A cloud inside no open hemisphere covers the whole sphere (4πR²).
//! - Eccentricity and aspect ratio come from the principal axes of the point
//!   cloud's second-moment matrix on the tangent plane at its spherical mean.
//! - The radius must be finite and positive (`ShapeError::InvalidRadius`).
//! - Degenerate clouds never error: one point → area 0, eccentricity 0,
//!   aspect ratio 1, radius of gyration 0.

mod axes;

use crate::centroid::{arithmetic_centroid, weighted_slerp_centroid_with};
use crate::error::ShapeError;
use crate::hull::{build_convex_hull_with, HullStrategy};
use crate::sphere::{central_angle, signed_excess, to_unit};
use crate::types::{
    validate_points, validate_weighted, GeoPoint, ShapeCfg, Trajectory, WeightedGeoPoint,
};

/// Spherical area enclosed by the convex hull (km²).
pub fn hull_area(trajectory: &Trajectory) -> Result<f64, ShapeError> {
    hull_area_with(trajectory, &ShapeCfg::default())
}

pub fn hull_area_with(trajectory: &Trajectory, cfg: &ShapeCfg) -> Result<f64, ShapeError> {
    cfg.validate()?;
    let hull = build_convex_hull_with(trajectory.points(), cfg)?;
    let r = cfg.earth_radius_km;
    if hull.is_degenerate() {
        return Ok(0.0);
    }
    if hull.wraps_sphere() {
        return Ok(4.0 * std::f64::consts::PI * r * r);
    }
    // Fan from the frame center: the pole for pole-enclosing hulls, which sits
    // inside the ring. Signed excess keeps the sum exact even when the
    // reference lies outside the polygon.
    let reference = to_unit(hull.frame().center());
    let ring: Vec<_> = hull.ring().iter().map(|&p| to_unit(p)).collect();
    let n = ring.len();
    let excess: f64 = (0..n)
        .map(|i| signed_excess(&reference, &ring[i], &ring[(i + 1) % n]))
        .sum();
    Ok(excess.abs() * r * r)
}

/// Eccentricity of the best-fit ellipse: √(1 − (b/a)²), in [0, 1].
pub fn hull_eccentricity(trajectory: &Trajectory) -> Result<f64, ShapeError> {
    hull_eccentricity_with(trajectory, &ShapeCfg::default())
}

pub fn hull_eccentricity_with(trajectory: &Trajectory, cfg: &ShapeCfg) -> Result<f64, ShapeError> {
    validate_points(trajectory.points(), "eccentricity")?;
    let (a, b) = axes::principal_axes(trajectory.points(), cfg)?;
    if a <= cfg.axis_floor {
        return Ok(0.0);
    }
    let ratio = b / a;
    Ok((1.0 - ratio * ratio).max(0.0).sqrt())
}

/// Major over minor principal axis, ≥ 1. The minor axis is floored at
/// `ShapeCfg::axis_floor` so line-like clouds give a large finite value.
pub fn hull_aspect_ratio(trajectory: &Trajectory) -> Result<f64, ShapeError> {
    hull_aspect_ratio_with(trajectory, &ShapeCfg::default())
}

pub fn hull_aspect_ratio_with(trajectory: &Trajectory, cfg: &ShapeCfg) -> Result<f64, ShapeError> {
    validate_points(trajectory.points(), "aspect ratio")?;
    let (a, b) = axes::principal_axes(trajectory.points(), cfg)?;
    if a <= cfg.axis_floor {
        return Ok(1.0);
    }
    Ok(a / b.max(cfg.axis_floor))
}

/// RMS great-circle distance (km) of the points from their spherical mean.
pub fn radius_of_gyration(trajectory: &Trajectory) -> Result<f64, ShapeError> {
    radius_of_gyration_with(trajectory, &ShapeCfg::default())
}

pub fn radius_of_gyration_with(trajectory: &Trajectory, cfg: &ShapeCfg) -> Result<f64, ShapeError> {
    validate_points(trajectory.points(), "radius of gyration")?;
    radius_of_gyration_weighted_with(&trajectory.unit_weighted(), cfg)
}

/// √(Σ wᵢdᵢ² / Σ wᵢ) about the weighted spherical mean (km). Only relative
/// weights matter.
pub fn radius_of_gyration_weighted(points: &[WeightedGeoPoint]) -> Result<f64, ShapeError> {
    radius_of_gyration_weighted_with(points, &ShapeCfg::default())
}

pub fn radius_of_gyration_weighted_with(
    points: &[WeightedGeoPoint],
    cfg: &ShapeCfg,
) -> Result<f64, ShapeError> {
    cfg.validate()?;
    let weighted = validate_weighted(points, "radius of gyration")?;
    let center = to_unit(weighted_slerp_centroid_with(points, cfg)?);
    let (mut sum, mut total) = (0.0, 0.0);
    for &(p, w) in &weighted {
        let d = central_angle(&center, &to_unit(p));
        sum += w * d * d;
        total += w;
    }
    Ok((sum / total).sqrt() * cfg.earth_radius_km)
}

/// Largest great-circle distance (km) from `center` to any point.
pub fn max_distance_from(points: &[GeoPoint], center: GeoPoint) -> Result<f64, ShapeError> {
    max_distance_from_with(points, center, &ShapeCfg::default())
}

pub fn max_distance_from_with(
    points: &[GeoPoint],
    center: GeoPoint,
    cfg: &ShapeCfg,
) -> Result<f64, ShapeError> {
    cfg.validate()?;
    validate_points(points, "max distance")?;
    validate_points(&[center], "max distance center")?;
    let c = to_unit(center);
    let max = points
        .iter()
        .map(|&p| central_angle(&c, &to_unit(p)))
        .fold(0.0, f64::max);
    Ok(max * cfg.earth_radius_km)
}

/// All descriptors of one trajectory.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeSummary {
    pub points: usize,
    pub centroid: GeoPoint,
    pub hull_vertices: usize,
    pub strategy: HullStrategy,
    pub area_km2: f64,
    pub eccentricity: f64,
    pub aspect_ratio: f64,
    pub radius_of_gyration_km: f64,
}

pub fn shape_summary(trajectory: &Trajectory) -> Result<ShapeSummary, ShapeError> {
    shape_summary_with(trajectory, &ShapeCfg::default())
}

/// Compute every descriptor; each one runs its own pipeline.
pub fn shape_summary_with(trajectory: &Trajectory, cfg: &ShapeCfg) -> Result<ShapeSummary, ShapeError> {
    cfg.validate()?;
    let hull = build_convex_hull_with(trajectory.points(), cfg)?;
    Ok(ShapeSummary {
        points: trajectory.len(),
        centroid: arithmetic_centroid(trajectory.points())?,
        hull_vertices: hull.vertex_count(),
        strategy: hull.strategy(),
        area_km2: hull_area_with(trajectory, cfg)?,
        eccentricity: hull_eccentricity_with(trajectory, cfg)?,
        aspect_ratio: hull_aspect_ratio_with(trajectory, cfg)?,
        radius_of_gyration_km: radius_of_gyration_with(trajectory, cfg)?,
    })
}
