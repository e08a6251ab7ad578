//! Basic geographic value types and tolerances.
//!
//! - `GeoPoint`: longitude/latitude in degrees, longitude wrapped to (−180°, 180°].
//! - `WeightedGeoPoint`: a point plus a non-negative weight.
//! - `Trajectory`: ordered point sequence; the geometry treats it as a cloud.
//! - `ShapeCfg`: Earth radius and numeric tolerances shared by all operations.
//!
//! Validation (finiteness, latitude range, weights) happens at the operation
//! boundary, not in the constructors. See `validate_points`.

use crate::error::ShapeError;

/// Mean Earth radius (IUGG) in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Points closer than this to ±90° latitude are treated as the pole itself.
pub(crate) const POLE_EPS_DEG: f64 = 1e-12;

/// A longitude/latitude pair in degrees.
///
/// Invariants:
/// - Longitude lies in (−180°, 180°] for finite input (wrapped on construction).
/// - Latitude is stored as given; operations reject values outside [−90°, 90°].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    lon: f64,
    lat: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon: wrap_lon(lon),
            lat,
        }
    }
    #[inline]
    pub fn lon(&self) -> f64 {
        self.lon
    }
    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }
    #[inline]
    pub fn north_pole() -> Self {
        Self { lon: 0.0, lat: 90.0 }
    }
    #[inline]
    pub fn south_pole() -> Self {
        Self {
            lon: 0.0,
            lat: -90.0,
        }
    }
    /// True when the point sits on either pole (longitude is meaningless there).
    #[inline]
    pub fn is_pole(&self) -> bool {
        self.lat.abs() >= 90.0 - POLE_EPS_DEG
    }
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
    /// Attach a weight.
    #[inline]
    pub fn with_weight(self, weight: f64) -> WeightedGeoPoint {
        WeightedGeoPoint::new(self, weight)
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lon, lat): (f64, f64)) -> Self {
        GeoPoint::new(lon, lat)
    }
}

/// Wrap a longitude into (−180°, 180°]. In-range values are returned untouched.
pub(crate) fn wrap_lon(lon: f64) -> f64 {
    if !lon.is_finite() || (lon > -180.0 && lon <= 180.0) {
        return lon;
    }
    let x = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if x <= -180.0 {
        x + 360.0
    } else {
        x
    }
}

/// A point with a non-negative weight. Zero weight means "no influence".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedGeoPoint {
    pub point: GeoPoint,
    pub weight: f64,
}

impl WeightedGeoPoint {
    #[inline]
    pub fn new(point: GeoPoint, weight: f64) -> Self {
        Self { point, weight }
    }
}

/// Ordered sequence of points. Order is temporal but irrelevant to the shape metrics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    points: Vec<GeoPoint>,
}

impl Trajectory {
    #[inline]
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    /// Build from `(lon, lat)` pairs in degrees.
    pub fn from_lon_lat(coords: &[(f64, f64)]) -> Self {
        coords.iter().copied().map(GeoPoint::from).collect()
    }

    #[inline]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, GeoPoint> {
        self.points.iter()
    }

    /// Every point with unit weight.
    pub fn unit_weighted(&self) -> Vec<WeightedGeoPoint> {
        self.points.iter().map(|p| p.with_weight(1.0)).collect()
    }
}

impl From<Vec<GeoPoint>> for Trajectory {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }
}

impl FromIterator<GeoPoint> for Trajectory {
    fn from_iter<I: IntoIterator<Item = GeoPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a GeoPoint;
    type IntoIter = std::slice::Iter<'a, GeoPoint>;
    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Shape configuration (radius and tolerances).
#[derive(Clone, Copy, Debug)]
pub struct ShapeCfg {
    /// Sphere radius used to scale areas and distances (km by default).
    pub earth_radius_km: f64,
    /// Planar dedup/collinearity slack in hull frame units.
    pub eps_planar: f64,
    /// Floor for the minor principal axis (radians) when the cloud is a line.
    pub axis_floor: f64,
    /// Stop the spherical-mean refinement once a step is below this (radians).
    pub eps_step: f64,
    /// Iteration cap for the spherical-mean refinement.
    pub max_iterations: usize,
}

impl Default for ShapeCfg {
    fn default() -> Self {
        Self {
            earth_radius_km: EARTH_RADIUS_KM,
            eps_planar: 1e-12,
            axis_floor: 1e-12,
            eps_step: 1e-15,
            max_iterations: 256,
        }
    }
}

impl ShapeCfg {
    /// Reject a radius that would turn areas and distances into NaN, zero or
    /// negative values.
    pub fn validate(&self) -> Result<(), ShapeError> {
        let radius = self.earth_radius_km;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ShapeError::InvalidRadius { radius });
        }
        Ok(())
    }
}

/// Reject empty sets, non-finite coordinates and latitudes outside [−90°, 90°].
pub(crate) fn validate_points(points: &[GeoPoint], what: &'static str) -> Result<(), ShapeError> {
    if points.is_empty() {
        return Err(ShapeError::EmptyInput { what });
    }
    for (index, p) in points.iter().enumerate() {
        check_point(index, p)?;
    }
    Ok(())
}

/// As `validate_points`, plus non-negative finite weights with a positive total.
///
/// Returns the points with positive weight, each weight divided by the largest
/// one. Relative weights stay in (0, 1] and their sum in [1, n], so totals stay
/// finite even when the raw weights would overflow when added.
pub(crate) fn validate_weighted(
    points: &[WeightedGeoPoint],
    what: &'static str,
) -> Result<Vec<(GeoPoint, f64)>, ShapeError> {
    if points.is_empty() {
        return Err(ShapeError::EmptyInput { what });
    }
    let mut max = 0.0f64;
    for (index, wp) in points.iter().enumerate() {
        check_point(index, &wp.point)?;
        if !wp.weight.is_finite() || wp.weight < 0.0 {
            return Err(ShapeError::InvalidWeight {
                index,
                weight: wp.weight,
            });
        }
        max = max.max(wp.weight);
    }
    if max <= 0.0 {
        return Err(ShapeError::ZeroTotalWeight);
    }
    Ok(points
        .iter()
        .filter(|wp| wp.weight > 0.0)
        .map(|wp| (wp.point, wp.weight / max))
        .collect())
}

fn check_point(index: usize, p: &GeoPoint) -> Result<(), ShapeError> {
    if !p.is_finite() {
        return Err(ShapeError::NonFinite { index });
    }
    if p.lat().abs() > 90.0 {
        return Err(ShapeError::LatitudeOutOfRange {
            index,
            lat: p.lat(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longitude_wraps_into_half_open_range() {
        assert_eq!(GeoPoint::new(180.0, 0.0).lon(), 180.0);
        assert_eq!(GeoPoint::new(-180.0, 0.0).lon(), 180.0);
        assert!((GeoPoint::new(190.0, 0.0).lon() + 170.0).abs() < 1e-12);
        assert!((GeoPoint::new(-190.0, 0.0).lon() - 170.0).abs() < 1e-12);
        assert!((GeoPoint::new(540.0, 0.0).lon() - 180.0).abs() < 1e-12);
        assert_eq!(GeoPoint::new(12.5, 3.0).lon(), 12.5);
    }

    #[test]
    fn validation_rejects_bad_input() {
        assert_eq!(
            validate_points(&[], "test"),
            Err(ShapeError::EmptyInput { what: "test" })
        );
        let bad = [GeoPoint::new(0.0, 0.0), GeoPoint::new(f64::NAN, 1.0)];
        assert_eq!(
            validate_points(&bad, "test"),
            Err(ShapeError::NonFinite { index: 1 })
        );
        let inf = [GeoPoint::new(0.0, f64::INFINITY)];
        assert!(matches!(
            validate_points(&inf, "test"),
            Err(ShapeError::NonFinite { index: 0 })
        ));
        let high = [GeoPoint::new(0.0, 91.0)];
        assert!(matches!(
            validate_points(&high, "test"),
            Err(ShapeError::LatitudeOutOfRange { index: 0, .. })
        ));
    }

    #[test]
    fn weighted_validation() {
        let p = GeoPoint::new(1.0, 2.0);
        assert_eq!(
            validate_weighted(&[p.with_weight(0.0), p.with_weight(0.0)], "w"),
            Err(ShapeError::ZeroTotalWeight)
        );
        assert!(matches!(
            validate_weighted(&[p.with_weight(-1.0)], "w"),
            Err(ShapeError::InvalidWeight { index: 0, .. })
        ));
        let scaled = validate_weighted(&[p.with_weight(0.0), p.with_weight(2.5)], "w").unwrap();
        assert_eq!(scaled, vec![(p, 1.0)]);
    }

    #[test]
    fn radius_must_be_finite_and_positive() {
        assert_eq!(ShapeCfg::default().validate(), Ok(()));
        for radius in [0.0, -6371.0, f64::NAN, f64::INFINITY] {
            let cfg = ShapeCfg {
                earth_radius_km: radius,
                ..ShapeCfg::default()
            };
            assert!(
                matches!(cfg.validate(), Err(ShapeError::InvalidRadius { .. })),
                "radius {radius} accepted"
            );
        }
    }

    #[test]
    fn huge_weights_are_scaled_not_summed() {
        let a = GeoPoint::new(1.0, 2.0);
        let b = GeoPoint::new(3.0, 4.0);
        let scaled =
            validate_weighted(&[a.with_weight(f64::MAX), b.with_weight(f64::MAX / 4.0)], "w").unwrap();
        assert_eq!(scaled, vec![(a, 1.0), (b, 0.25)]);
        let total: f64 = scaled.iter().map(|&(_, w)| w).sum();
        assert!(total.is_finite());
    }
}
