//! Coordinate rotation about a chosen center.
//!
//! `Rotator::new(center)` builds the proper rotation that carries `center` to
//! (0°, 0°): first about the polar axis by −lon, then about the y-axis by +lat.
//! Great-circle distances and angles are preserved; `unrotate` is the exact
//! algebraic inverse (transpose) of `rotate`.
//!
//! Convention: a center on a pole has no meaningful longitude, so 0° is used.

use nalgebra::{Rotation3, Vector3};

use crate::sphere::{from_unit, to_unit};
use crate::types::GeoPoint;

/// Rotation carrying a center point to (0°, 0°), plus its inverse.
#[derive(Clone, Copy, Debug)]
pub struct Rotator {
    center: GeoPoint,
    forward: Rotation3<f64>,
}

impl Rotator {
    pub fn new(center: GeoPoint) -> Self {
        let lon = if center.is_pole() { 0.0 } else { center.lon() };
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), -lon.to_radians());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), center.lat().to_radians());
        Self {
            center,
            forward: ry * rz,
        }
    }

    #[inline]
    pub fn center(&self) -> GeoPoint {
        self.center
    }

    #[inline]
    pub fn rotate(&self, p: GeoPoint) -> GeoPoint {
        from_unit(self.rotate_unit(&to_unit(p)))
    }

    #[inline]
    pub fn unrotate(&self, p: GeoPoint) -> GeoPoint {
        from_unit(self.unrotate_unit(&to_unit(p)))
    }

    #[inline]
    pub(crate) fn rotate_unit(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.forward * v
    }

    #[inline]
    pub(crate) fn unrotate_unit(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.forward.inverse_transform_vector(v)
    }
}

#[inline]
pub fn rotate_point(p: GeoPoint, center: GeoPoint) -> GeoPoint {
    Rotator::new(center).rotate(p)
}

#[inline]
pub fn unrotate_point(p: GeoPoint, center: GeoPoint) -> GeoPoint {
    Rotator::new(center).unrotate(p)
}

/// Re-express `points` relative to `center` (moved to 0°, 0°).
pub fn rotate_points(points: &[GeoPoint], center: GeoPoint) -> Vec<GeoPoint> {
    let r = Rotator::new(center);
    points.iter().map(|&p| r.rotate(p)).collect()
}

/// Inverse of `rotate_points` for the same `center`.
pub fn unrotate_points(points: &[GeoPoint], center: GeoPoint) -> Vec<GeoPoint> {
    let r = Rotator::new(center);
    points.iter().map(|&p| r.unrotate(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::central_angle;

    #[test]
    fn center_lands_on_origin() {
        for &(lon, lat) in &[(0.0, 0.0), (37.0, -12.0), (-179.5, 64.0), (180.0, 5.0)] {
            let c = GeoPoint::new(lon, lat);
            let q = Rotator::new(c).rotate(c);
            assert!(q.lon().abs() < 1e-9, "{c:?} -> {q:?}");
            assert!(q.lat().abs() < 1e-9, "{c:?} -> {q:?}");
        }
    }

    #[test]
    fn pole_center_uses_zero_meridian() {
        let a = Rotator::new(GeoPoint::new(45.0, 90.0));
        let b = Rotator::new(GeoPoint::north_pole());
        let p = GeoPoint::new(10.0, 80.0);
        let (qa, qb) = (a.rotate(p), b.rotate(p));
        assert_eq!(qa, qb);
        let origin = a.rotate(GeoPoint::north_pole());
        assert!(origin.lon().abs() < 1e-9 && origin.lat().abs() < 1e-9);
    }

    #[test]
    fn antimeridian_cloud_becomes_contiguous() {
        let pts = [
            GeoPoint::new(179.0, 0.0),
            GeoPoint::new(-179.0, 0.0),
            GeoPoint::new(180.0, 1.0),
        ];
        let rot = rotate_points(&pts, GeoPoint::new(180.0, 0.0));
        for q in &rot {
            assert!(q.lon().abs() < 1.5, "{q:?}");
        }
    }

    #[test]
    fn distances_preserved_and_roundtrip() {
        let pts = [
            GeoPoint::new(-73.9, 40.7),
            GeoPoint::new(2.35, 48.85),
            GeoPoint::new(139.7, 35.7),
        ];
        let c = GeoPoint::new(20.0, 30.0);
        let rot = rotate_points(&pts, c);
        let d0 = central_angle(&to_unit(pts[0]), &to_unit(pts[2]));
        let d1 = central_angle(&to_unit(rot[0]), &to_unit(rot[2]));
        assert!((d0 - d1).abs() < 1e-12);
        assert_eq!(rot[1], rotate_point(pts[1], c));
        let back = unrotate_points(&rot, c);
        for (p, q) in pts.iter().zip(back.iter()) {
            assert!((p.lon() - q.lon()).abs() < 1e-9);
            assert!((p.lat() - q.lat()).abs() < 1e-9);
        }
    }
}
