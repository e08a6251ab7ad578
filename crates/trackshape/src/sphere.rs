//! Unit-sphere primitives: conversions, distances, slerp, tangent maps.
//!
//! All angles here are radians on the unit sphere; callers scale by the
//! configured radius. Unit vectors use the usual Earth-centered frame:
//! x through (0°, 0°), y through (90°E, 0°), z through the North Pole.

use nalgebra::Vector3;

use crate::types::GeoPoint;

/// Below this, vectors are treated as zero / angles as identical.
const TINY: f64 = 1e-15;

#[inline]
pub(crate) fn to_unit(p: GeoPoint) -> Vector3<f64> {
    let lon = p.lon().to_radians();
    let lat = p.lat().to_radians();
    let (sl, cl) = lat.sin_cos();
    Vector3::new(cl * lon.cos(), cl * lon.sin(), sl)
}

/// Inverse of `to_unit`; `v` need not be normalized. At the poles longitude is 0°.
#[inline]
pub(crate) fn from_unit(v: Vector3<f64>) -> GeoPoint {
    let h = v.x.hypot(v.y);
    let lat = v.z.atan2(h).to_degrees();
    let lon = if h == 0.0 {
        0.0
    } else {
        v.y.atan2(v.x).to_degrees()
    };
    GeoPoint::new(lon, lat)
}

/// Central angle between unit vectors (stable for tiny and near-antipodal pairs).
#[inline]
pub(crate) fn central_angle(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.cross(b).norm().atan2(a.dot(b))
}

/// Great-circle distance between two points on a sphere of the given radius,
/// in the radius' units (`ShapeCfg::earth_radius_km` for the crate's metrics).
pub fn great_circle_distance(a: GeoPoint, b: GeoPoint, radius: f64) -> f64 {
    central_angle(&to_unit(a), &to_unit(b)) * radius
}

/// Spherical linear interpolation from `a` (t=0) to `b` (t=1).
///
/// Returns `None` for antipodal pairs, where the arc is not unique.
pub(crate) fn slerp(a: &Vector3<f64>, b: &Vector3<f64>, t: f64) -> Option<Vector3<f64>> {
    let omega = central_angle(a, b);
    if omega < TINY {
        return Some(*a);
    }
    let s = omega.sin();
    if s < 1e-12 {
        return None;
    }
    let out = a * (((1.0 - t) * omega).sin() / s) + b * ((t * omega).sin() / s);
    Some(out.normalize())
}

/// Log map at `c`: tangent vector at `c` pointing to `p` with length = arc length.
pub(crate) fn log_map(c: &Vector3<f64>, p: &Vector3<f64>) -> Vector3<f64> {
    let perp = p - c * c.dot(p);
    let n = perp.norm();
    if n < TINY {
        return Vector3::zeros();
    }
    perp * (central_angle(c, p) / n)
}

/// Exp map at `c`: walk along the geodesic in direction `t` for `|t|` radians.
pub(crate) fn exp_map(c: &Vector3<f64>, t: &Vector3<f64>) -> Vector3<f64> {
    let theta = t.norm();
    if theta < TINY {
        return *c;
    }
    (c * theta.cos() + t * (theta.sin() / theta)).normalize()
}

/// Orthonormal (east, north) basis of the tangent plane at unit vector `c`.
///
/// At the poles the "east" axis is fixed to +y (the 0° meridian convention).
pub(crate) fn tangent_basis(c: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let east = Vector3::z().cross(c);
    let east = if east.norm() < 1e-12 {
        Vector3::y()
    } else {
        east.normalize()
    };
    let north = c.cross(&east);
    (east, north)
}

/// Signed spherical excess of triangle (a, b, c); positive when CCW seen from outside.
///
/// Van Oosterom–Strackee: tan(E/2) = a·(b×c) / (1 + a·b + b·c + c·a).
#[inline]
pub(crate) fn signed_excess(a: &Vector3<f64>, b: &Vector3<f64>, c: &Vector3<f64>) -> f64 {
    let triple = a.dot(&b.cross(c));
    let denom = 1.0 + a.dot(b) + b.dot(c) + c.dot(a);
    2.0 * triple.atan2(denom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EARTH_RADIUS_KM;

    #[test]
    fn unit_roundtrip_and_pole_convention() {
        let p = GeoPoint::new(-123.25, 47.5);
        let q = from_unit(to_unit(p));
        assert!((p.lon() - q.lon()).abs() < 1e-12);
        assert!((p.lat() - q.lat()).abs() < 1e-12);
        let np = from_unit(to_unit(GeoPoint::new(77.0, 90.0)));
        assert!((np.lat() - 90.0).abs() < 1e-12);
        assert!(np.lon().abs() < 1e-9 || np.is_pole());
    }

    #[test]
    fn octant_triangle_excess() {
        let e = signed_excess(&Vector3::x(), &Vector3::y(), &Vector3::z());
        assert!((e - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        let r = signed_excess(&Vector3::x(), &Vector3::z(), &Vector3::y());
        assert!((r + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn log_exp_are_inverse() {
        let c = to_unit(GeoPoint::new(10.0, 20.0));
        let p = to_unit(GeoPoint::new(14.0, 18.0));
        let t = log_map(&c, &p);
        assert!(t.dot(&c).abs() < 1e-12);
        assert!((t.norm() - central_angle(&c, &p)).abs() < 1e-12);
        let back = exp_map(&c, &t);
        assert!((back - p).norm() < 1e-12);
    }

    #[test]
    fn slerp_midpoint_on_equator() {
        let a = to_unit(GeoPoint::new(0.0, 0.0));
        let b = to_unit(GeoPoint::new(90.0, 0.0));
        let m = from_unit(slerp(&a, &b, 0.5).unwrap());
        assert!((m.lon() - 45.0).abs() < 1e-12);
        assert!(m.lat().abs() < 1e-12);
        assert!(slerp(&a, &(-a), 0.5).is_none());
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let (a, b) = (GeoPoint::new(5.0, 0.0), GeoPoint::new(5.0, 1.0));
        let d = great_circle_distance(a, b, EARTH_RADIUS_KM);
        assert!((d - 111.195).abs() < 0.01, "d = {d}");
        let rad = great_circle_distance(a, b, 1.0);
        assert!((rad - 1f64.to_radians()).abs() < 1e-15, "rad = {rad}");
    }
}
