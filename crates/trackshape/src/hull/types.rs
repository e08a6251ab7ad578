//! Hull value types: strategy tag, planar frame, and the hull itself.
//!
//! - `HullStrategy`: `Standard` or `PoleEnclosing(Pole)`, chosen before any sweep.
//! - `HullFrame`: the rotated planar frame a hull was built in; `project` maps
//!   any point into it so convexity/containment can be checked where they hold.
//! - `Hull`: CCW vertices (input points, plus the pole for pole-enclosing hulls).

use nalgebra::Vector2;

use crate::rotate::Rotator;
use crate::sphere::to_unit;
use crate::types::GeoPoint;

/// Geographic pole.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pole {
    North,
    South,
}

impl Pole {
    #[inline]
    pub fn point(self) -> GeoPoint {
        match self {
            Pole::North => GeoPoint::north_pole(),
            Pole::South => GeoPoint::south_pole(),
        }
    }
}

/// Which hull algorithm ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HullStrategy {
    /// Monotone chain in a frame rotated onto the cloud's smallest enclosing cap.
    Standard,
    /// Longitude-ordered sweep around an enclosed pole; the pole closes the hull.
    PoleEnclosing(Pole),
}

/// Planar chart used on top of the rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Projection {
    /// Tangent-plane (central) projection: great circles become straight lines.
    /// Coordinates are tangents of angles, ≈ radians near the center.
    Gnomonic,
    /// Rotated (lon, lat) in degrees. Only for clouds inside no open hemisphere.
    Equirectangular,
}

/// Rotated planar frame a hull was built in.
#[derive(Clone, Copy, Debug)]
pub struct HullFrame {
    rotator: Rotator,
    projection: Projection,
}

impl HullFrame {
    #[inline]
    pub fn new(center: GeoPoint, projection: Projection) -> Self {
        Self {
            rotator: Rotator::new(center),
            projection,
        }
    }

    /// Frame center: the rotation pivot (or the pole for pole-enclosing hulls).
    #[inline]
    pub fn center(&self) -> GeoPoint {
        self.rotator.center()
    }

    #[inline]
    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Map a point into frame coordinates (x east, y north of the center).
    ///
    /// Gnomonic coordinates are only meaningful for points within 90° of the center.
    pub fn project(&self, p: GeoPoint) -> Vector2<f64> {
        match self.projection {
            Projection::Gnomonic => {
                let v = self.rotator.rotate_unit(&to_unit(p));
                Vector2::new(v.y / v.x, v.z / v.x)
            }
            Projection::Equirectangular => {
                let q = self.rotator.rotate(p);
                Vector2::new(q.lon(), q.lat())
            }
        }
    }
}

/// Convex hull of a point cloud on the sphere.
///
/// Invariants:
/// - Vertices are CCW in the frame's tangent plane, no repeated consecutive vertex.
/// - Every vertex is an input point, except the trailing pole of a
///   `PoleEnclosing` hull. There the pole closes the ring: the enclosed region
///   is the fan of spherical triangles (pole, vᵢ, vᵢ₊₁) over the cyclic ring.
/// - 1 vertex = single point, 2 vertices = segment.
#[derive(Clone, Debug)]
pub struct Hull {
    pub(crate) vertices: Vec<GeoPoint>,
    pub(crate) strategy: HullStrategy,
    pub(crate) frame: HullFrame,
}

impl Hull {
    /// All vertices, including the synthetic pole for pole-enclosing hulls.
    #[inline]
    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    /// Boundary ring made of input points only.
    #[inline]
    pub fn ring(&self) -> &[GeoPoint] {
        match self.strategy {
            HullStrategy::Standard => &self.vertices,
            HullStrategy::PoleEnclosing(_) => &self.vertices[..self.vertices.len() - 1],
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn strategy(&self) -> HullStrategy {
        self.strategy
    }

    #[inline]
    pub fn frame(&self) -> &HullFrame {
        &self.frame
    }

    /// The injected pole vertex, if any.
    pub fn pole_vertex(&self) -> Option<GeoPoint> {
        match self.strategy {
            HullStrategy::PoleEnclosing(_) => self.vertices.last().copied(),
            HullStrategy::Standard => None,
        }
    }

    /// The cloud fits in no open hemisphere, so its spherical hull is the whole
    /// sphere. The vertices are then a planar outline in the rotated (lon, lat)
    /// chart, not a spherical polygon.
    #[inline]
    pub fn wraps_sphere(&self) -> bool {
        self.frame.projection == Projection::Equirectangular && !self.is_degenerate()
    }

    /// Point or segment (fewer than 3 ring vertices).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.ring().len() < 3
    }

    /// Ring projected into the build frame.
    pub fn planar_ring(&self) -> Vec<Vector2<f64>> {
        self.ring().iter().map(|&p| self.frame.project(p)).collect()
    }

    /// Containment in the build frame with slack `eps` (frame units).
    pub fn contains_eps(&self, p: GeoPoint, eps: f64) -> bool {
        let ring = self.planar_ring();
        let q = self.frame.project(p);
        match ring.len() {
            0 => false,
            1 => (q - ring[0]).norm() <= eps,
            2 => segment_distance(ring[0], ring[1], q) <= eps,
            n => (0..n).all(|i| {
                let a = ring[i];
                let b = ring[(i + 1) % n];
                let len = (b - a).norm();
                len == 0.0 || cross(a, b, q) / len >= -eps
            }),
        }
    }

    /// No reflex or repeated consecutive vertex in the build frame.
    pub fn is_convex(&self) -> bool {
        let ring = self.planar_ring();
        let n = ring.len();
        if n < 3 {
            return n < 2 || ring[0] != ring[1];
        }
        (0..n).all(|i| {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            let c = ring[(i + 2) % n];
            a != b && cross(a, b, c) > 0.0
        })
    }
}

#[inline]
pub(crate) fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Strict left turn a→b→c, with near-collinear triples (|sin| ≤ eps) counted as straight.
#[inline]
pub(crate) fn turns_left(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>, eps: f64) -> bool {
    cross(a, b, c) > eps * (b - a).norm() * (c - a).norm()
}

fn segment_distance(a: Vector2<f64>, b: Vector2<f64>, q: Vector2<f64>) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (q - a).norm();
    }
    let t = ((q - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (q - (a + ab * t)).norm()
}
