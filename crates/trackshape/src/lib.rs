//! Shape descriptors for trajectories on the sphere.
//!
//! A trajectory is treated as a point cloud of (longitude, latitude) pairs in
//! degrees. The crate computes its convex hull, centroids and scalar shape
//! metrics (area, eccentricity, aspect ratio, radius of gyration), handling
//! antimeridian crossings and clouds that surround a pole.
//!
//! Layout
//! - `types`, `error`: points, trajectories, tolerances, failure modes.
//! - `sphere`, `rotate`: unit-sphere primitives and the center-to-origin rotation.
//! - `hull`, `centroid`, `metrics`: the geometry proper. All pure, no caching.
//! - `ident`: process-wide identifier service used to tag runs.
//! - `sample`: reproducible random trajectories for tests and benches.

pub mod centroid;
pub mod error;
pub mod hull;
pub mod ident;
pub mod metrics;
pub mod rotate;
pub mod sample;
pub mod sphere;
pub mod types;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::ShapeError;
pub use types::{GeoPoint, ShapeCfg, Trajectory, WeightedGeoPoint, EARTH_RADIUS_KM};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::centroid::{
        arithmetic_centroid, centroid, weighted_centroid, weighted_slerp_centroid,
        weighted_slerp_centroid_with,
    };
    pub use crate::error::ShapeError;
    pub use crate::hull::{build_convex_hull, build_convex_hull_with, Hull, HullStrategy, Pole};
    pub use crate::ident::{generate_id, IdGenerator, RandomIdGenerator};
    pub use crate::metrics::{
        hull_area, hull_aspect_ratio, hull_eccentricity, radius_of_gyration, shape_summary,
        ShapeSummary,
    };
    pub use crate::rotate::{rotate_point, rotate_points, unrotate_point, unrotate_points, Rotator};
    pub use crate::sample::{draw_trajectory, PointCount, ReplayToken, TrajectoryCfg};
    pub use crate::types::{GeoPoint, ShapeCfg, Trajectory, WeightedGeoPoint};
}
