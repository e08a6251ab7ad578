//! Principal axes of a point cloud on the tangent plane at its spherical mean.

use nalgebra::{Matrix2, SymmetricEigen, Vector2};

use crate::centroid::weighted_slerp_centroid_with;
use crate::error::ShapeError;
use crate::sphere::{log_map, tangent_basis, to_unit};
use crate::types::{GeoPoint, ShapeCfg};

/// Principal semi-axis lengths `(a, b)`, `a >= b >= 0`, in radians.
///
/// Points are mapped to the azimuthal-equidistant plane at their spherical
/// mean (the log map), which is isometric along rays and isotropic, so the
/// eigenvalues of the second-moment matrix do not depend on where the cloud
/// sits on the sphere or how it is oriented.
pub(crate) fn principal_axes(points: &[GeoPoint], cfg: &ShapeCfg) -> Result<(f64, f64), ShapeError> {
    let weighted: Vec<_> = points.iter().map(|p| p.with_weight(1.0)).collect();
    let center = to_unit(weighted_slerp_centroid_with(&weighted, cfg)?);
    let (east, north) = tangent_basis(&center);
    let coords: Vec<Vector2<f64>> = points
        .iter()
        .map(|&p| {
            let t = log_map(&center, &to_unit(p));
            Vector2::new(t.dot(&east), t.dot(&north))
        })
        .collect();
    let n = coords.len() as f64;
    let mean = coords.iter().fold(Vector2::zeros(), |acc, c| acc + c) / n;
    let mut cov = Matrix2::zeros();
    for c in &coords {
        let d = c - mean;
        cov += d * d.transpose();
    }
    cov /= n;
    let eig = SymmetricEigen::new(cov);
    let (l0, l1) = (eig.eigenvalues[0].max(0.0), eig.eigenvalues[1].max(0.0));
    let (hi, lo) = if l0 >= l1 { (l0, l1) } else { (l1, l0) };
    Ok((hi.sqrt(), lo.sqrt()))
}
