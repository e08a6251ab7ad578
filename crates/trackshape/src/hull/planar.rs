//! Andrew's monotone chain on projected points (standard branch).

use nalgebra::Vector2;

use super::types::turns_left;
use crate::types::GeoPoint;

/// Convex hull of `(projected, original)` pairs, CCW, originals returned.
///
/// - Points within `eps` of each other collapse to one; the last occurrence wins.
/// - Collinear boundary points (|sin| ≤ `eps`) are dropped; only run extremes are kept.
/// - 1 or 2 distinct points short-circuit to a point / segment.
pub(crate) fn monotone_chain(mut pts: Vec<(Vector2<f64>, GeoPoint)>, eps: f64) -> Vec<GeoPoint> {
    pts.sort_by(|(a, _), (b, _)| a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y)));
    pts.dedup_by(|later, kept| {
        if (later.0 - kept.0).norm() <= eps {
            kept.1 = later.1;
            true
        } else {
            false
        }
    });
    match pts.len() {
        0 => return Vec::new(),
        1 => return vec![pts[0].1],
        2 => return vec![pts[0].1, pts[1].1],
        _ => {}
    }
    let mut lower: Vec<(Vector2<f64>, GeoPoint)> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2
            && !turns_left(lower[lower.len() - 2].0, lower[lower.len() - 1].0, p.0, eps)
        {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<(Vector2<f64>, GeoPoint)> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2
            && !turns_left(upper[upper.len() - 2].0, upper[upper.len() - 1].0, p.0, eps)
        {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower.into_iter().map(|(_, g)| g).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(xy: &[(f64, f64)]) -> Vec<(Vector2<f64>, GeoPoint)> {
        xy.iter()
            .map(|&(x, y)| (Vector2::new(x, y), GeoPoint::new(x, y)))
            .collect()
    }

    #[test]
    fn square_with_interior_and_edge_points() {
        let pts = pairs(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
            (0.5, 0.5),
            (0.5, 0.0),
            (1.0, 0.5),
        ]);
        let hull = monotone_chain(pts, 1e-12);
        assert_eq!(hull.len(), 4);
        assert_eq!(hull[0], GeoPoint::new(0.0, 0.0));
        assert_eq!(hull[1], GeoPoint::new(1.0, 0.0));
        assert_eq!(hull[2], GeoPoint::new(1.0, 1.0));
        assert_eq!(hull[3], GeoPoint::new(0.0, 1.0));
    }

    #[test]
    fn collinear_keeps_extremes() {
        let pts = pairs(&[(0.0, 0.0), (2.0, 2.0), (1.0, 1.0), (3.0, 3.0)]);
        let hull = monotone_chain(pts, 1e-12);
        assert_eq!(hull, vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(3.0, 3.0)]);
    }

    #[test]
    fn near_duplicates_keep_last_occurrence() {
        let mut pts = pairs(&[(0.0, 0.0)]);
        pts.push((Vector2::new(0.0, 0.0), GeoPoint::new(5.0, 5.0)));
        let hull = monotone_chain(pts, 1e-12);
        assert_eq!(hull, vec![GeoPoint::new(5.0, 5.0)]);
    }
}
