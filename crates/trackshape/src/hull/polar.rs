//! Pole-enclosing branch: longitude-ordered sweep around the pole.
//!
//! Points are projected gnomonically onto the plane tangent at the pole, where
//! the pole is the origin and lies strictly inside the hull. Sorting by the
//! polar angle is sorting by longitude (descending for the South Pole, so the
//! order is CCW seen from outside the sphere). A Graham-style stack sweep that
//! starts at the point farthest from the pole (always a hull vertex) yields
//! the outer envelope; the pole is then appended as the closing vertex.

use nalgebra::Vector2;

use super::types::{turns_left, HullFrame, Pole, Projection};
use crate::types::GeoPoint;

/// Envelope ring plus trailing pole vertex. Caller guarantees the predicate held.
pub(crate) fn pole_sweep(points: &[GeoPoint], pole: Pole, eps: f64) -> (Vec<GeoPoint>, HullFrame) {
    let frame = HullFrame::new(pole.point(), Projection::Gnomonic);
    // (angle, radius, projected, original)
    let mut pts: Vec<(f64, f64, Vector2<f64>, GeoPoint)> = points
        .iter()
        .filter(|p| !p.is_pole())
        .map(|&p| {
            let q = frame.project(p);
            (q.y.atan2(q.x), q.norm(), q, p)
        })
        .collect();
    // By angle, farthest first within an equal-angle run.
    pts.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| b.1.total_cmp(&a.1)));
    pts.dedup_by(|later, kept| (later.0 - kept.0).abs() <= eps);

    let start = pts
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
        .unwrap_or(0);
    pts.rotate_left(start);

    let mut stack: Vec<(Vector2<f64>, GeoPoint)> = Vec::with_capacity(pts.len());
    for &(_, _, q, p) in &pts {
        while stack.len() >= 2 && !turns_left(stack[stack.len() - 2].0, stack[stack.len() - 1].0, q, eps) {
            stack.pop();
        }
        stack.push((q, p));
    }
    // Close the loop back to the start vertex.
    while stack.len() >= 3
        && !turns_left(stack[stack.len() - 2].0, stack[stack.len() - 1].0, stack[0].0, eps)
    {
        stack.pop();
    }

    let mut vertices: Vec<GeoPoint> = stack.into_iter().map(|(_, p)| p).collect();
    vertices.push(pole.point());
    (vertices, frame)
}
