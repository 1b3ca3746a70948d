use super::Point2;

/// Returns the point on the segment `a`→`b` closest to `p`.
///
/// The projection parameter is clamped to `[0, 1]`, so the result always
/// lies on the segment. A degenerate segment (`a == b`) yields `a`.
#[must_use]
pub fn closest_point_on_segment(p: Point2, a: Point2, b: Point2) -> Point2 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return a;
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq;
    let t = t.clamp(0.0, 1.0);

    Point2::new(a.x + t * dx, a.y + t * dy)
}

/// Returns the minimum distance from point `p` to the line segment `a`→`b`.
#[must_use]
pub fn point_to_segment_dist(p: Point2, a: Point2, b: Point2) -> f64 {
    let c = closest_point_on_segment(p, a, b);
    ((p.x - c.x).powi(2) + (p.y - c.y).powi(2)).sqrt()
}
