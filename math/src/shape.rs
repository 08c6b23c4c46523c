//! Pure 2D intersection and containment tests. Degenerate input (zero
//! length segments, parallel lines, collinear polygons) is reported as "no
//! intersection" rather than an error.

use glam::Vec2;

/// Intersect the segment `p1-p2` with the segment `p3-p4`.
///
/// Returns `None` if either segment has zero length, the segments are
/// parallel, or the lines cross outside of either segment.
pub fn segments_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<Vec2> {
    if p1 == p2 || p3 == p4 {
        return None;
    }

    let denominator = (p4.y - p3.y) * (p2.x - p1.x) - (p4.x - p3.x) * (p2.y - p1.y);
    if denominator == 0.0 {
        return None;
    }

    let ua = ((p4.x - p3.x) * (p1.y - p3.y) - (p4.y - p3.y) * (p1.x - p3.x)) / denominator;
    let ub = ((p2.x - p1.x) * (p1.y - p3.y) - (p2.y - p1.y) * (p1.x - p3.x)) / denominator;

    // Is the intersection along both segments
    if !(0.0..=1.0).contains(&ua) || !(0.0..=1.0).contains(&ub) {
        return None;
    }

    Some(p1 + (p2 - p1) * ua)
}

#[inline]
pub fn point_in_rect(pt: Vec2, x: f32, y: f32, w: f32, h: f32) -> bool {
    x <= pt.x && pt.x <= (x + w) && y <= pt.y && pt.y <= (y + h)
}

#[inline]
fn sign(p1: Vec2, p2: Vec2, p3: Vec2) -> f32 {
    (p1.x - p3.x) * (p2.y - p3.y) - (p2.x - p3.x) * (p1.y - p3.y)
}

/// Half-plane sign test. A point on an edge counts as inside.
pub fn point_in_triangle(pt: Vec2, v1: Vec2, v2: Vec2, v3: Vec2) -> bool {
    let d1 = sign(pt, v1, v2);
    let d2 = sign(pt, v2, v3);
    let d3 = sign(pt, v3, v1);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

    !(has_neg && has_pos)
}

/// Quad test as two triangles sharing the `v1-v3` diagonal.
pub fn point_in_quad(pt: Vec2, v1: Vec2, v2: Vec2, v3: Vec2, v4: Vec2) -> bool {
    point_in_triangle(pt, v1, v2, v3) || point_in_triangle(pt, v3, v4, v1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn crossing_segments() {
        let hit = segments_intersect(
            Vec2::new(0.0, 5.0),
            Vec2::new(10.0, 5.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(5.0, 10.0),
        )
        .unwrap();
        assert_eq!(hit, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn crossing_lines_but_not_segments() {
        assert!(
            segments_intersect(
                Vec2::new(0.0, 5.0),
                Vec2::new(3.0, 5.0),
                Vec2::new(5.0, 0.0),
                Vec2::new(5.0, 10.0),
            )
            .is_none()
        );
    }

    #[test]
    fn degenerate_segments() {
        let p = Vec2::new(2.0, 2.0);
        // Zero length
        assert!(segments_intersect(p, p, Vec2::ZERO, Vec2::new(4.0, 4.0)).is_none());
        // Parallel
        assert!(
            segments_intersect(
                Vec2::ZERO,
                Vec2::new(4.0, 0.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(4.0, 1.0),
            )
            .is_none()
        );
    }

    #[test]
    fn rect_containment() {
        assert!(point_in_rect(Vec2::new(3.0, 4.0), 0.0, 0.0, 8.0, 8.0));
        assert!(point_in_rect(Vec2::new(0.0, 8.0), 0.0, 0.0, 8.0, 8.0));
        assert!(!point_in_rect(Vec2::new(8.1, 4.0), 0.0, 0.0, 8.0, 8.0));
    }

    #[test]
    fn triangle_containment() {
        let v1 = Vec2::new(0.0, 0.0);
        let v2 = Vec2::new(10.0, 0.0);
        let v3 = Vec2::new(0.0, 10.0);
        assert!(point_in_triangle(Vec2::new(2.0, 2.0), v1, v2, v3));
        assert!(!point_in_triangle(Vec2::new(6.0, 6.0), v1, v2, v3));
        // Collinear vertices never contain a point off the line
        assert!(!point_in_triangle(
            Vec2::new(1.0, 5.0),
            v1,
            Vec2::new(5.0, 0.0),
            v2
        ));
    }

    #[test]
    fn quad_containment() {
        let v1 = Vec2::new(0.0, 0.0);
        let v2 = Vec2::new(10.0, 0.0);
        let v3 = Vec2::new(12.0, 10.0);
        let v4 = Vec2::new(-2.0, 10.0);
        assert!(point_in_quad(Vec2::new(5.0, 5.0), v1, v2, v3, v4));
        assert!(!point_in_quad(Vec2::new(-3.0, 5.0), v1, v2, v3, v4));
    }
}
