mod angle;
mod shape;

pub use angle::*;
use glam::Vec2;
pub use shape::*;

/// Euclidean distance between two points
#[inline]
pub fn point_to_dist(from: Vec2, to: Vec2) -> f32 {
    (from - to).length()
}

/// Squared euclidean distance, for comparisons that never need the root
#[inline]
pub fn point_to_dist_squared(from: Vec2, to: Vec2) -> f32 {
    (from - to).length_squared()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    #[allow(clippy::float_cmp)]
    fn distances() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 6.0);
        assert_eq!(point_to_dist(a, b), 5.0);
        assert_eq!(point_to_dist_squared(a, b), 25.0);
    }
}
