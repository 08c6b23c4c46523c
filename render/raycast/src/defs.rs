use gameplay::FaceId;
use glam::Vec2;
use math::Angle;

/// Snapshot of the paired boundary hit of a sloped volume. The compositor
/// interpolates the slope surface between a hit and its sibling, drawing
/// only from the far side (`correct_distance >= sibling.correct_distance`)
/// so each pair is processed once. A sibling found behind the viewer
/// carries negative distances.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SiblingHit {
    pub point: Vec2,
    pub distance: f32,
    pub correct_distance: f32,
    pub wall_height: f32,
    pub inverted_z: f32,
}

/// One ray's intersection with a wall, door, sprite or thin wall for one
/// screen strip. Produced fresh every frame, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RayHit {
    /// Hit position in world units
    pub point: Vec2,
    /// Hit cell in tile units
    pub wall_x: i32,
    pub wall_y: i32,
    pub wall_type: i32,
    /// Screen strip this ray belongs to
    pub strip: usize,
    /// Coordinate within the tile along the hit edge, drives the texture U
    pub tile_x: f32,
    /// Radial distance to the hit
    pub distance: f32,
    pub squared_distance: f32,
    /// Radial distance projected perpendicular to the view plane
    pub correct_distance: f32,
    /// Distance the painter's sort uses when non-zero; doors bias it down
    /// so the wall above draws its bottom face first
    pub sort_distance: f32,
    /// Hit on a north/south cell edge
    pub horizontal: bool,
    /// Ray angle lies in the upper half of the unit circle
    pub up: bool,
    /// Ray angle lies in the right half of the unit circle
    pub right: bool,
    pub ray_angle: Angle,
    pub level: usize,
    /// Index in to the frame's sprite slice when a billboard was hit
    pub sprite: Option<usize>,
    /// The thin wall that was hit, if any
    pub face: Option<FaceId>,
    /// Visible height of a thin wall, slope-interpolated when sloped
    pub wall_height: f32,
    /// For inverted slopes, the interpolated height before flipping about
    /// the taller end
    pub inverted_z: f32,
    pub sibling: Option<SiblingHit>,
}

impl RayHit {
    pub fn new(point: Vec2, ray_angle: Angle) -> Self {
        Self {
            point,
            wall_x: 0,
            wall_y: 0,
            wall_type: 0,
            strip: 0,
            tile_x: 0.0,
            distance: 0.0,
            squared_distance: 0.0,
            correct_distance: 0.0,
            sort_distance: 0.0,
            horizontal: false,
            up: false,
            right: false,
            ray_angle,
            level: 0,
            sprite: None,
            face: None,
            wall_height: 0.0,
            inverted_z: 0.0,
            sibling: None,
        }
    }

    /// The fields a paired boundary hit needs from this one
    pub fn sibling_record(&self) -> SiblingHit {
        SiblingHit {
            point: self.point,
            distance: self.distance,
            correct_distance: self.correct_distance,
            wall_height: self.wall_height,
            inverted_z: self.inverted_z,
        }
    }

    pub fn copy_sibling(&mut self, other: &RayHit) {
        self.sibling = Some(other.sibling_record());
    }

    /// Same intersection record (guards against self-linking when
    /// cross-referencing boundary hits)
    pub fn same_hit(&self, other: &RayHit) -> bool {
        self.point == other.point
            && self.wall_type == other.wall_type
            && self.strip == other.strip
            && self.face == other.face
            && self.ray_angle == other.ray_angle
    }
}

/// Whether any recorded wall hit lies in the given cell. Used by minimap
/// and debug overlays.
pub fn is_wall_in_hits(hits: &[RayHit], cell_x: i32, cell_y: i32) -> bool {
    hits.iter()
        .any(|hit| hit.wall_type != 0 && hit.wall_x == cell_x && hit.wall_y == cell_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_links_are_snapshots() {
        let mut a = RayHit::new(Vec2::new(1.0, 2.0), Angle::new(0.0));
        a.distance = 10.0;
        a.correct_distance = 9.5;
        a.wall_height = 32.0;
        let mut b = RayHit::new(Vec2::new(3.0, 4.0), Angle::new(0.0));
        b.distance = 20.0;

        b.copy_sibling(&a);
        let s = b.sibling.unwrap();
        assert_eq!(s.distance, 10.0);
        assert_eq!(s.correct_distance, 9.5);
        assert_eq!(s.wall_height, 32.0);

        // Mutating the source later must not affect the link
        a.distance = 99.0;
        assert_eq!(b.sibling.unwrap().distance, 10.0);
    }

    #[test]
    fn wall_lookup_in_hits() {
        let mut hit = RayHit::new(Vec2::ZERO, Angle::new(0.0));
        hit.wall_type = 3;
        hit.wall_x = 4;
        hit.wall_y = 7;
        let hits = vec![hit];
        assert!(is_wall_in_hits(&hits, 4, 7));
        assert!(!is_wall_in_hits(&hits, 4, 8));
    }
}
