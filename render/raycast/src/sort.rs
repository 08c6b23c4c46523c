//! Painter's ordering. There is no z-buffer: everything draws
//! back-to-front, and faces on different levels can occlude each other
//! differently as the eye height changes, so grid hits order by their 3D
//! distance from the eye to the base of their level.

use std::cmp::Ordering;

use crate::defs::RayHit;

/// Sort hits farthest-first. `eye` is the viewer's eye height,
/// `tile_size / 2 + player_z`.
pub fn sort_hits(hits: &mut [RayHit], tile_size: f32, eye: f32) {
    hits.sort_by(|a, b| {
        // Thin walls have no level bucketing, raw distance decides
        if a.face.is_some() || b.face.is_some() {
            return b
                .distance
                .partial_cmp(&a.distance)
                .unwrap_or(Ordering::Equal);
        }

        let eye_key = |hit: &RayHit| {
            let wall_bottom = hit.level as f32 * tile_size;
            let v_distance = eye - wall_bottom;
            let distance = if hit.sort_distance != 0.0 {
                hit.sort_distance
            } else {
                hit.distance
            };
            v_distance * v_distance + distance * distance
        };
        eye_key(b).partial_cmp(&eye_key(a)).unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use math::Angle;

    const TILE: f32 = 64.0;

    fn grid_hit(level: usize, distance: f32) -> RayHit {
        let mut hit = RayHit::new(Vec2::ZERO, Angle::new(0.0));
        hit.wall_type = 1;
        hit.level = level;
        hit.distance = distance;
        hit.sort_distance = distance;
        hit
    }

    #[test]
    fn farther_wall_draws_first() {
        let mut hits = vec![grid_hit(0, 100.0), grid_hit(0, 300.0), grid_hit(0, 200.0)];
        sort_hits(&mut hits, TILE, TILE / 2.0);
        let order: Vec<f32> = hits.iter().map(|h| h.distance).collect();
        assert_eq!(order, vec![300.0, 200.0, 100.0]);
    }

    #[test]
    fn order_stable_as_the_eye_rises() {
        // Two ground hits below a high wall: raising the eye above that
        // wall's top must never swap them
        for eye in [TILE / 2.0, TILE * 2.0, TILE * 4.0] {
            let mut hits = vec![grid_hit(0, 100.0), grid_hit(0, 200.0)];
            sort_hits(&mut hits, TILE, eye);
            assert_eq!(hits[0].distance, 200.0, "eye {eye}");
            assert_eq!(hits[1].distance, 100.0, "eye {eye}");
        }
    }

    #[test]
    fn door_bias_puts_the_wall_above_first() {
        let mut door = grid_hit(0, 100.0);
        door.wall_type = 1001;
        door.sort_distance = 99.0;
        let above = grid_hit(1, 100.0);

        let mut hits = vec![door, above];
        sort_hits(&mut hits, TILE, TILE / 2.0);
        // The level above draws before the door, never through its frame
        assert_eq!(hits[0].level, 1);
        assert_eq!(hits[1].wall_type, 1001);
    }

    #[test]
    fn thin_walls_compare_by_raw_distance() {
        let mut thin = RayHit::new(Vec2::ZERO, Angle::new(0.0));
        thin.face = Some(gameplay::FaceId {
            volume: None,
            face: 0,
        });
        thin.distance = 50.0;
        // A high-level grid hit whose eye key would dwarf its distance
        let grid = grid_hit(3, 40.0);

        let mut hits = vec![thin.clone(), grid.clone()];
        sort_hits(&mut hits, TILE, TILE / 2.0);
        assert!(hits[0].face.is_some());

        let mut hits = vec![grid, thin];
        sort_hits(&mut hits, TILE, TILE / 2.0);
        assert!(hits[0].face.is_some());
    }
}
