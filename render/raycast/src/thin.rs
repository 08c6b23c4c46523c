//! Thin wall raycasting. These walls are not grid aligned so every face
//! in the level is intersected directly against the ray segment. The
//! authored wall count is small and static, the linear pass per strip is
//! fine.

use std::f32::consts::PI;

use gameplay::{FaceId, Level, PlayerPose, ThinWall};
use glam::Vec2;
use log::{debug, trace};
use math::{Angle, point_to_dist_squared, segments_intersect};

use crate::Raycaster;
use crate::defs::RayHit;

impl Raycaster {
    pub(crate) fn cast_thin_walls(
        &self,
        level: &Level,
        pose: &PlayerPose,
        strip_angle: f32,
        strip: usize,
        hits: &mut Vec<RayHit>,
    ) {
        let ray_angle = pose.rot + strip_angle;
        let ray_end = boundary_point(level, pose.pos, ray_angle);

        let mut strip_hits: Vec<RayHit> = Vec::new();
        for (id, wall) in level.faces() {
            if wall.p1 == wall.p2 {
                trace!("zero length face {id:?} skipped");
                continue;
            }
            let Some(point) = segments_intersect(wall.p1, wall.p2, pose.pos, ray_end) else {
                continue;
            };
            let mut hit = RayHit::new(point, ray_angle);
            hit.squared_distance = point_to_dist_squared(pose.pos, point);
            hit.distance = hit.squared_distance.sqrt();
            fill_thin_hit(level, id, wall, pose, strip, &mut hit);

            // Cross-link both boundary hits of a sloped volume so the
            // compositor can interpolate the surface between them. The
            // link must be mutual.
            if let Some(volume_index) = id.volume {
                if level.thick_walls[volume_index].slope != 0.0 {
                    let record = hit.sibling_record();
                    for prev in strip_hits.iter_mut() {
                        if prev.same_hit(&hit) {
                            continue;
                        }
                        if prev.face.is_some_and(|f| f.volume == Some(volume_index)) {
                            hit.sibling = Some(prev.sibling_record());
                            prev.sibling = Some(record);
                        }
                    }
                }
            }
            strip_hits.push(hit);
        }

        // A sloped volume seen from inside has no second boundary ahead of
        // the viewer; cast back through the player to find the one behind
        // and mark it with a negated distance
        for hit in strip_hits.iter_mut() {
            if hit.sibling.is_some() {
                continue;
            }
            let Some(id) = hit.face else { continue };
            let Some(volume_index) = id.volume else { continue };
            let volume = &level.thick_walls[volume_index];
            if volume.slope == 0.0 || !volume.contains_point(pose.pos) {
                continue;
            }
            let backward = hit.ray_angle - PI;
            if let Some(mut behind) =
                find_sibling_at_angle(level, volume_index, id, backward, pose, strip)
            {
                behind.distance = -behind.distance;
                hit.sibling = Some(behind.sibling_record());
            } else {
                debug!("no boundary behind the viewer inside volume {volume_index}");
            }
        }

        hits.append(&mut strip_hits);
    }
}

/// Where the ray leaves the grid horizontally, used as the far end of the
/// intersection segment
fn boundary_point(level: &Level, pos: Vec2, ray_angle: Angle) -> Vec2 {
    let far_x = if ray_angle.is_right() {
        level.stack.width() as f32 * level.stack.tile_size()
    } else {
        0.0
    };
    let far_y = pos.y + (pos.x - far_x) * ray_angle.tan();
    Vec2::new(far_x, far_y)
}

fn fill_thin_hit(
    level: &Level,
    id: FaceId,
    wall: &ThinWall,
    pose: &PlayerPose,
    strip: usize,
    hit: &mut RayHit,
) {
    hit.strip = strip;
    hit.face = Some(id);
    hit.wall_type = wall.wall_type;
    hit.horizontal = wall.horizontal;
    hit.wall_height = wall.height;

    let tile_size = level.stack.tile_size() as i32;
    let along = wall.distance_to_origin(hit.point).round() as i32;
    hit.tile_x = (along % tile_size) as f32;

    if hit.distance != 0.0 {
        hit.correct_distance = hit.distance * (pose.rot.rad() - hit.ray_angle.rad()).cos();
    }

    if wall.slope != 0.0 {
        if let Some(volume_index) = id.volume {
            let volume = &level.thick_walls[volume_index];
            // The segment maths can land a whisker outside the authored
            // footprint; only interpolate points the shape covers
            if volume.contains_point(hit.point) {
                hit.wall_height = volume.slope_height_at(wall, hit.point);
                if volume.inverted_slope {
                    hit.inverted_z = hit.wall_height;
                    hit.wall_height = volume.taller_height - hit.wall_height;
                }
            }
        }
    }
}

/// Cast a ray from the player at `angle` and return its hit on the first
/// boundary face of the volume other than `origin`
fn find_sibling_at_angle(
    level: &Level,
    volume_index: usize,
    origin: FaceId,
    angle: Angle,
    pose: &PlayerPose,
    strip: usize,
) -> Option<RayHit> {
    let ray_end = boundary_point(level, pose.pos, angle);
    let volume = &level.thick_walls[volume_index];

    for (face_index, wall) in volume.faces.iter().enumerate() {
        let id = FaceId {
            volume: Some(volume_index),
            face: face_index,
        };
        if id == origin {
            continue;
        }
        let Some(point) = segments_intersect(wall.p1, wall.p2, pose.pos, ray_end) else {
            continue;
        };
        let mut hit = RayHit::new(point, angle);
        hit.squared_distance = point_to_dist_squared(pose.pos, point);
        hit.distance = hit.squared_distance.sqrt();
        fill_thin_hit(level, id, wall, pose, strip, &mut hit);
        return Some(hit);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use gameplay::{LevelStack, SlopeAxis, ThickWall};
    use std::f32::consts::FRAC_PI_2;

    const TILE: f32 = 64.0;

    fn slope_level() -> Level {
        let mut level = Level::new(LevelStack::new(10, 10, 1, TILE));
        // Rises west to east, 0 -> 128 over 256 units
        level.add_thick_wall(ThickWall::new_rect_slope(
            SlopeAxis::WestEast,
            2.0 * TILE,
            5.0 * TILE,
            4.0 * TILE,
            1.0 * TILE,
            0.0,
            0.0,
            128.0,
        ));
        level
    }

    fn caster() -> Raycaster {
        Raycaster::new(1, FRAC_PI_2, 1)
    }

    fn pose_at(x: f32, y: f32, rot: f32) -> PlayerPose {
        PlayerPose::new(Vec2::new(x, y), 0.0, math::Angle::new(rot))
    }

    #[test]
    fn boundary_pair_is_cross_linked() {
        let level = slope_level();
        // Straight through the volume along +X at its mid row
        let pose = pose_at(0.5 * TILE, 5.5 * TILE, 0.0);
        let hits = caster().cast_world(&level, &mut [], &pose);

        let thin: Vec<&RayHit> = hits.iter().filter(|h| h.face.is_some()).collect();
        assert_eq!(thin.len(), 2);
        let (near, far) = if thin[0].distance < thin[1].distance {
            (thin[0], thin[1])
        } else {
            (thin[1], thin[0])
        };

        // West cap carries the start height, east cap the end height
        assert_eq!(near.wall_height, 0.0);
        assert_eq!(far.wall_height, 128.0);

        // The link is mutual and the distances swap over
        let near_sibling = near.sibling.expect("near hit not linked");
        let far_sibling = far.sibling.expect("far hit not linked");
        assert_eq!(near_sibling.correct_distance, far.correct_distance);
        assert_eq!(far_sibling.correct_distance, near.correct_distance);
        // Only the far hit satisfies the draw-from-the-far-side rule
        assert!(far.correct_distance >= far_sibling.correct_distance);
        assert!(near.correct_distance < near_sibling.correct_distance);
    }

    #[test]
    fn gradient_faces_interpolate_the_slope() {
        let level = slope_level();
        // Diagonal ray from the south-west crossing the south gradient
        // face 160 units along it, then the north face 224 units along
        let pose = pose_at(3.0 * TILE, 7.5 * TILE, std::f32::consts::FRAC_PI_4);
        let hits = caster().cast_world(&level, &mut [], &pose);

        let thin: Vec<&RayHit> = hits.iter().filter(|h| h.face.is_some()).collect();
        assert_eq!(thin.len(), 2);
        let south = thin
            .iter()
            .find(|h| (h.wall_height - 80.0).abs() < 0.1)
            .expect("no interpolated hit on the south face");
        let north = thin
            .iter()
            .find(|h| (h.wall_height - 112.0).abs() < 0.1)
            .expect("no interpolated hit on the north face");
        assert_eq!(south.inverted_z, 0.0);
        assert!(south.sibling.is_some());
        assert!(north.sibling.is_some());
    }

    #[test]
    fn viewer_inside_volume_links_the_boundary_behind() {
        let level = slope_level();
        // Inside the volume looking east: only the east cap is ahead
        let pose = pose_at(4.0 * TILE, 5.5 * TILE, 0.0);
        let hits = caster().cast_world(&level, &mut [], &pose);

        let thin: Vec<&RayHit> = hits.iter().filter(|h| h.face.is_some()).collect();
        assert_eq!(thin.len(), 1);
        let sibling = thin[0].sibling.expect("no backward sibling found");
        // The west cap sits behind the viewer
        assert!(sibling.distance < 0.0);
        assert!((sibling.distance.abs() - 2.0 * TILE).abs() < 1e-2);
        assert_eq!(sibling.wall_height, 0.0);
    }

    #[test]
    fn inverted_slope_stores_the_raw_height() {
        let mut level = Level::new(LevelStack::new(10, 10, 1, TILE));
        level.add_thick_wall(ThickWall::new_rect_inverted_slope(
            SlopeAxis::WestEast,
            2.0 * TILE,
            5.0 * TILE,
            4.0 * TILE,
            1.0 * TILE,
            0.0,
            0.0,
            128.0,
        ));
        // Same diagonal as the upright slope test: 160 units along the
        // south gradient face
        let pose = pose_at(3.0 * TILE, 7.5 * TILE, std::f32::consts::FRAC_PI_4);
        let hits = caster().cast_world(&level, &mut [], &pose);

        let graded = hits
            .iter()
            .filter(|h| h.face.is_some())
            .find(|h| (h.inverted_z - 80.0).abs() < 0.1)
            .expect("no inverted hit recorded");
        // Drawn height flips about the taller end
        assert!((graded.wall_height - 48.0).abs() < 0.1);
    }
}
