//! Grid marching. For each strip a ray is walked across the two gridline
//! families per level of the stack; the nearer of the two family results
//! wins unless a gap above or below a wall keeps the march going so the
//! wall behind shows through the opening.

use gameplay::{
    EMPTY_CELL, Level, PlayerPose, Sprite, is_door, is_horizontal_door, is_vertical_door,
    sprites_in_cell,
};
use glam::Vec2;
use log::trace;
use math::{Angle, point_to_dist, point_to_dist_squared};

use crate::Raycaster;
use crate::defs::RayHit;

/// Trial distance for the synthetic hit injected when the player's own
/// column has a wall on the adjacent level. Without it that wall's bottom
/// or top face pops as the player crosses a cell boundary. Tuned by
/// observation; pinned by tests.
const UNDERFOOT_TRIAL_DISTANCE: f32 = 10.0;

/// The two gridline families the march walks. Vertical lines sit at fixed
/// world X, horizontal lines at fixed world Y. Each family only reacts to
/// doors of its matching orientation, the other kind belongs to the
/// perpendicular family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GridLine {
    Vertical,
    Horizontal,
}

impl GridLine {
    /// Doors of this orientation are invisible to the family
    fn skips_door(self, wall_type: i32) -> bool {
        match self {
            GridLine::Vertical => is_horizontal_door(wall_type),
            GridLine::Horizontal => is_vertical_door(wall_type),
        }
    }

    /// Doors of this orientation are recessed half a step in to the cell
    fn recesses_door(self, wall_type: i32) -> bool {
        match self {
            GridLine::Vertical => is_vertical_door(wall_type),
            GridLine::Horizontal => is_horizontal_door(wall_type),
        }
    }

    /// First gridline crossing for a ray from `pos` and the step between
    /// successive crossings
    fn walk(self, pos: Vec2, ray_angle: Angle, tile_size: f32) -> (Vec2, Vec2) {
        let right = ray_angle.is_right();
        let up = ray_angle.is_up();
        let tan = ray_angle.tan();
        match self {
            GridLine::Vertical => {
                let x = if right {
                    (pos.x / tile_size).floor() * tile_size + tile_size
                } else {
                    (pos.x / tile_size).floor() * tile_size - 1.0
                };
                let y = pos.y + (pos.x - x) * tan;
                // tan() is positive in quadrants 1 and 4 but the window Y
                // axis grows downward, so the Y step flips when facing right
                let step_y = if right { -(tile_size * tan) } else { tile_size * tan };
                let step_x = if right { tile_size } else { -tile_size };
                (Vec2::new(x, y), Vec2::new(step_x, step_y))
            }
            GridLine::Horizontal => {
                let y = if up {
                    (pos.y / tile_size).floor() * tile_size - 1.0
                } else {
                    (pos.y / tile_size).floor() * tile_size + tile_size
                };
                let x = pos.x + (pos.y - y) / tan;
                // Same reversal as above for the X step when facing down
                let step_x = if up { tile_size / tan } else { -(tile_size / tan) };
                let step_y = if up { -tile_size } else { tile_size };
                (Vec2::new(x, y), Vec2::new(step_x, step_y))
            }
        }
    }

    /// Tile-relative texture coordinate of a hit on this family's edge,
    /// flipped by facing so a wall reads the same from both sides
    fn texture_u(self, point: Vec2, ray_angle: Angle, tile_size: f32) -> f32 {
        match self {
            GridLine::Vertical => {
                let u = point.y % tile_size;
                if ray_angle.is_right() { u } else { tile_size - u }
            }
            GridLine::Horizontal => {
                let u = point.x % tile_size;
                if ray_angle.is_up() { u } else { tile_size - u }
            }
        }
    }

    /// Texture coordinate of a door recessed to `point`, unflipped
    fn recessed_texture_u(self, point: Vec2, tile_size: f32) -> f32 {
        match self {
            GridLine::Vertical => point.y % tile_size,
            GridLine::Horizontal => point.x % tile_size,
        }
    }
}

impl Raycaster {
    /// Cast one strip's ray through every level of the stack
    pub(crate) fn cast_strip(
        &mut self,
        level: &Level,
        sprites: &mut [Sprite],
        pose: &PlayerPose,
        strip_angle: f32,
        strip: usize,
        hits: &mut Vec<RayHit>,
    ) {
        let stack = &level.stack;
        if stack.level_count() == 0 {
            return;
        }
        let tile_size = stack.tile_size();
        let ray_angle = pose.rot + strip_angle;
        let player_tile_x = (pose.pos.x / tile_size) as i32;
        let player_tile_y = (pose.pos.y / tile_size) as i32;

        // Sprites sharing the player's cell are claimed without emitting a
        // hit; a billboard wrapped around the viewer would fill the strip
        let in_cell: Vec<usize> =
            sprites_in_cell(sprites, player_tile_x, player_tile_y, tile_size).collect();
        for i in in_cell {
            if self.sprite_seen[i] {
                continue;
            }
            let dist_sq = point_to_dist_squared(pose.pos, sprites[i].pos);
            if dist_sq != 0.0 {
                self.sprite_seen[i] = true;
                sprites[i].distance = dist_sq.sqrt();
            }
        }

        for z in 0..stack.level_count() {
            self.underfoot_hits(level, pose, ray_angle, strip_angle, strip, z, hits);

            // Vertical family first. Its nearest gap-free hit is withheld
            // so the horizontal family can take the closer of the two.
            let mut held = None;
            self.march(
                GridLine::Vertical,
                level,
                sprites,
                pose,
                ray_angle,
                strip_angle,
                strip,
                z,
                &mut held,
                hits,
            );
            let found = self.march(
                GridLine::Horizontal,
                level,
                sprites,
                pose,
                ray_angle,
                strip_angle,
                strip,
                z,
                &mut held,
                hits,
            );

            // No horizontal wall in range, the withheld vertical hit wins
            if found == 0.0 {
                if let Some((hit, _)) = held.take() {
                    hits.push(hit);
                }
            }
        }
    }

    /// A wall directly above or below the player's column would have its
    /// near face clipped to nothing, so a fixed-distance stand-in hit is
    /// recorded for it
    fn underfoot_hits(
        &self,
        level: &Level,
        pose: &PlayerPose,
        ray_angle: Angle,
        strip_angle: f32,
        strip: usize,
        z: usize,
        hits: &mut Vec<RayHit>,
    ) {
        let stack = &level.stack;
        let tile_size = stack.tile_size();
        let tile_x = (pose.pos.x / tile_size) as i32;
        let tile_y = (pose.pos.y / tile_size) as i32;
        let distance = Vec2::splat(UNDERFOOT_TRIAL_DISTANCE).length();

        let push = |wall_type: i32, hit_level: usize, hits: &mut Vec<RayHit>| {
            let mut tex = pose.pos.y % tile_size;
            if !ray_angle.is_right() {
                tex = tile_size - tex;
            }
            let mut hit = RayHit::new(pose.pos, ray_angle);
            hit.strip = strip;
            hit.wall_type = wall_type;
            hit.wall_x = tile_x;
            hit.wall_y = tile_y;
            hit.level = hit_level;
            hit.distance = distance;
            hit.squared_distance = distance * distance;
            hit.correct_distance = distance * strip_angle.cos();
            hit.horizontal = false;
            hit.tile_x = tex;
            hits.push(hit);
        };

        let above = stack.safe_cell_at(tile_x, tile_y, z as i32 + 1, EMPTY_CELL);
        if above > 0 {
            push(above, z + 1, hits);
        }
        if z >= 1 {
            let below = stack.safe_cell_at(tile_x, tile_y, z as i32 - 1, EMPTY_CELL);
            if below > 0 && !is_door(below) {
                push(below, z - 1, hits);
            }
        }
    }

    /// Walk one gridline family. The vertical family withholds its nearest
    /// gap-free hit in `held`; the horizontal family consumes it, either
    /// discarding its own candidate when the vertical one is nearer or
    /// releasing the held hit when a gap makes both visible. Returns the
    /// squared distance of the last wall this family recorded, 0.0 if
    /// none.
    fn march(
        &mut self,
        family: GridLine,
        level: &Level,
        sprites: &mut [Sprite],
        pose: &PlayerPose,
        ray_angle: Angle,
        strip_angle: f32,
        strip: usize,
        z: usize,
        held: &mut Option<(RayHit, f32)>,
        hits: &mut Vec<RayHit>,
    ) -> f32 {
        let stack = &level.stack;
        let tile_size = stack.tile_size();
        let bounds = Vec2::new(stack.width() as f32, stack.height() as f32) * tile_size;
        let (mut point, step) = family.walk(pose.pos, ray_angle, tile_size);

        // A ray exactly on a quadrant boundary degenerates tan() and the
        // family has no finite crossings; it terminates with no hit rather
        // than feeding inf or NaN to the compositor
        if !point.is_finite() || !step.is_finite() {
            trace!(
                "{family:?} gridline family degenerate at angle {}",
                ray_angle.rad()
            );
            return 0.0;
        }

        let mut found = 0.0;
        let mut prev_gaps = false;

        while point.x >= 0.0 && point.x < bounds.x && point.y >= 0.0 && point.y < bounds.y {
            let wall_x = (point.x / tile_size).floor() as i32;
            let wall_y = (point.y / tile_size).floor() as i32;

            // Billboards on the path, claimed once per frame. True
            // euclidean distance, not perpendicular, so depth against
            // walls holds from any angle.
            let in_cell: Vec<usize> = sprites_in_cell(sprites, wall_x, wall_y, tile_size).collect();
            for i in in_cell {
                if self.sprite_seen[i] {
                    continue;
                }
                self.sprite_seen[i] = true;
                let distance = point_to_dist(pose.pos, sprites[i].pos);
                sprites[i].distance = distance;

                let mut hit = RayHit::new(point, ray_angle);
                hit.strip = strip;
                hit.sprite = Some(i);
                hit.level = sprites[i].level;
                hit.distance = distance;
                hit.squared_distance = distance * distance;
                if distance != 0.0 {
                    hit.correct_distance = distance * strip_angle.cos();
                }
                hits.push(hit);
            }

            // The loop bound has already validated the cell coordinates
            let cell = stack.cell_at(wall_x as usize, wall_y as usize, z);
            let passable = cell <= EMPTY_CELL
                || family.skips_door(cell)
                || (is_door(cell) && level.door_open(wall_x, wall_y));
            if passable {
                point += step;
                continue;
            }

            let block_dist = point_to_dist_squared(pose.pos, point);

            // A nearer withheld vertical hit ends the strip, unless a gap
            // kept the previous wall see-through
            if family == GridLine::Horizontal {
                if let Some((_, vertical_dist)) = held {
                    if *vertical_dist < block_dist && !prev_gaps {
                        break;
                    }
                }
            }

            if block_dist != 0.0 {
                let mut tex = family.texture_u(point, ray_angle, tile_size);

                let mut hit = RayHit::new(point, ray_angle);
                hit.strip = strip;
                hit.wall_type = cell;
                hit.wall_x = wall_x;
                hit.wall_y = wall_y;
                hit.level = z;
                hit.up = ray_angle.is_up();
                hit.right = ray_angle.is_right();
                hit.distance = block_dist.sqrt();
                hit.squared_distance = block_dist;
                hit.sort_distance = hit.distance;

                let mut can_add = true;
                if family.recesses_door(cell) {
                    // Doors sit recessed to the cell centre: move the ray
                    // half a step inside before recording the hit
                    let recessed = point + step / 2.0;
                    let new_x = (recessed.x / tile_size).floor() as i32;
                    let new_y = (recessed.y / tile_size).floor() as i32;
                    if new_x == wall_x && new_y == wall_y {
                        hit.distance += (step / 2.0).length();
                        tex = family.recessed_texture_u(recessed, tile_size);
                        // Doors draw just before the wall level above them
                        // so its bottom face never shows through the frame
                        hit.sort_distance -= 1.0;
                    } else {
                        can_add = false;
                    }
                }

                hit.correct_distance = hit.distance * strip_angle.cos();
                hit.horizontal = family == GridLine::Horizontal;
                hit.tile_x = tex;

                match family {
                    GridLine::Vertical => {
                        if !stack.needs_next_wall(pose.z, wall_x, wall_y, z) {
                            *held = Some((hit, block_dist));
                            break;
                        }
                        // Space behind this wall: record it and keep
                        // marching, both walls show through the opening
                        prev_gaps = true;
                        if can_add {
                            hits.push(hit);
                        }
                    }
                    GridLine::Horizontal => {
                        found = block_dist;
                        if can_add {
                            hits.push(hit);
                        }
                        if stack.needs_next_wall(pose.z, wall_x, wall_y, z) {
                            // The held vertical wall is visible through
                            // the same opening
                            if let Some((vertical_hit, _)) = held.take() {
                                hits.push(vertical_hit);
                            }
                            prev_gaps = true;
                        } else {
                            break;
                        }
                    }
                }
            }
            point += step;
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gameplay::LevelStack;
    use std::f32::consts::FRAC_PI_2;

    const TILE: f32 = 64.0;

    fn level_10x10(cells: &[(usize, usize, usize, i32)]) -> Level {
        let mut stack = LevelStack::new(10, 10, 2, TILE);
        for &(x, y, z, v) in cells {
            stack.set_cell(x, y, z, v);
        }
        Level::new(stack)
    }

    fn caster() -> Raycaster {
        // One strip straight down the view axis
        Raycaster::new(1, FRAC_PI_2, 1)
    }

    fn pose_at(x: f32, y: f32, rot: f32) -> PlayerPose {
        PlayerPose::new(Vec2::new(x, y), 0.0, Angle::new(rot))
    }

    #[test]
    fn single_wall_single_hit() {
        let level = level_10x10(&[(5, 5, 0, 1)]);
        let pose = pose_at(0.5 * TILE, 5.5 * TILE, 0.0);
        let hits = caster().cast_world(&level, &mut [], &pose);

        assert_eq!(hits.len(), 1);
        let hit = &hits[0];
        assert_eq!(hit.wall_x, 5);
        assert_eq!(hit.wall_y, 5);
        assert_eq!(hit.wall_type, 1);
        assert!(!hit.horizontal);
        // Straight down the view axis the fisheye correction is identity
        assert_eq!(hit.distance, 4.5 * TILE);
        assert_eq!(hit.correct_distance, hit.distance);
    }

    #[test]
    fn ray_leaving_the_grid_hits_nothing() {
        let level = level_10x10(&[]);
        let pose = pose_at(0.5 * TILE, 5.5 * TILE, 0.0);
        let hits = caster().cast_world(&level, &mut [], &pose);
        assert!(hits.is_empty());
    }

    #[test]
    fn closed_door_is_recessed_open_door_is_passable() {
        let mut level = level_10x10(&[(5, 5, 0, 1001)]);
        let pose = pose_at(0.5 * TILE, 5.5 * TILE, 0.0);

        let hits = caster().cast_world(&level, &mut [], &pose);
        assert_eq!(hits.len(), 1);
        let hit = &hits[0];
        // Half a grid step deeper than the cell edge
        assert_eq!(hit.distance, 4.5 * TILE + TILE / 2.0);
        // And biased to sort behind the wall level above
        assert_eq!(hit.sort_distance, 4.5 * TILE - 1.0);

        level.toggle_door(5, 5);
        let hits = caster().cast_world(&level, &mut [], &pose);
        assert!(hits.is_empty());
    }

    #[test]
    fn gap_cell_recorded_and_marched_past() {
        // Two walls on the upper level with nothing below them: both are
        // visible, the nearer through the opening under the farther
        let level = level_10x10(&[(5, 5, 1, 2), (7, 5, 1, 3)]);
        let pose = pose_at(0.5 * TILE, 5.5 * TILE, 0.0);
        let hits = caster().cast_world(&level, &mut [], &pose);

        let walls: Vec<i32> = hits.iter().map(|h| h.wall_type).collect();
        assert_eq!(walls, vec![2, 3]);
        assert_eq!(hits[0].level, 1);
        assert_eq!(hits[1].level, 1);
    }

    #[test]
    fn sprites_claimed_once_with_euclidean_distance() {
        let level = level_10x10(&[(5, 5, 0, 1)]);
        let pose = pose_at(0.5 * TILE, 5.5 * TILE, 0.0);
        let mut sprites = vec![gameplay::Sprite::at_cell(3, 5, TILE, 9)];

        let mut caster = caster();
        let hits = caster.cast_world(&level, &mut sprites, &pose);
        let sprite_hits: Vec<&RayHit> = hits.iter().filter(|h| h.sprite.is_some()).collect();
        assert_eq!(sprite_hits.len(), 1);
        assert_eq!(sprite_hits[0].sprite, Some(0));
        assert_eq!(sprite_hits[0].distance, 3.0 * TILE);
        assert_eq!(sprites[0].distance, 3.0 * TILE);

        // The claim is frame-scoped: a fresh cast finds it again
        let hits = caster.cast_world(&level, &mut sprites, &pose);
        assert_eq!(hits.iter().filter(|h| h.sprite.is_some()).count(), 1);
    }

    #[test]
    fn wall_above_player_column_gets_a_stand_in_hit() {
        let level = level_10x10(&[(0, 5, 1, 4), (5, 5, 0, 1)]);
        let pose = pose_at(0.5 * TILE, 5.5 * TILE, 0.0);
        let hits = caster().cast_world(&level, &mut [], &pose);

        let stand_in = hits
            .iter()
            .find(|h| h.level == 1 && h.wall_type == 4)
            .expect("no stand-in hit for the wall overhead");
        assert_eq!(stand_in.wall_x, 0);
        assert_eq!(stand_in.wall_y, 5);
        assert_eq!(stand_in.distance, Vec2::splat(10.0).length());
    }
}
