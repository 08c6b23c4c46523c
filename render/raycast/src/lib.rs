//! The raycasting core. One pass casts a ray per screen strip across the
//! level stack, the sprite list and the authored thin walls, producing
//! [`RayHit`] records for the compositor. Hits are globally sorted
//! farthest-first with [`sort_hits`] before drawing; the projection
//! helpers turn a hit in to a vertical pixel strip.

#![allow(clippy::too_many_arguments)]

mod cast;
mod defs;
mod sort;
mod thin;
mod utilities;

pub use defs::{RayHit, SiblingHit, is_wall_in_hits};
pub use sort::sort_hits;
pub use utilities::{
    ScreenRect, screen_distance, sprite_screen_rect, strip_angle, strip_screen_height,
};

use gameplay::{Level, PlayerPose, Sprite};

pub struct Raycaster {
    view_dist: f32,
    strip_width: usize,
    strip_count: usize,
    /// Sprites already claimed this frame, cleared at the start of every
    /// cast. Stops the two gridline families double-hitting a billboard.
    sprite_seen: Vec<bool>,
}

impl Raycaster {
    /// `strip_width` is how many screen columns share one ray; 1 to 4.
    /// Wider strips cast fewer rays at lower quality.
    pub fn new(screen_width: usize, fov_radians: f32, strip_width: usize) -> Self {
        Self {
            view_dist: utilities::screen_distance(screen_width as f32, fov_radians),
            strip_width,
            strip_count: screen_width / strip_width,
            sprite_seen: Vec::new(),
        }
    }

    pub const fn view_dist(&self) -> f32 {
        self.view_dist
    }

    pub const fn strip_count(&self) -> usize {
        self.strip_count
    }

    pub const fn strip_width(&self) -> usize {
        self.strip_width
    }

    /// Cast every strip for one frame. Hits come back unsorted; sprites
    /// get their per-frame `distance` written as a side effect.
    pub fn cast_world(
        &mut self,
        level: &Level,
        sprites: &mut [Sprite],
        pose: &PlayerPose,
    ) -> Vec<RayHit> {
        self.sprite_seen.clear();
        self.sprite_seen.resize(sprites.len(), false);

        let mut hits = Vec::new();
        for strip in 0..self.strip_count {
            let screen_x =
                ((self.strip_count as i32 / 2 - strip as i32) * self.strip_width as i32) as f32;
            let strip_angle = utilities::strip_angle(screen_x, self.view_dist);
            self.cast_strip(level, sprites, pose, strip_angle, strip, &mut hits);
            self.cast_thin_walls(level, pose, strip_angle, strip, &mut hits);
        }
        hits
    }
}
