//! Stateless projection formulas shared between the raycaster and the
//! pixel compositor.

use gameplay::{PlayerPose, Sprite};
use log::{debug, trace};
use math::Angle;

/// Distance from the viewer to the projection plane:
/// `tan(fov/2) = (screen_width/2) / screen_distance`
pub fn screen_distance(screen_width: f32, fov_radians: f32) -> f32 {
    (screen_width / 2.0) / (fov_radians / 2.0).tan()
}

/// Angular offset of a strip's horizontal screen position from the view
/// axis: `atan(screen_x / screen_distance)`
pub fn strip_angle(screen_x: f32, screen_distance: f32) -> f32 {
    (screen_x / screen_distance).atan()
}

/// On-screen height of a wall strip by similar triangles. The
/// `floor(x + 0.5)` rounding must stay exactly as written: adjacent
/// strips of one wall seam if their heights round differently.
pub fn strip_screen_height(screen_distance: f32, correct_distance: f32, world_height: f32) -> f32 {
    (screen_distance / correct_distance * world_height + 0.5).floor()
}

/// Screen-space rectangle of a projected billboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Project a sprite on to the screen. `None` when the sprite sits behind
/// the view plane or the projection degenerates; the compositor skips
/// those rather than receiving a non-finite rectangle.
pub fn sprite_screen_rect(
    pose: &PlayerPose,
    sprite: &Sprite,
    view_dist: f32,
    screen_width: f32,
    screen_height: f32,
    tile_size: f32,
) -> Option<ScreenRect> {
    let delta = sprite.pos - pose.pos;
    let distance = delta.length();

    let sprite_angle = Angle::from_vector(delta) + pose.rot;
    let perpendicular = sprite_angle.cos() * distance;
    if perpendicular <= 0.0 || !perpendicular.is_finite() {
        trace!("sprite at {} behind the view plane", sprite.pos);
        return None;
    }

    let sprite_screen_width = tile_size * view_dist / perpendicular;
    let x = sprite_angle.tan() * view_dist;
    if !sprite_screen_width.is_finite() || !x.is_finite() {
        debug!("non finite projection for sprite at {}, skipped", sprite.pos);
        return None;
    }

    Some(ScreenRect {
        x: (screen_width / 2.0 + x - sprite_screen_width / 2.0) as i32,
        y: ((screen_height - sprite_screen_width) / 2.0) as i32,
        w: sprite_screen_width as i32,
        h: sprite_screen_width as i32,
    })
}
