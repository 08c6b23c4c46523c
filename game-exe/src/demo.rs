//! The baked-in demo world. Levels and textures normally arrive fully
//! formed from external loaders; this map exists so the soak run can
//! exercise every cast path (multi-level walls, both door orientations,
//! sprites, slopes and free thin walls) without any assets on disk.

use gameplay::glam::Vec2;
use gameplay::{Level, LevelStack, PlayerPose, SlopeAxis, Sprite, ThickWall, ThinWall};
use math::Angle;

pub const TILE_SIZE: f32 = 128.0;
const MAP_WIDTH: usize = 16;
const MAP_HEIGHT: usize = 16;

/// The horizontal door in the demo room's north wall, toggled mid-run
pub const DEMO_DOOR: (i32, i32) = (8, 2);

// Ground level. 1-4 are wall textures, 1001 a vertical door, 1600 a
// horizontal door.
#[rustfmt::skip]
const GROUND: [[i32; MAP_WIDTH]; MAP_HEIGHT] = [
    [1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,2,2,2,1600,2,2,0,0,0,0,1],
    [1,0,0,0,0,2,0,0,0,0,2,0,0,0,0,1],
    [1,0,0,0,0,1001,0,0,0,0,2,0,0,0,0,1],
    [1,0,0,0,0,2,0,0,0,0,2,0,0,0,0,1],
    [1,0,0,0,0,2,2,2,2,2,2,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,3,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,3,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,4,4,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,4,4,0,0,0,0,0,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1],
    [1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1],
];

// Second storey. The demo room is two floors high with an open top over
// the pillars, so the march has gaps to peek through.
#[rustfmt::skip]
const UPPER: [[i32; MAP_WIDTH]; MAP_HEIGHT] = [
    [1,1,0,1,0,1,0,1,0,1,0,1,0,1,0,1],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [1,0,0,0,0,2,2,2,2,2,2,0,0,0,0,0],
    [1,0,0,0,0,2,0,0,0,0,2,0,0,0,0,0],
    [1,0,0,0,0,2,0,0,0,0,2,0,0,0,0,0],
    [1,0,0,0,0,2,0,0,0,0,2,0,0,0,0,0],
    [1,0,0,0,0,2,2,2,2,2,2,0,0,0,0,0],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [1,1,0,1,0,1,0,1,0,1,0,1,0,1,0,0],
];

// Billboard sprites by texture id
#[rustfmt::skip]
const SPRITES: [[i32; MAP_WIDTH]; MAP_HEIGHT] = [
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [0,0,1,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,2,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [0,0,0,3,0,0,0,0,0,0,0,0,0,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,1,0,0,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,2,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
];

fn flatten(map: &[[i32; MAP_WIDTH]; MAP_HEIGHT]) -> Vec<i32> {
    map.iter().flat_map(|row| row.iter().copied()).collect()
}

pub fn build_level() -> Level {
    let stack = LevelStack::from_grids(
        vec![flatten(&GROUND), flatten(&UPPER)],
        MAP_WIDTH,
        MAP_HEIGHT,
        TILE_SIZE,
    );
    let mut level = Level::new(stack);

    // A ramp rising east over two tiles
    let mut ramp = ThickWall::new_rect_slope(
        SlopeAxis::WestEast,
        11.0 * TILE_SIZE,
        8.0 * TILE_SIZE,
        2.0 * TILE_SIZE,
        2.0 * TILE_SIZE,
        0.0,
        0.0,
        TILE_SIZE,
    );
    ramp.set_wall_type(3);
    level.add_thick_wall(ramp);

    // A ceiling dip hanging from the second storey
    let mut dip = ThickWall::new_rect_inverted_slope(
        SlopeAxis::NorthSouth,
        12.0 * TILE_SIZE,
        12.0 * TILE_SIZE,
        2.0 * TILE_SIZE,
        2.0 * TILE_SIZE,
        TILE_SIZE,
        0.0,
        TILE_SIZE,
    );
    dip.set_wall_type(2);
    level.add_thick_wall(dip);

    // Low triangular plinth
    let mut plinth = ThickWall::new_triangle(
        Vec2::new(2.0 * TILE_SIZE, 12.0 * TILE_SIZE),
        Vec2::new(4.0 * TILE_SIZE, 12.0 * TILE_SIZE),
        Vec2::new(2.0 * TILE_SIZE, 14.0 * TILE_SIZE),
        0.0,
        TILE_SIZE / 2.0,
    );
    plinth.set_wall_type(4);
    level.add_thick_wall(plinth);

    // Diamond column
    let mut column = ThickWall::new_quad(
        Vec2::new(12.5 * TILE_SIZE, 5.0 * TILE_SIZE),
        Vec2::new(13.0 * TILE_SIZE, 5.5 * TILE_SIZE),
        Vec2::new(12.5 * TILE_SIZE, 6.0 * TILE_SIZE),
        Vec2::new(12.0 * TILE_SIZE, 5.5 * TILE_SIZE),
        0.0,
        96.0,
    );
    column.set_wall_type(1);
    level.add_thick_wall(column);

    // Free-standing diagonal fence
    level.add_thin_wall(ThinWall::new(
        Vec2::new(1.2 * TILE_SIZE, 8.2 * TILE_SIZE),
        Vec2::new(2.8 * TILE_SIZE, 9.8 * TILE_SIZE),
        2,
        TILE_SIZE,
    ));

    level
}

pub fn build_sprites() -> Vec<Sprite> {
    let mut sprites = Vec::new();
    for (y, row) in SPRITES.iter().enumerate() {
        for (x, &id) in row.iter().enumerate() {
            if id != 0 {
                sprites.push(Sprite::at_cell(x as i32, y as i32, TILE_SIZE, id));
            }
        }
    }
    sprites
}

pub fn player_start() -> PlayerPose {
    PlayerPose::new(
        Vec2::new(1.5 * TILE_SIZE, 1.5 * TILE_SIZE),
        0.0,
        Angle::new(0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_world_is_well_formed() {
        let level = build_level();
        assert_eq!(level.stack.width(), MAP_WIDTH);
        assert_eq!(level.stack.height(), MAP_HEIGHT);
        assert_eq!(level.stack.level_count(), 2);
        assert_eq!(level.thick_walls.len(), 4);
        assert_eq!(level.thin_walls.len(), 1);

        // The player must not start inside anything
        let start = player_start();
        assert!(!level.player_in_wall(start.pos, start.z));

        // Both door orientations are present where the toggles expect them
        assert!(gameplay::is_horizontal_door(level.stack.cell_at(8, 2, 0)));
        assert!(gameplay::is_vertical_door(level.stack.cell_at(5, 4, 0)));
    }

    #[test]
    fn sprites_land_on_open_cells() {
        let level = build_level();
        for sprite in build_sprites() {
            let (x, y) = sprite.cell(TILE_SIZE);
            assert!(!level.is_wall_cell(x, y, 0), "sprite in wall at ({x},{y})");
        }
    }
}
