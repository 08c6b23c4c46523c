//! World model for the raycasting engine: the stacked level grids, door
//! state, authored thin/thick wall volumes, sprites and the occupancy
//! queries movement code relies on.
//!
//! Nothing in here draws. The renderer crates consume these types and the
//! surrounding game owns the sprite list.

mod level;
mod player;
mod sprite;

pub use glam;
pub use level::stack::{
    EMPTY_CELL, LevelStack, is_door, is_horizontal_door, is_vertical_door, is_wall,
};
pub use level::walls::{
    EAST, FaceId, NORTH, SOUTH, SlopeAxis, ThickWall, ThickWallKind, ThinWall, WEST,
};
pub use level::Level;
pub use log;
pub use player::PlayerPose;
pub use sprite::{Sprite, sprites_in_cell};
