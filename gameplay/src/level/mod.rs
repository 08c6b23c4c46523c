//! The level context: grid stack, door state and the authored wall
//! volumes, passed by reference into every query.

pub(crate) mod stack;
pub(crate) mod walls;

use glam::Vec2;
use log::debug;
use stack::{EMPTY_CELL, LevelStack, is_door};
use walls::{FaceId, ThickWall, ThinWall};

pub struct Level {
    pub stack: LevelStack,
    /// Door open flags, `x + y * width`. Cell values only encode a door's
    /// identity and orientation; this is the mutable state.
    doors: Vec<bool>,
    /// Arena of authored volumes. `FaceId.volume` indexes in to this.
    pub thick_walls: Vec<ThickWall>,
    /// Free-standing thin walls with no owning volume
    pub thin_walls: Vec<ThinWall>,
}

impl Level {
    pub fn new(stack: LevelStack) -> Self {
        let doors = vec![false; stack.width() * stack.height()];
        Self {
            stack,
            doors,
            thick_walls: Vec::new(),
            thin_walls: Vec::new(),
        }
    }

    /// Move a volume in to the arena, fixing up the faces' back-references
    /// to their new slot
    pub fn add_thick_wall(&mut self, mut wall: ThickWall) -> usize {
        let index = self.thick_walls.len();
        for face in &mut wall.faces {
            face.owner = Some(index);
        }
        self.thick_walls.push(wall);
        index
    }

    pub fn add_thin_wall(&mut self, wall: ThinWall) -> FaceId {
        self.thin_walls.push(wall);
        FaceId {
            volume: None,
            face: self.thin_walls.len() - 1,
        }
    }

    pub fn face(&self, id: FaceId) -> &ThinWall {
        match id.volume {
            Some(volume) => &self.thick_walls[volume].faces[id.face],
            None => &self.thin_walls[id.face],
        }
    }

    /// Every thin wall in the level: boundary faces of each volume, then
    /// the free-standing walls
    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &ThinWall)> {
        let boundary = self.thick_walls.iter().enumerate().flat_map(|(v, wall)| {
            wall.faces.iter().enumerate().map(move |(f, face)| {
                (
                    FaceId {
                        volume: Some(v),
                        face: f,
                    },
                    face,
                )
            })
        });
        let free = self.thin_walls.iter().enumerate().map(|(f, face)| {
            (
                FaceId {
                    volume: None,
                    face: f,
                },
                face,
            )
        });
        boundary.chain(free)
    }

    pub fn door_open(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.stack.width() as i32 || y >= self.stack.height() as i32 {
            return false;
        }
        self.doors[x as usize + y as usize * self.stack.width()]
    }

    /// The only runtime mutator of traversability. Door movement events
    /// happen between frames, never during a raycast pass.
    pub fn toggle_door(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x >= self.stack.width() as i32 || y >= self.stack.height() as i32 {
            return;
        }
        let offset = x as usize + y as usize * self.stack.width();
        self.doors[offset] = !self.doors[offset];
        debug!(
            "door at ({x},{y}) {}",
            if self.doors[offset] { "opened" } else { "closed" }
        );
    }

    /// True if the cell blocks movement. Positions outside the grid always
    /// block; an open door does not.
    pub fn is_wall_cell(&self, x: i32, y: i32, level: usize) -> bool {
        if x < 0 || y < 0 || x >= self.stack.width() as i32 || y >= self.stack.height() as i32 {
            return true;
        }
        let cell = self.stack.safe_cell_at(x, y, level as i32, EMPTY_CELL);
        if cell == EMPTY_CELL {
            return false;
        }
        !(is_door(cell) && self.door_open(x, y))
    }

    /// True if a world position at height `z` sits inside solid geometry:
    /// the grid cell for that level, or any authored volume whose footprint
    /// and vertical extent cover the point. Open doors are passable.
    pub fn player_in_wall(&self, pos: Vec2, z: f32) -> bool {
        let tile_size = self.stack.tile_size();
        let cell_x = (pos.x / tile_size).floor() as i32;
        let cell_y = (pos.y / tile_size).floor() as i32;
        let level = (z / tile_size).floor().max(0.0) as usize;

        if self.is_wall_cell(cell_x, cell_y, level) {
            return true;
        }

        for wall in &self.thick_walls {
            if !wall.contains_point(pos) {
                continue;
            }
            // Sloped volumes block up to their taller end; the exact
            // surface height is a rendering concern
            let top = wall.z
                + if wall.slope_axis.is_some() {
                    wall.taller_height
                } else {
                    wall.height
                };
            if z >= wall.z && z < top {
                return true;
            }
        }
        false
    }
}
