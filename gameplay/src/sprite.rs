//! Billboard sprites. The surrounding game owns the sprite list and its
//! lifecycle; the raycaster only reads positions and writes the per-frame
//! `distance`.

use glam::Vec2;

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub pos: Vec2,
    /// Height above the sprite's level base
    pub z: f32,
    pub w: f32,
    pub h: f32,
    pub level: usize,
    pub texture_id: i32,
    /// Euclidean distance to the viewer, written during the raycast pass
    /// and consumed by the depth sort
    pub distance: f32,
    /// Skipped by the compositor but still occupies its cell
    pub hidden: bool,
    /// Marked for removal by the owning game list
    pub cleanup: bool,
}

impl Sprite {
    pub fn new(pos: Vec2, level: usize, texture_id: i32, size: f32) -> Self {
        Self {
            pos,
            z: 0.0,
            w: size,
            h: size,
            level,
            texture_id,
            distance: 0.0,
            hidden: false,
            cleanup: false,
        }
    }

    /// Place a sprite centred in a grid cell
    pub fn at_cell(cell_x: i32, cell_y: i32, tile_size: f32, texture_id: i32) -> Self {
        let pos = Vec2::new(
            cell_x as f32 * tile_size + tile_size / 2.0,
            cell_y as f32 * tile_size + tile_size / 2.0,
        );
        Self::new(pos, 0, texture_id, tile_size)
    }

    #[inline]
    pub fn cell(&self, tile_size: f32) -> (i32, i32) {
        (
            (self.pos.x / tile_size) as i32,
            (self.pos.y / tile_size) as i32,
        )
    }
}

/// Indices of all sprites whose position falls in the given cell
pub fn sprites_in_cell(
    sprites: &[Sprite],
    cell_x: i32,
    cell_y: i32,
    tile_size: f32,
) -> impl Iterator<Item = usize> {
    sprites
        .iter()
        .enumerate()
        .filter_map(move |(i, sprite)| (sprite.cell(tile_size) == (cell_x, cell_y)).then_some(i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_lookup() {
        let sprites = vec![
            Sprite::at_cell(2, 3, 64.0, 1),
            Sprite::at_cell(2, 3, 64.0, 2),
            Sprite::at_cell(5, 1, 64.0, 3),
        ];
        let found: Vec<usize> = sprites_in_cell(&sprites, 2, 3, 64.0).collect();
        assert_eq!(found, vec![0, 1]);
        assert_eq!(sprites_in_cell(&sprites, 0, 0, 64.0).count(), 0);
        assert_eq!(sprites[2].cell(64.0), (5, 1));
    }
}
