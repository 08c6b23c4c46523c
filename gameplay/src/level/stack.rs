//! The stacked grid model. A stack holds one or more equal-sized 2D grids,
//! each stored as a single row-major vector with offsets of `x + y * width`.
//! Grid index 0 is the ground; a grid's level index encodes its base height
//! as `level * tile_size`, so two or more grids form a 3D volume of
//! wall columns.

/// An empty, walkable cell
pub const EMPTY_CELL: i32 = 0;

// Wall types above 1000 are reserved for door detection
const DOOR_BAND: i32 = 1000;
const VERTICAL_DOOR_BAND: i32 = 1500;

/// A door that slides along the world Y axis. Only the vertical gridline
/// family of the ray march may hit it.
#[inline]
pub const fn is_vertical_door(wall_type: i32) -> bool {
    wall_type > DOOR_BAND && wall_type <= VERTICAL_DOOR_BAND
}

/// A door that slides along the world X axis. Only the horizontal gridline
/// family of the ray march may hit it.
#[inline]
pub const fn is_horizontal_door(wall_type: i32) -> bool {
    wall_type > VERTICAL_DOOR_BAND
}

#[inline]
pub const fn is_door(wall_type: i32) -> bool {
    is_vertical_door(wall_type) || is_horizontal_door(wall_type)
}

/// A plain solid wall, texture id == wall type
#[inline]
pub const fn is_wall(wall_type: i32) -> bool {
    wall_type > EMPTY_CELL && wall_type <= DOOR_BAND
}

pub struct LevelStack {
    grids: Vec<Vec<i32>>,
    width: usize,
    height: usize,
    tile_size: f32,
}

impl LevelStack {
    pub fn new(width: usize, height: usize, level_count: usize, tile_size: f32) -> Self {
        Self {
            grids: vec![vec![EMPTY_CELL; width * height]; level_count],
            width,
            height,
            tile_size,
        }
    }

    /// Build a stack from prepared row-major grids. All grids must share
    /// the same dimensions.
    pub fn from_grids(grids: Vec<Vec<i32>>, width: usize, height: usize, tile_size: f32) -> Self {
        debug_assert!(grids.iter().all(|g| g.len() == width * height));
        Self {
            grids,
            width,
            height,
            tile_size,
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub fn level_count(&self) -> usize {
        self.grids.len()
    }

    pub const fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Unchecked lookup. The caller must have validated the coordinates;
    /// this exists for the ray-march inner loop where the loop bound has
    /// already done so. Everything else wants [`Self::safe_cell_at`].
    #[inline]
    pub fn cell_at(&self, x: usize, y: usize, z: usize) -> i32 {
        self.grids[z][x + y * self.width]
    }

    pub fn set_cell(&mut self, x: usize, y: usize, z: usize, wall_type: i32) {
        self.grids[z][x + y * self.width] = wall_type;
    }

    /// Bounds-checked lookup, returning `fallback` for anything outside the
    /// stack so a ray that leaves the map reads as empty space.
    #[inline]
    pub fn safe_cell_at(&self, x: i32, y: i32, z: i32, fallback: i32) -> i32 {
        if x < 0
            || y < 0
            || z < 0
            || x >= self.width as i32
            || y >= self.height as i32
            || z >= self.grids.len() as i32
        {
            return fallback;
        }
        self.grids[z as usize][x as usize + y as usize * self.width]
    }

    /// Any empty or door cell on a level strictly below `z`. Checks every
    /// level, not just the one directly beneath. A door on the ground level
    /// itself also counts, as the gap above the recessed door frame is
    /// visible from any height.
    pub fn any_space_below(&self, x: i32, y: i32, z: usize) -> bool {
        if z == 0 {
            return is_door(self.safe_cell_at(x, y, 0, EMPTY_CELL));
        }
        for level in (0..z).rev() {
            let cell = self.safe_cell_at(x, y, level as i32, EMPTY_CELL);
            if cell == EMPTY_CELL || is_door(cell) {
                return true;
            }
        }
        false
    }

    /// Any empty or door cell on a level strictly above `z`. Checks every
    /// level, not just the one directly above.
    pub fn any_space_above(&self, x: i32, y: i32, z: usize) -> bool {
        if z == 0 && is_door(self.safe_cell_at(x, y, 0, EMPTY_CELL)) {
            return true;
        }
        for level in z + 1..self.grids.len() {
            let cell = self.safe_cell_at(x, y, level as i32, EMPTY_CELL);
            if cell == EMPTY_CELL || is_door(cell) {
                return true;
            }
        }
        false
    }

    /// Whether the ray march must continue past the wall at `(x, y, z)`
    /// because open space on the viewer's side of it may expose a further
    /// wall's top or bottom face through the gap.
    pub fn needs_next_wall(&self, player_z: f32, x: i32, y: i32, z: usize) -> bool {
        if z == 0 && is_door(self.safe_cell_at(x, y, 0, EMPTY_CELL)) {
            return true;
        }

        let eye_height = self.tile_size / 2.0 + player_z;
        let wall_bottom = z as f32 * self.tile_size;
        let wall_top = wall_bottom + self.tile_size;

        if eye_height > wall_top {
            return self.any_space_above(x, y, z);
        }
        if eye_height < wall_bottom {
            return self.any_space_below(x, y, z);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_lookup_falls_back_out_of_bounds() {
        let mut stack = LevelStack::new(4, 3, 2, 64.0);
        stack.set_cell(1, 1, 0, 7);

        assert_eq!(stack.safe_cell_at(1, 1, 0, -1), 7);
        for (x, y, z) in [
            (-1, 0, 0),
            (0, -1, 0),
            (0, 0, -1),
            (4, 0, 0),
            (0, 3, 0),
            (0, 0, 2),
            // Offset would land in row 1 if only the flat index were checked
            (4, 0, 0),
        ] {
            assert_eq!(stack.safe_cell_at(x, y, z, -1), -1, "({x},{y},{z})");
        }
    }

    #[test]
    fn door_bands_partition_the_code_space() {
        for v in [-3, 0, 1, 500, 1000, 1001, 1250, 1500, 1501, 4000] {
            let classes = [
                v <= 0,
                is_wall(v),
                is_vertical_door(v),
                is_horizontal_door(v),
            ];
            assert_eq!(
                classes.iter().filter(|c| **c).count(),
                1,
                "wall type {v} must fall in exactly one band"
            );
        }
    }

    #[test]
    fn space_above_and_below() {
        let mut stack = LevelStack::new(4, 4, 3, 64.0);
        // A full column of wall except the middle level
        stack.set_cell(2, 2, 0, 1);
        stack.set_cell(2, 2, 2, 1);

        assert!(stack.any_space_below(2, 2, 2));
        assert!(stack.any_space_above(2, 2, 0));
        assert!(!stack.any_space_below(2, 2, 1));
        assert!(!stack.any_space_above(2, 2, 2));

        // Doors count as space
        stack.set_cell(2, 2, 1, 1001);
        assert!(stack.any_space_below(2, 2, 2));

        // A ground level door counts as space below itself
        let mut stack = LevelStack::new(4, 4, 1, 64.0);
        stack.set_cell(1, 1, 0, 1600);
        assert!(stack.any_space_below(1, 1, 0));
        assert!(stack.any_space_above(1, 1, 0));
    }

    #[test]
    fn next_wall_depends_on_eye_height() {
        let mut stack = LevelStack::new(4, 4, 3, 64.0);
        stack.set_cell(2, 2, 1, 1);

        // Eye inside the wall's own span sees no gap
        assert!(!stack.needs_next_wall(64.0, 2, 2, 1));
        // Eye above the wall top looks for space above it
        assert!(stack.needs_next_wall(180.0, 2, 2, 1));
        // Eye below the wall bottom looks for space below it
        assert!(stack.needs_next_wall(0.0, 2, 2, 1));

        // Block the column above and below: nothing to peek at
        stack.set_cell(2, 2, 0, 1);
        stack.set_cell(2, 2, 2, 1);
        assert!(!stack.needs_next_wall(180.0, 2, 2, 1));
        assert!(!stack.needs_next_wall(0.0, 2, 2, 1));
    }
}
