//! Authored wall volumes. A `ThickWall` is a rectangle, triangle or quad
//! footprint extruded between `z` and `z + height`, bounded by the
//! `ThinWall` faces it owns. Faces are generated once at construction and
//! rewritten in place whenever the slope parameters change.

use glam::Vec2;
use math::{point_in_quad, point_in_rect, point_in_triangle};

/// West face of a rectangle volume (first in the winding)
pub const WEST: usize = 0;
/// East face of a rectangle volume
pub const EAST: usize = 1;
/// North face of a rectangle volume
pub const NORTH: usize = 2;
/// South face of a rectangle volume
pub const SOUTH: usize = 3;

/// Addresses any thin wall in a [`super::Level`]: a boundary face of the
/// thick wall at arena index `volume`, or a free-standing wall when
/// `volume` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceId {
    pub volume: Option<usize>,
    pub face: usize,
}

/// An oriented line-segment wall, not aligned to the grid. Texture U runs
/// from `p1` along the segment.
#[derive(Debug, Clone, PartialEq)]
pub struct ThinWall {
    pub p1: Vec2,
    pub p2: Vec2,
    pub wall_type: i32,
    /// North/south facing. Flips which axis the texture U is read from.
    pub horizontal: bool,
    pub height: f32,
    pub z: f32,
    /// Rise per world unit along the segment, 0 for a flat-topped wall
    pub slope: f32,
    /// Arena index of the owning thick wall. The owner's lifetime covers
    /// the face; free-standing walls have no owner.
    pub owner: Option<usize>,
}

impl ThinWall {
    pub fn new(p1: Vec2, p2: Vec2, wall_type: i32, height: f32) -> Self {
        Self {
            p1,
            p2,
            wall_type,
            horizontal: false,
            height,
            z: 0.0,
            slope: 0.0,
            owner: None,
        }
    }

    /// Distance from a point on the wall to the segment origin `p1`
    #[inline]
    pub fn distance_to_origin(&self, point: Vec2) -> f32 {
        (self.p1 - point).length()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlopeAxis {
    /// Slope runs west to east, the north/south faces carry the gradient
    WestEast,
    /// Slope runs north to south, the west/east faces carry the gradient
    NorthSouth,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ThickWallKind {
    Rect { x: f32, y: f32, w: f32, h: f32 },
    Triangle([Vec2; 3]),
    Quad([Vec2; 4]),
}

#[derive(Debug, Clone)]
pub struct ThickWall {
    pub kind: ThickWallKind,
    pub z: f32,
    pub height: f32,
    pub ceiling_texture: i32,
    pub floor_texture: i32,
    /// Rise per world unit along the slope axis, 0 when unsloped
    pub slope: f32,
    pub slope_axis: Option<SlopeAxis>,
    pub start_height: f32,
    pub end_height: f32,
    pub taller_height: f32,
    /// A ceiling slope: the visible surface dips down from `taller_height`
    /// instead of rising up from the floor
    pub inverted_slope: bool,
    pub faces: Vec<ThinWall>,
}

impl ThickWall {
    /// Rectangle volume with faces in west, east, north, south order
    pub fn new_rect(x: f32, y: f32, w: f32, h: f32, z: f32, wall_height: f32) -> Self {
        let top_left = Vec2::new(x, y);
        let top_right = Vec2::new(x + w, y);
        let bottom_left = Vec2::new(x, y + h);
        let bottom_right = Vec2::new(x + w, y + h);

        let mut faces = vec![
            ThinWall::new(top_left, bottom_left, 0, wall_height),
            ThinWall::new(top_right, bottom_right, 0, wall_height),
            ThinWall::new(top_left, top_right, 0, wall_height),
            ThinWall::new(bottom_left, bottom_right, 0, wall_height),
        ];
        faces[NORTH].horizontal = true;
        faces[SOUTH].horizontal = true;

        let mut wall = Self::with_faces(ThickWallKind::Rect { x, y, w, h }, faces);
        wall.set_height(wall_height);
        wall.set_z(z);
        wall
    }

    pub fn new_triangle(v1: Vec2, v2: Vec2, v3: Vec2, z: f32, height: f32) -> Self {
        let mut faces = vec![
            ThinWall::new(v1, v2, 0, height),
            ThinWall::new(v2, v3, 0, height),
            ThinWall::new(v3, v1, 0, height),
        ];
        faces[1].horizontal = true;

        let mut wall = Self::with_faces(ThickWallKind::Triangle([v1, v2, v3]), faces);
        wall.set_height(height);
        wall.set_z(z);
        wall
    }

    pub fn new_quad(v1: Vec2, v2: Vec2, v3: Vec2, v4: Vec2, z: f32, height: f32) -> Self {
        let mut faces = vec![
            ThinWall::new(v1, v2, 0, height),
            ThinWall::new(v2, v3, 0, height),
            ThinWall::new(v3, v4, 0, height),
            ThinWall::new(v4, v1, 0, height),
        ];
        faces[2].horizontal = true;
        faces[3].horizontal = true;

        let mut wall = Self::with_faces(ThickWallKind::Quad([v1, v2, v3, v4]), faces);
        wall.set_height(height);
        wall.set_z(z);
        wall
    }

    /// Rectangle volume whose top surface rises linearly from
    /// `start_height` to `end_height` along the slope axis. The two faces
    /// perpendicular to the axis carry the gradient, the two parallel ones
    /// are the low and high end caps.
    pub fn new_rect_slope(
        axis: SlopeAxis,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        z: f32,
        start_height: f32,
        end_height: f32,
    ) -> Self {
        let mut wall = Self::new_rect(x, y, w, h, z, end_height);
        wall.slope_axis = Some(axis);
        wall.start_height = start_height;
        wall.end_height = end_height;
        wall.taller_height = start_height.max(end_height);
        wall.apply_slope();
        wall
    }

    /// Ceiling variant of [`Self::new_rect_slope`]: the end caps are
    /// height-inverted about the taller height and shifted up so the
    /// surface hangs downward.
    pub fn new_rect_inverted_slope(
        axis: SlopeAxis,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        z: f32,
        start_height: f32,
        end_height: f32,
    ) -> Self {
        let mut wall = Self::new_rect_slope(axis, x, y, w, h, z, start_height, end_height);
        wall.inverted_slope = true;
        wall.apply_slope();
        wall
    }

    fn with_faces(kind: ThickWallKind, faces: Vec<ThinWall>) -> Self {
        Self {
            kind,
            z: 0.0,
            height: 0.0,
            ceiling_texture: 0,
            floor_texture: 0,
            slope: 0.0,
            slope_axis: None,
            start_height: 0.0,
            end_height: 0.0,
            taller_height: 0.0,
            inverted_slope: false,
            faces,
        }
    }

    /// Recompute every face field derived from the slope parameters. This
    /// is the single place the slope invariants are enforced; callers
    /// mutate `start_height`/`end_height`/`taller_height` and then run
    /// this rather than editing faces piecemeal.
    fn apply_slope(&mut self) {
        let Some(axis) = self.slope_axis else {
            return;
        };
        let ThickWallKind::Rect { w, h, .. } = &self.kind else {
            return;
        };

        let (span, caps, sides) = match axis {
            SlopeAxis::WestEast => (*w, [WEST, EAST], [NORTH, SOUTH]),
            SlopeAxis::NorthSouth => (*h, [NORTH, SOUTH], [WEST, EAST]),
        };
        self.slope = (self.end_height - self.start_height) / span;
        for side in sides {
            self.faces[side].slope = self.slope;
        }

        let z = self.z;
        self.set_z(z);

        if self.inverted_slope {
            // A zero cap would degenerate to nothing, keep a sliver
            let mut cap_start = self.taller_height - self.start_height;
            let mut cap_end = self.taller_height - self.end_height;
            if cap_start == 0.0 {
                cap_start = 1.0;
            }
            if cap_end == 0.0 {
                cap_end = 1.0;
            }
            self.faces[caps[0]].height = cap_start;
            self.faces[caps[1]].height = cap_end;
            self.faces[caps[0]].z = z + self.start_height;
            self.faces[caps[1]].z = z + self.end_height;
        } else {
            self.faces[caps[0]].height = self.start_height;
            self.faces[caps[1]].height = self.end_height;
        }
    }

    /// Raise or lower the taller end of a sloped volume. All face fields
    /// are recomputed in one pass so the boundary walls can never
    /// disagree about height, slope or base z.
    pub fn set_taller_height(&mut self, new_taller: f32) {
        self.taller_height = new_taller;
        if self.slope_axis.is_none() {
            self.set_height(new_taller);
            return;
        }
        if self.start_height > self.end_height {
            self.start_height = new_taller;
        } else {
            self.end_height = new_taller;
        }
        self.apply_slope();
    }

    pub fn set_z(&mut self, z: f32) {
        self.z = z;
        for face in &mut self.faces {
            face.z = z;
        }
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height;
        for face in &mut self.faces {
            face.height = height;
        }
    }

    pub fn set_wall_type(&mut self, wall_type: i32) {
        for face in &mut self.faces {
            face.wall_type = wall_type;
        }
    }

    /// Footprint test. Also used to reject interpolated slope points the
    /// segment math produced outside the authored shape.
    pub fn contains_point(&self, point: Vec2) -> bool {
        match &self.kind {
            ThickWallKind::Rect { x, y, w, h } => point_in_rect(point, *x, *y, *w, *h),
            ThickWallKind::Triangle(v) => point_in_triangle(point, v[2], v[1], v[0]),
            ThickWallKind::Quad(v) => point_in_quad(point, v[0], v[1], v[2], v[3]),
        }
    }

    /// Height of the slope surface above the volume base at a point on one
    /// of the gradient-carrying faces
    #[inline]
    pub fn slope_height_at(&self, face: &ThinWall, point: Vec2) -> f32 {
        self.start_height + face.slope * face.distance_to_origin(point)
    }
}
