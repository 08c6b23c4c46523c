use glam::Vec2;
use math::Angle;

/// Everything the raycaster needs to know about the viewer for one frame.
/// Movement integration lives with the game; this is a snapshot.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PlayerPose {
    pub pos: Vec2,
    /// Height above the ground-level base. The eye sits a half tile above
    /// this.
    pub z: f32,
    pub rot: Angle,
}

impl PlayerPose {
    pub fn new(pos: Vec2, z: f32, rot: Angle) -> Self {
        Self { pos, z, rot }
    }
}
