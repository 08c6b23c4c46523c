use glam::Vec2;
use std::f32::consts::TAU;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// An absolute angle in radians, always wrapped to `0..TAU`.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Angle(f32);

impl Angle {
    /// Will always wrap < 0 to > PI
    #[inline]
    pub const fn new(mut radians: f32) -> Self {
        radians = radians % TAU;
        if radians < 0.0 {
            radians += TAU;
        }
        Angle(radians)
    }

    #[inline]
    const fn inner_wrap(&mut self) {
        self.0 = self.0 % TAU;
        if self.0 < 0.0 {
            self.0 += TAU;
        }
    }

    #[inline]
    pub const fn rad(&self) -> f32 {
        self.0
    }

    #[inline]
    pub fn sin(&self) -> f32 {
        self.0.sin()
    }

    #[inline]
    pub fn cos(&self) -> f32 {
        self.0.cos()
    }

    #[inline]
    pub fn tan(&self) -> f32 {
        self.0.tan()
    }

    pub fn from_vector(input: Vec2) -> Self {
        Angle::new(input.y.atan2(input.x))
    }

    /// Which left/right half of the unit circle the angle points in to.
    /// Quadrants 1 and 4 face right.
    #[inline]
    pub const fn is_right(&self) -> bool {
        self.0 < TAU * 0.25 || self.0 > TAU * 0.75
    }

    /// Which upper/lower half of the unit circle the angle points in to.
    /// Quadrants 1 and 2 face up.
    #[inline]
    pub const fn is_up(&self) -> bool {
        self.0 < TAU * 0.5
    }
}

impl Add for Angle {
    type Output = Angle;
    #[inline]
    fn add(self, other: Angle) -> Angle {
        Angle::new(self.0 + other.0)
    }
}

impl Add<f32> for Angle {
    type Output = Angle;
    #[inline]
    fn add(self, other: f32) -> Angle {
        Angle::new(self.0 + other)
    }
}

impl AddAssign<f32> for Angle {
    #[inline]
    fn add_assign(&mut self, other: f32) {
        self.0 += other;
        self.inner_wrap();
    }
}

impl Sub<f32> for Angle {
    type Output = Angle;
    #[inline]
    fn sub(self, other: f32) -> Angle {
        Angle::new(self.0 - other)
    }
}

impl SubAssign<f32> for Angle {
    #[inline]
    fn sub_assign(&mut self, other: f32) {
        self.0 -= other;
        self.inner_wrap();
    }
}
