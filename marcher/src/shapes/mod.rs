//! Signed distance functions.
//!
//! Each shape is a pure function of position and light direction. Positions,
//! distances, light and intensity are all Q8.8; negative distance is inside.

pub mod character;
mod coin;
mod cube;
mod sphere;

pub use character::{smooth_min, Character, SMOOTH_K};
pub use coin::Coin;
pub use cube::Cube;
pub use sphere::Sphere;

use crate::fixed::{Q88, Vec2, Vec3};
use crate::rotate::{rotate2, rotate3, Rotated};

/// Part of the surface closest to a sample, for coloring. Only the character
/// reports anything other than `Body`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Feature {
    #[default]
    Body = 0,
    Foot = 1,
    Mouth = 2,
    Cheek = 3,
    Eye = 4,
}

impl Feature {
    /// 3-bit code handed to the compositor.
    #[inline(always)]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Everything a shape reports for one position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sample {
    pub distance: Q88,
    /// Approximately `dot(normal, light)`.
    pub intensity: Q88,
    pub feature: Feature,
}

/// A distance field the ray marcher can be parameterised over.
pub trait Shape {
    fn sample(&self, position: Vec3, light: Vec3) -> Sample;
}

impl<S: Shape + ?Sized> Shape for &S {
    #[inline(always)]
    fn sample(&self, position: Vec3, light: Vec3) -> Sample {
        (**self).sample(position, light)
    }
}

/// Length of `p` through two vector rotations, with `light` carried along:
/// first (x, y) through three stages, then (|xy|, z << z_shift) through two.
///
/// Returns the XY-plane rotation as well since the coin shades by it.
#[inline]
pub(crate) fn cordic_length(p: Vec3, light: Vec3, z_shift: u32) -> (Rotated, Rotated) {
    let xy = rotate3(Vec2::new(p.x, p.y), Vec2::new(light.x, light.y));
    let xyz = rotate2(
        Vec2::new(xy.magnitude, p.z << z_shift),
        Vec2::new(xy.aux_x, light.z),
    );
    (xy, xyz)
}
