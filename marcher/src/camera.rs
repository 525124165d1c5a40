//! Orbiting camera and ray-direction generator.
//!
//! The camera is eight coupled registers: cos/sin of a yaw angle A, of a
//! pitch angle B, and the four products between them. Once per frame each
//! angle advances with the incremental-rotation (Minsky) update
//!
//!   c -= s >> shift
//!   s += c >> shift
//!
//! applied to every pair whose members differ only in that angle, so the
//! products stay consistent without any multiply. Drift is bounded rather
//! than removed: whenever sin B comes back round to non-negative the whole
//! state snaps back to its initial value.
//!
//! Camera basis (yaw about y, then pitch about the camera's x):
//!
//!   forward = ( sA cB, -sB, cA cB )
//!   right   = ( cA,     0,  -sA   )
//!   up      = ( sA sB,  cB,  cA sB )

use crate::fixed::{shift_add_mul, Q88, Vec3};
use crate::march::RayStart;
use crate::{FB_H, FB_W};

/// Register value for 1.0.
pub const CAMERA_ONE: i16 = 0x2000;

/// cos 45° at `CAMERA_ONE` scale.
const COS_45: i16 = 0x16a1;

pub const YAW_SHIFT: u32 = 6;
pub const PITCH_SHIFT: u32 = 8;

/// Camera sits `forward >> CAMERA_DISTANCE_SHIFT` behind the origin (8.0).
const CAMERA_DISTANCE_SHIFT: u32 = 2;

/// Rays start this far along their direction (4.0): `direction >> PRE_STEP_SHIFT`.
// Together with the six-step budget this sets how far past a silhouette a
// grazing ray still counts as a hit (about half the screen for the sphere).
const PRE_STEP_SHIFT: u32 = 4;

/// Extra fraction bits in the direction accumulators.
pub const WIDE_FRAC: u32 = 8;

/// Forward vector scale in the accumulators: 1.0 == 0x4000 << WIDE_FRAC.
const FORWARD_SHIFT: u32 = 14 + WIDE_FRAC - 13;

/// World-space light direction, about unit length.
pub const LIGHT: Vec3 = Vec3::from_raw(-0x0080, 0x00b0, -0x0080);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraState {
    pub cos_a: Q88,
    pub sin_a: Q88,
    pub cos_b: Q88,
    pub sin_b: Q88,
    pub sin_a_sin_b: Q88,
    pub cos_a_sin_b: Q88,
    pub sin_a_cos_b: Q88,
    pub cos_a_cos_b: Q88,
}

#[inline(always)]
fn minsky(c: &mut Q88, s: &mut Q88, shift: u32) {
    *c -= *s >> shift;
    *s += *c >> shift;
}

impl CameraState {
    /// Yaw 45°, level pitch.
    pub const INITIAL: CameraState = CameraState {
        cos_a: Q88(COS_45),
        sin_a: Q88(COS_45),
        cos_b: Q88(CAMERA_ONE),
        sin_b: Q88(0),
        sin_a_sin_b: Q88(0),
        cos_a_sin_b: Q88(0),
        sin_a_cos_b: Q88(COS_45),
        cos_a_cos_b: Q88(COS_45),
    };

    /// State for the next frame, and whether it is a drift reset.
    pub fn next_frame(&self) -> (CameraState, bool) {
        let mut n = *self;

        minsky(&mut n.cos_a, &mut n.sin_a, YAW_SHIFT);
        minsky(&mut n.cos_a_sin_b, &mut n.sin_a_sin_b, YAW_SHIFT);
        minsky(&mut n.cos_a_cos_b, &mut n.sin_a_cos_b, YAW_SHIFT);

        minsky(&mut n.cos_b, &mut n.sin_b, PITCH_SHIFT);
        minsky(&mut n.cos_a_cos_b, &mut n.cos_a_sin_b, PITCH_SHIFT);
        minsky(&mut n.sin_a_cos_b, &mut n.sin_a_sin_b, PITCH_SHIFT);

        if self.sin_b.is_negative() && !n.sin_b.is_negative() {
            (Self::INITIAL, true)
        } else {
            (n, false)
        }
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.sin_a_cos_b, -self.sin_b, self.cos_a_cos_b)
    }

    pub fn right(&self) -> Vec3 {
        Vec3::new(self.cos_a, Q88::ZERO, -self.sin_a)
    }

    pub fn up(&self) -> Vec3 {
        Vec3::new(self.sin_a_sin_b, self.cos_b, self.cos_a_sin_b)
    }

    /// Eye position, Q8.8.
    pub fn position(&self) -> Vec3 {
        -(self.forward() >> CAMERA_DISTANCE_SHIFT)
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Three 32-bit accumulators with `WIDE_FRAC` extra fraction bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WideVec3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl WideVec3 {
    #[inline(always)]
    pub fn from_vec(v: Vec3) -> Self {
        Self { x: v.x.wide(), y: v.y.wide(), z: v.z.wide() }
    }

    #[inline(always)]
    fn map(self, f: impl Fn(i32) -> i32) -> Self {
        Self { x: f(self.x), y: f(self.y), z: f(self.z) }
    }

    #[inline(always)]
    fn zip(self, o: Self, f: impl Fn(i32, i32) -> i32) -> Self {
        Self { x: f(self.x, o.x), y: f(self.y, o.y), z: f(self.z, o.z) }
    }

    #[inline(always)]
    pub fn add(self, o: Self) -> Self {
        self.zip(o, i32::wrapping_add)
    }

    #[inline(always)]
    pub fn sub(self, o: Self) -> Self {
        self.zip(o, i32::wrapping_sub)
    }

    #[inline(always)]
    pub fn shl(self, n: u32) -> Self {
        self.map(|v| v.wrapping_shl(n))
    }

    #[inline(always)]
    pub fn shr(self, n: u32) -> Self {
        self.map(|v| v >> n)
    }

    #[inline(always)]
    pub fn mul_const(self, n: u32) -> Self {
        self.map(|v| shift_add_mul(v, n))
    }

    /// Top bits, dropping the extra fraction.
    #[inline(always)]
    pub fn top(self) -> Vec3 {
        Vec3::new(
            Q88::from_wide(self.x >> WIDE_FRAC),
            Q88::from_wide(self.y >> WIDE_FRAC),
            Q88::from_wide(self.z >> WIDE_FRAC),
        )
    }
}

/// Per-line and per-pixel ray directions for the current camera.
///
/// One pixel is `right / 512` and one line is `up / 512` at unit forward
/// distance; a register value at `CAMERA_ONE` scale is exactly one such
/// increment in the accumulators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RayGenerator {
    eye: Vec3,
    right: WideVec3,
    up: WideVec3,
    /// Direction for column 0 of the next line.
    line: WideVec3,
    /// Direction for the current pixel.
    pixel: WideVec3,
}

impl RayGenerator {
    pub fn new(camera: &CameraState) -> Self {
        let mut g = Self::default();
        g.begin_frame(camera);
        g
    }

    /// Latch the camera basis and seed the top line.
    pub fn begin_frame(&mut self, camera: &CameraState) {
        self.eye = camera.position();
        self.right = WideVec3::from_vec(camera.right());
        self.up = WideVec3::from_vec(camera.up());

        let forward = WideVec3::from_vec(camera.forward()).shl(FORWARD_SHIFT);
        let top = self.up.mul_const(FB_H as u32 / 2);
        let left = self.right.mul_const(FB_W as u32 / 2);
        self.line = forward.add(top).sub(left);
        self.pixel = self.line;
    }

    /// Seed the pixel accumulator for the next line down.
    pub fn begin_line(&mut self) {
        self.pixel = self.line;
        self.line = self.line.sub(self.up);
    }

    /// Move to the next pixel on the line.
    #[inline(always)]
    pub fn advance_pixel(&mut self) {
        self.pixel = self.pixel.add(self.right);
    }

    /// Direction for the current pixel, `quarters / 4` of a pixel to the right.
    #[inline]
    pub fn direction(&self, quarters: u8) -> Vec3 {
        let mut acc = self.pixel;
        if quarters & 1 != 0 {
            acc = acc.add(self.right.shr(2));
        }
        if quarters & 2 != 0 {
            acc = acc.add(self.right.shr(1));
        }
        acc.top()
    }

    /// Start inputs for the current pixel, with the origin already
    /// `direction >> PRE_STEP_SHIFT` along the ray.
    #[inline]
    pub fn ray_start(&self, quarters: u8) -> RayStart {
        let direction = self.direction(quarters);
        RayStart { origin: self.eye + (direction >> PRE_STEP_SHIFT), direction, light: LIGHT }
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_camera_looks_at_origin_from_eight_units() {
        let c = CameraState::INITIAL;
        let eye = c.position();
        assert_eq!(eye.y, Q88::ZERO);
        assert_eq!(eye.x, eye.z);
        // 8 * cos 45° = 5.657
        assert_eq!(eye.x, -Q88(COS_45 >> 2));
    }

    #[test]
    fn centre_ray_points_forward() {
        let c = CameraState::INITIAL;
        let mut g = RayGenerator::new(&c);
        for _ in 0..=FB_H / 2 {
            g.begin_line();
        }
        for _ in 0..FB_W / 2 {
            g.advance_pixel();
        }
        let d = g.direction(0);
        let f = c.forward();
        // forward is at CAMERA_ONE scale, directions at 0x4000
        assert_eq!(d.x.raw(), f.x.raw() << 1);
        assert_eq!(d.z.raw(), f.z.raw() << 1);
        assert_eq!(d.y, Q88::ZERO);
    }
}
