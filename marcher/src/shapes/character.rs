//! Round pink character: a body with two arms and two feet, blended with a
//! smooth minimum, and face details that only affect coloring.
//!
//! Every part is a "sphere" under the Manhattan norm `|dx|+|dy|+|dz|`. That is
//! far too coarse for lighting, so shading comes from one CORDIC pass around
//! the body centre instead. The face sits on the -z side of the body.

use super::{cordic_length, Feature, Sample, Shape};
use crate::fixed::{Q88, Vec3};

/// Smooth-minimum blend radius. Must stay a power of two so that
/// `h² / 4k` is a shift.
pub const SMOOTH_K: Q88 = Q88(1 << SMOOTH_K_LOG2);
const SMOOTH_K_LOG2: u32 = 7;

pub const BODY_RADIUS: Q88 = Q88(0x0200);
pub const ARM_RADIUS: Q88 = Q88(0x0080);
pub const FOOT_RADIUS: Q88 = Q88(0x00c0);
pub const EYE_RADIUS: Q88 = Q88(0x0060);
pub const CHEEK_RADIUS: Q88 = Q88(0x0050);
pub const MOUTH_RADIUS: Q88 = Q88(0x0030);

pub const BODY: Vec3 = Vec3::from_raw(0, 0, 0);
pub const LEFT_ARM: Vec3 = Vec3::from_raw(-0x01c0, 0x0040, 0);
pub const RIGHT_ARM: Vec3 = Vec3::from_raw(0x01c0, 0x0040, 0);
pub const LEFT_FOOT: Vec3 = Vec3::from_raw(-0x00c0, -0x01a0, -0x0040);
pub const RIGHT_FOOT: Vec3 = Vec3::from_raw(0x00c0, -0x01a0, -0x0040);
pub const LEFT_EYE: Vec3 = Vec3::from_raw(-0x0050, 0x0060, -0x0150);
pub const RIGHT_EYE: Vec3 = Vec3::from_raw(0x0050, 0x0060, -0x0150);
pub const LEFT_CHEEK: Vec3 = Vec3::from_raw(-0x00a0, 0, -0x0160);
pub const RIGHT_CHEEK: Vec3 = Vec3::from_raw(0x00a0, 0, -0x0160);
pub const MOUTH: Vec3 = Vec3::from_raw(0, -0x0040, -0x01c0);

// Hand tuned.
pub const EYE_THRESHOLD: Q88 = Q88(0x0010);
pub const CHEEK_THRESHOLD: Q88 = Q88(0x0008);
pub const MOUTH_THRESHOLD: Q88 = Q88(0x0008);

/// `min(a, b) - max(0, k - |a - b|)² / 4k`
///
/// Never above `min(a, b)`, and equal to it once `|a - b| >= k`. The square
/// is the one product in the pipeline and goes through the wide accumulator.
#[inline]
pub fn smooth_min(a: Q88, b: Q88) -> Q88 {
    let h = (SMOOTH_K.wide() - (a.wide() - b.wide()).abs()).max(0);
    a.min(b) - Q88::from_wide((h * h) >> (SMOOTH_K_LOG2 + 2))
}

#[inline(always)]
fn part(p: Vec3, center: Vec3, radius: Q88) -> Q88 {
    (p - center).manhattan() - radius
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Character;

/// Distances to every named part at one position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parts {
    pub body: Q88,
    pub arms: Q88,
    pub feet: Q88,
    pub eyes: Q88,
    pub cheeks: Q88,
    pub mouth: Q88,
}

impl Parts {
    pub fn at(p: Vec3) -> Self {
        Self {
            body: part(p, BODY, BODY_RADIUS),
            arms: part(p, LEFT_ARM, ARM_RADIUS).min(part(p, RIGHT_ARM, ARM_RADIUS)),
            feet: part(p, LEFT_FOOT, FOOT_RADIUS).min(part(p, RIGHT_FOOT, FOOT_RADIUS)),
            eyes: part(p, LEFT_EYE, EYE_RADIUS).min(part(p, RIGHT_EYE, EYE_RADIUS)),
            cheeks: part(p, LEFT_CHEEK, CHEEK_RADIUS).min(part(p, RIGHT_CHEEK, CHEEK_RADIUS)),
            mouth: part(p, MOUTH, MOUTH_RADIUS),
        }
    }

    /// Blended field used for stepping.
    pub fn distance(&self) -> Q88 {
        smooth_min(smooth_min(self.body, self.arms), self.feet)
    }

    /// Coloring priority: eyes, cheeks, mouth, feet, everything else.
    pub fn feature(&self) -> Feature {
        if self.eyes < EYE_THRESHOLD {
            Feature::Eye
        } else if self.cheeks < CHEEK_THRESHOLD {
            Feature::Cheek
        } else if self.mouth < MOUTH_THRESHOLD {
            Feature::Mouth
        } else if self.feet < self.body {
            Feature::Foot
        } else {
            Feature::Body
        }
    }
}

impl Shape for Character {
    #[inline]
    fn sample(&self, position: Vec3, light: Vec3) -> Sample {
        let parts = Parts::at(position);
        let (_, shading) = cordic_length(position - BODY, light, 0);
        Sample {
            distance: parts.distance(),
            intensity: shading.aux_x,
            feature: parts.feature(),
        }
    }
}
