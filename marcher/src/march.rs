//! Ray-march engine.
//!
//! One instance owns one ray. Every tick it either loads a new ray (start
//! pulse) or takes one march step:
//!
//!   sdf          = shape(position)
//!   accumulated += sdf
//!   alive       &= accumulated < MISS_DISTANCE
//!   position    += s + s/4,   s = step3(sdf, direction)
//!
//! `alive` is sticky: once a ray has run off it stays dead until the next
//! start. There is no iteration counter; whoever ticks the engine decides
//! when to read it.

use crate::fixed::{Q88, Vec3};
use crate::shapes::{Feature, Shape};
use crate::step::{clamp_distance, step3};

/// Initial value of the accumulated distance.
pub const DISTANCE_BIAS: Q88 = Q88(512);

/// Rays whose accumulated distance reaches this are misses.
pub const MISS_DISTANCE: Q88 = Q88(2048);

/// Inputs latched by a start pulse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RayStart {
    pub origin: Vec3,
    /// 1.0 == 0x4000.
    pub direction: Vec3,
    pub light: Vec3,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RayState {
    pub position: Vec3,
    pub direction: Vec3,
    pub accumulated: Q88,
    pub alive: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MarchPhase {
    /// Never started since reset.
    #[default]
    Idle,
    /// A ray was loaded on the last tick.
    Armed,
    Marching,
}

/// Everything the engine holds between ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub ray: RayState,
    pub light: Vec3,
    /// Lighting at the position held before the last tick.
    pub intensity: Q88,
    pub feature: Feature,
    pub phase: MarchPhase,
}

pub struct RayMarcher<S> {
    shape: S,
    regs: Registers,
}

impl<S: Shape> RayMarcher<S> {
    pub fn new(shape: S) -> Self {
        Self { shape, regs: Registers::default() }
    }

    pub fn reset(&mut self) {
        self.regs = Registers::default();
    }

    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    pub fn hit(&self) -> bool {
        self.regs.ray.alive
    }

    pub fn intensity(&self) -> Q88 {
        self.regs.intensity
    }

    pub fn feature(&self) -> Feature {
        self.regs.feature
    }

    /// Register values after one tick, computed from the current ones only.
    pub fn next(&self, start: Option<RayStart>) -> Registers {
        let cur = &self.regs;
        let sample = self.shape.sample(cur.ray.position, cur.light);

        let Some(start) = start else {
            if cur.phase == MarchPhase::Idle {
                return Registers { intensity: sample.intensity, feature: sample.feature, ..*cur };
            }
            let accumulated = cur.ray.accumulated + sample.distance;
            let s = step3(clamp_distance(sample.distance), cur.ray.direction);
            return Registers {
                ray: RayState {
                    position: cur.ray.position + s + (s >> 2),
                    direction: cur.ray.direction,
                    accumulated,
                    alive: cur.ray.alive && accumulated < MISS_DISTANCE,
                },
                light: cur.light,
                intensity: sample.intensity,
                feature: sample.feature,
                phase: MarchPhase::Marching,
            };
        };

        Registers {
            ray: RayState {
                position: start.origin,
                direction: start.direction,
                accumulated: DISTANCE_BIAS,
                alive: true,
            },
            light: start.light,
            intensity: sample.intensity,
            feature: sample.feature,
            phase: MarchPhase::Armed,
        }
    }

    /// Advance one tick.
    #[inline]
    pub fn tick(&mut self, start: Option<RayStart>) {
        self.regs = self.next(start);
    }
}
