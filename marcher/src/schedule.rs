//! Per-pixel phase scheduler.
//!
//! Each output pixel gets `WINDOW_TICKS` ticks. Within the window:
//!
//!   tick q (0..=3)   start pulse; q is the dithered query phase
//!   other ticks      the engine keeps refining
//!   tick 7           capture the engine outputs, advance the ray direction
//!
//! The query phase also picks a quarter-pixel offset for the ray, so a pixel
//! is sampled at a different sub-pixel position from frame to frame.

use crate::fixed::Q88;
use crate::shapes::Feature;

pub const WINDOW_TICKS: u8 = 8;

/// Tick on which the output is captured and the accumulator moves on.
pub const ADVANCE_TICK: u8 = WINDOW_TICKS - 1;

const _: () = assert!(WINDOW_TICKS.is_power_of_two());
const _: () = assert!(3 < ADVANCE_TICK);

/// Pixel handed to the compositor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelResult {
    pub visible: bool,
    /// 6 bits, brighter is larger.
    pub luma: u8,
    pub feature: Feature,
}

/// Bits [8:3] of the intensity as offset binary, saturated to 6 bits.
#[inline]
pub fn luma_from_intensity(intensity: Q88) -> u8 {
    let slice = (intensity.raw() >> 3).clamp(-32, 31);
    (slice as u8 & 0x3f) ^ 0x20
}

/// Start tick for a pixel: column parity xor frame parity, and row parity.
#[inline(always)]
pub fn query_phase(column: usize, row: usize, frame_parity: bool) -> u8 {
    (((column as u8) ^ u8::from(frame_parity)) & 1) | (((row as u8) & 1) << 1)
}

/// What a single tick of the window does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Slot {
    pub start: bool,
    pub advance: bool,
    pub capture: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PhaseScheduler {
    phase: u8,
    result: PixelResult,
}

impl PhaseScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Position inside the current window.
    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Decide the current tick and move to the next one.
    #[inline]
    pub fn tick(&mut self, query: u8) -> Slot {
        debug_assert!(query < ADVANCE_TICK);
        let phase = self.phase;
        self.phase = (phase + 1) & (WINDOW_TICKS - 1);
        Slot {
            start: phase == query,
            advance: phase == ADVANCE_TICK,
            capture: phase == ADVANCE_TICK,
        }
    }

    /// Latch engine outputs into the pixel registers.
    #[inline]
    pub fn capture(&mut self, hit: bool, intensity: Q88, feature: Feature) {
        self.result = PixelResult { visible: hit, luma: luma_from_intensity(intensity), feature };
    }

    /// Held until the next capture.
    pub fn result(&self) -> PixelResult {
        self.result
    }
}
