//! Distance-scaled step.
//!
//! `step3(d, dir)` approximates `dir * d / 16384` without a multiplier: the
//! leading set bit of `|d|` picks a right shift for `dir`. A negative `d`
//! complements `dir` first (one's complement, no carry), so the result for
//! `-d` is one LSB more negative than the negation of the result for `d`.
//!
//!   |d|         shift
//!   512..1023   5
//!   256..511    6
//!   ...
//!   1           14
//!   0           zero vector
//!
//! Directions are scaled so that 1.0 == 0x4000; a unit direction then moves
//! by roughly `d` (rounded down to a power of two) per step.

use crate::fixed::{Q88, Vec3};

/// Largest magnitude the 11-bit distance input can carry.
pub const DISTANCE_MAX: i16 = (1 << 10) - 1;

/// `(lowest |d| in the bucket, right shift)`, scanned from the top bit down.
pub const STEP_BUCKETS: [(u16, u32); 10] = [
    (1 << 9, 5),
    (1 << 8, 6),
    (1 << 7, 7),
    (1 << 6, 8),
    (1 << 5, 9),
    (1 << 4, 10),
    (1 << 3, 11),
    (1 << 2, 12),
    (1 << 1, 13),
    (1 << 0, 14),
];

/// Saturate an SDF value into the 11-bit signed step input.
#[inline(always)]
pub fn clamp_distance(distance: Q88) -> i16 {
    distance.raw().clamp(-DISTANCE_MAX, DISTANCE_MAX)
}

/// Shift selected by a 10-bit magnitude, `None` for zero.
#[inline]
pub fn step_shift(magnitude: u16) -> Option<u32> {
    STEP_BUCKETS
        .iter()
        .find(|&&(floor, _)| magnitude >= floor)
        .map(|&(_, shift)| shift)
}

/// Step vector for an 11-bit signed `distance` along `dir`.
#[inline]
pub fn step3(distance: i16, dir: Vec3) -> Vec3 {
    let magnitude = distance.unsigned_abs() & DISTANCE_MAX as u16;
    let Some(shift) = step_shift(magnitude) else {
        return Vec3::ZERO;
    };
    let dir = if distance < 0 { !dir } else { dir };
    dir >> shift
}
