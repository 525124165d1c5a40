//! Vector-rotate unit.
//!
//! Shift-add CORDIC in vectoring mode: `vec` is driven onto the positive x
//! axis, which leaves its length in x, while a companion `aux` vector goes
//! through exactly the same sequence of rotations. After the last stage the
//! x component of `aux` is its projection onto the direction of `vec`, which
//! is how the shapes get lighting out of the same pass that measures
//! distance.
//!
//! Stage 0 folds by a signed 45° (or 135°) step plus a deferred 180° negation,
//! leaving a residual angle in [-45°, 45°]. Stage `k` then rotates by
//! `±atan(2^-k)` depending on the sign of the running y.
//!
//!   stages   worst residual   combined gain * 0.625
//!   2        26.6°            0.988
//!   3        14.0°            1.019
//!
//! The `x/2 + x/8` gain compensation is deliberately 0.625 rather than the
//! textbook 0.6073; shape radii are tuned against it.

use crate::fixed::{Q88, Vec2};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rotated {
    /// Approximate `|vec|`.
    pub magnitude: Q88,
    /// `aux` after the same rotation, x component only.
    pub aux_x: Q88,
}

#[inline(always)]
fn gain(x: Q88) -> Q88 {
    (x >> 1) + (x >> 3)
}

/// Rotate `vec` onto +x using `stages` shift-add stages (the fold counts as
/// the first one) and carry `aux` along.
#[inline]
pub fn rotate(vec: Vec2, aux: Vec2, stages: u32) -> Rotated {
    debug_assert!((1..16).contains(&stages));

    let Vec2 { x, y } = vec;
    let Vec2 { x: ax, y: ay } = aux;

    let (mut x, mut y, mut ax, mut ay) = if x.is_negative() != y.is_negative() {
        (y - x, x + y, ay - ax, ax + ay)
    } else {
        (x + y, y - x, ax + ay, ay - ax)
    };

    if vec.y.is_negative() {
        x = -x;
        y = -y;
        ax = -ax;
        ay = -ay;
    }

    for shift in 1..stages {
        if y.is_negative() {
            (x, y) = (x - (y >> shift), y + (x >> shift));
            (ax, ay) = (ax - (ay >> shift), ay + (ax >> shift));
        } else {
            (x, y) = (x + (y >> shift), y - (x >> shift));
            (ax, ay) = (ax + (ay >> shift), ay - (ax >> shift));
        }
    }

    Rotated { magnitude: gain(x), aux_x: gain(ax) }
}

/// Two stages. Used where the input is already one accurate magnitude.
#[inline(always)]
pub fn rotate2(vec: Vec2, aux: Vec2) -> Rotated {
    rotate(vec, aux, 2)
}

/// Three stages, for the primary XY-plane magnitude.
#[inline(always)]
pub fn rotate3(vec: Vec2, aux: Vec2) -> Rotated {
    rotate(vec, aux, 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: i16, y: i16) -> Vec2 {
        Vec2::new(Q88(x), Q88(y))
    }

    #[test]
    fn zero_vector_has_zero_length() {
        let r = rotate2(v(0, 0), v(0x0100, 0));
        assert_eq!(r.magnitude, Q88::ZERO);
    }

    #[test]
    fn three_four_five() {
        // 5.0 * 0.988 minus the residual angle of the 2-stage unit
        let r = rotate2(v(0x0300, 0x0400), v(0x0100, 0));
        assert_eq!(r.magnitude, Q88(1200));

        let r = rotate3(v(0x0300, 0x0400), v(0x0100, 0));
        assert_eq!(r.magnitude, Q88(1300));
    }

    #[test]
    fn sign_of_input_does_not_change_length() {
        let a = rotate3(v(0x0300, 0x0400), v(0, 0));
        let b = rotate3(v(-0x0300, -0x0400), v(0, 0));
        let c = rotate3(v(-0x0300, 0x0400), v(0, 0));
        let d = rotate3(v(0x0300, -0x0400), v(0, 0));
        for r in [b, c, d] {
            assert_eq!(r.magnitude, a.magnitude);
        }
    }

    #[test]
    fn aux_parallel_to_vec_projects_to_its_length() {
        let r = rotate3(v(0x0100, 0x0100), v(0x0100, 0x0100));
        assert_eq!(r.aux_x, r.magnitude);
        assert_ne!(r.aux_x, Q88::ZERO);
    }
}
