//! Q8.8 fixed point.
//!
//! Every operation here wraps exactly like a 16-bit two's-complement register:
//! add, subtract, negate and shifts all go through the `wrapping_*` family, so
//! results are identical in debug and release builds and overflow never traps.

use core::ops::{Add, AddAssign, Neg, Not, Shl, Shr, Sub, SubAssign};

/// Signed Q8.8 scalar: 1 sign bit, 7 integer bits, 8 fraction bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Q88(pub i16);

impl Q88 {
    pub const FRAC_BITS: u32 = 8;
    pub const ZERO: Q88 = Q88(0);
    pub const ONE: Q88 = Q88(1 << Self::FRAC_BITS);

    #[inline(always)]
    pub const fn from_raw(raw: i16) -> Self {
        Q88(raw)
    }

    #[inline(always)]
    pub const fn raw(self) -> i16 {
        self.0
    }

    /// Sign bit.
    #[inline(always)]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// `|x|`; `-128.0` maps to itself, as it would in hardware.
    #[inline(always)]
    pub const fn abs(self) -> Self {
        Q88(self.0.wrapping_abs())
    }

    /// Sign-extended into the 32-bit accumulator domain.
    #[inline(always)]
    pub const fn wide(self) -> i32 {
        self.0 as i32
    }

    /// Low 16 bits of a wide value.
    #[inline(always)]
    pub const fn from_wide(wide: i32) -> Self {
        Q88(wide as i16)
    }

    /// Lossy view for diagnostics and tests. Never used on the render path.
    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / f64::from(1i32 << Self::FRAC_BITS)
    }
}

impl Add for Q88 {
    type Output = Q88;
    #[inline(always)]
    fn add(self, rhs: Q88) -> Q88 {
        Q88(self.0.wrapping_add(rhs.0))
    }
}

impl AddAssign for Q88 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Q88) {
        *self = *self + rhs;
    }
}

impl Sub for Q88 {
    type Output = Q88;
    #[inline(always)]
    fn sub(self, rhs: Q88) -> Q88 {
        Q88(self.0.wrapping_sub(rhs.0))
    }
}

impl SubAssign for Q88 {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Q88) {
        *self = *self - rhs;
    }
}

impl Neg for Q88 {
    type Output = Q88;
    #[inline(always)]
    fn neg(self) -> Q88 {
        Q88(self.0.wrapping_neg())
    }
}

/// One's complement: `!x == -x - 1`.
impl Not for Q88 {
    type Output = Q88;
    #[inline(always)]
    fn not(self) -> Q88 {
        Q88(!self.0)
    }
}

/// Arithmetic (sign-extending) right shift. `n` must be below 16.
impl Shr<u32> for Q88 {
    type Output = Q88;
    #[inline(always)]
    fn shr(self, n: u32) -> Q88 {
        debug_assert!(n < 16);
        Q88(self.0 >> n)
    }
}

/// Left shift discarding bits pushed past the sign. `n` must be below 16.
impl Shl<u32> for Q88 {
    type Output = Q88;
    #[inline(always)]
    fn shl(self, n: u32) -> Q88 {
        debug_assert!(n < 16);
        Q88(self.0.wrapping_shl(n))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vec2 {
    pub x: Q88,
    pub y: Q88,
}

impl Vec2 {
    #[inline(always)]
    pub const fn new(x: Q88, y: Q88) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vec3 {
    pub x: Q88,
    pub y: Q88,
    pub z: Q88,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::from_raw(0, 0, 0);

    #[inline(always)]
    pub const fn new(x: Q88, y: Q88, z: Q88) -> Self {
        Self { x, y, z }
    }

    #[inline(always)]
    pub const fn from_raw(x: i16, y: i16, z: i16) -> Self {
        Self { x: Q88(x), y: Q88(y), z: Q88(z) }
    }

    #[inline(always)]
    pub const fn raw(self) -> [i16; 3] {
        [self.x.0, self.y.0, self.z.0]
    }

    /// `|x| + |y| + |z|`
    #[inline(always)]
    pub fn manhattan(self) -> Q88 {
        self.x.abs() + self.y.abs() + self.z.abs()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline(always)]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline(always)]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    #[inline(always)]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl Not for Vec3 {
    type Output = Vec3;
    #[inline(always)]
    fn not(self) -> Vec3 {
        Vec3::new(!self.x, !self.y, !self.z)
    }
}

impl Shr<u32> for Vec3 {
    type Output = Vec3;
    #[inline(always)]
    fn shr(self, n: u32) -> Vec3 {
        Vec3::new(self.x >> n, self.y >> n, self.z >> n)
    }
}

/// `v * n` for a constant `n`, as a chain of shifts and adds over the set
/// bits of `n`. Wraps on overflow.
pub const fn shift_add_mul(v: i32, n: u32) -> i32 {
    let mut acc = 0i32;
    let mut bit = 0;
    while bit < 32 {
        if (n >> bit) & 1 != 0 {
            acc = acc.wrapping_add(v.wrapping_shl(bit));
        }
        bit += 1;
    }
    acc
}
