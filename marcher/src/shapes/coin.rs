use super::{cordic_length, Feature, Sample, Shape};
use crate::fixed::{Q88, Vec3};

/// Oblate ellipsoid in the XY plane: the sphere pipeline with z scaled up
/// before the second rotation, plus a darkened rim and a darkened centre
/// measured on the XY-plane radius.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coin {
    pub radius: Q88,
    /// Thickness is `radius >> z_shift`.
    pub z_shift: u32,
    /// Rim darkening starts beyond this XY radius.
    pub edge: Q88,
    /// Centre darkening starts inside this XY radius.
    pub center: Q88,
}

impl Coin {
    pub const RADIUS: Q88 = Q88(0x0200);
    pub const Z_SHIFT: u32 = 1;
    pub const EDGE: Q88 = Q88(0x01a0);
    pub const CENTER: Q88 = Q88(0x00a0);
}

impl Default for Coin {
    fn default() -> Self {
        Self {
            radius: Self::RADIUS,
            z_shift: Self::Z_SHIFT,
            edge: Self::EDGE,
            center: Self::CENTER,
        }
    }
}

impl Coin {
    /// Amount subtracted from the lighting at XY radius `r`.
    #[inline]
    pub fn darkening(&self, r: Q88) -> Q88 {
        let rim = if r > self.edge { (r - self.edge) << 1 } else { Q88::ZERO };
        let middle = if r < self.center { (self.center - r) >> 1 } else { Q88::ZERO };
        rim + middle
    }
}

impl Shape for Coin {
    #[inline]
    fn sample(&self, position: Vec3, light: Vec3) -> Sample {
        let (xy, r) = cordic_length(position, light, self.z_shift);
        Sample {
            distance: r.magnitude - self.radius,
            intensity: r.aux_x - self.darkening(xy.magnitude),
            feature: Feature::Body,
        }
    }
}
