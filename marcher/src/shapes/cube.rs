use super::{Feature, Sample, Shape};
use crate::fixed::{Q88, Vec3};

/// Axis-aligned cube centred on the origin.
///
/// The distance is the exact Chebyshev box distance. The normal is the axis
/// that attains it (x before y before z on ties), signed by the position on
/// that axis, so lighting is just the matching light component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cube {
    pub half_size: Q88,
}

impl Cube {
    pub const HALF_SIZE: Q88 = Q88(0x0180);

    pub const fn new(half_size: Q88) -> Self {
        Self { half_size }
    }
}

impl Default for Cube {
    fn default() -> Self {
        Self::new(Self::HALF_SIZE)
    }
}

#[inline(always)]
fn facing(axis: Q88, light: Q88) -> Q88 {
    if axis.is_negative() {
        -light
    } else {
        light
    }
}

impl Shape for Cube {
    #[inline]
    fn sample(&self, p: Vec3, light: Vec3) -> Sample {
        let dx = p.x.abs() - self.half_size;
        let dy = p.y.abs() - self.half_size;
        let dz = p.z.abs() - self.half_size;

        let (distance, lit) = if dx >= dy && dx >= dz {
            (dx, facing(p.x, light.x))
        } else if dy >= dz {
            (dy, facing(p.y, light.y))
        } else {
            (dz, facing(p.z, light.z))
        };

        // 3/4 of the face-on value
        let intensity = lit - (lit >> 2);

        Sample { distance, intensity, feature: Feature::Body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_prefer_x_then_y() {
        let light = Vec3::from_raw(0x0100, 0x0080, 0x0040);
        let c = Cube::default();
        let corner = c.sample(Vec3::from_raw(0x0180, 0x0180, 0x0180), light);
        assert_eq!(corner.distance, Q88::ZERO);
        assert_eq!(corner.intensity, Q88(0x00c0));

        let edge = c.sample(Vec3::from_raw(0, -0x0180, 0x0180), light);
        assert_eq!(edge.intensity, Q88(-0x0060));
    }

    #[test]
    fn face_on_light_is_three_quarters() {
        let face = Cube::default().sample(Vec3::from_raw(0, 0, -0x0180), Vec3::from_raw(0, 0, -0x0100));
        assert_eq!(face.distance, Q88::ZERO);
        assert_eq!(face.intensity, Q88(192));
    }
}
