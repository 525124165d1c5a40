use super::{cordic_length, Feature, Sample, Shape};
use crate::fixed::{Q88, Vec3};

/// Sphere at the origin. The second rotation leaves the light in a frame
/// whose x axis is the surface normal, so its x component is the shading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sphere {
    pub radius: Q88,
}

impl Sphere {
    pub const RADIUS: Q88 = Q88(0x0200);

    pub const fn new(radius: Q88) -> Self {
        Self { radius }
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::new(Self::RADIUS)
    }
}

impl Shape for Sphere {
    #[inline]
    fn sample(&self, position: Vec3, light: Vec3) -> Sample {
        let (_, r) = cordic_length(position, light, 0);
        Sample {
            distance: r.magnitude - self.radius,
            intensity: r.aux_x,
            feature: Feature::Body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_is_minus_radius() {
        let s = Sphere::default().sample(Vec3::ZERO, Vec3::from_raw(0, 0, -0x0100));
        assert_eq!(s.distance, -Sphere::RADIUS);
    }

    #[test]
    fn facing_light_is_bright_and_back_is_dark() {
        let light = Vec3::from_raw(0, 0, -0x0100);
        let front = Sphere::default().sample(Vec3::from_raw(0, 0, -0x0200), light);
        let back = Sphere::default().sample(Vec3::from_raw(0, 0, 0x0200), light);
        assert!(front.intensity.raw() > 0x00c0, "{:?}", front);
        assert!(back.intensity.raw() < -0x00c0, "{:?}", back);
    }
}
