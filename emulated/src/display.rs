//! Minimal display mapping from pixel results to RGB.
//!
//! Misses show a vertical sky gradient; hits index a 64-entry luma ramp per
//! feature. The ramps are built once, like a hardware colour lookup table.

use image::{Rgb, RgbImage};
use marcher::schedule::PixelResult;
use marcher::shapes::Feature;
use marcher::{ShapeKind, FB_H, FB_W};

const LUMA_LEVELS: usize = 64;
const FEATURES: usize = 5;

/// Added to every luma level so the unlit side is not pure black.
const AMBIENT: u32 = 16;

const SKY_TOP: [u8; 3] = [72, 128, 232];
const SKY_HORIZON: [u8; 3] = [196, 220, 255];

fn body_color(kind: ShapeKind) -> [u8; 3] {
    match kind {
        ShapeKind::Sphere => [230, 90, 80],
        ShapeKind::Cube => [90, 200, 220],
        ShapeKind::Coin => [255, 200, 40],
        ShapeKind::Character => [255, 160, 200],
    }
}

fn feature_color(kind: ShapeKind, feature: Feature) -> [u8; 3] {
    match feature {
        Feature::Body => body_color(kind),
        Feature::Foot => [220, 40, 70],
        Feature::Mouth => [150, 20, 40],
        Feature::Cheek => [255, 110, 150],
        Feature::Eye => [30, 30, 90],
    }
}

fn shade(base: [u8; 3], luma: usize) -> Rgb<u8> {
    let level = luma as u32 + AMBIENT;
    let max = (LUMA_LEVELS as u32 - 1) + AMBIENT;
    Rgb(base.map(|c| (u32::from(c) * level / max) as u8))
}

fn lerp(a: u8, b: u8, t: u32, span: u32) -> u8 {
    let (a, b) = (u32::from(a), u32::from(b));
    ((a * (span - t) + b * t) / span) as u8
}

pub struct Lut {
    ramps: [[Rgb<u8>; LUMA_LEVELS]; FEATURES],
    sky: Vec<Rgb<u8>>,
}

impl Lut {
    pub fn new(kind: ShapeKind) -> Self {
        let features = [Feature::Body, Feature::Foot, Feature::Mouth, Feature::Cheek, Feature::Eye];
        let mut ramps = [[Rgb([0, 0, 0]); LUMA_LEVELS]; FEATURES];
        for feature in features {
            let base = feature_color(kind, feature);
            for (luma, entry) in ramps[usize::from(feature.code())].iter_mut().enumerate() {
                *entry = shade(base, luma);
            }
        }

        let span = FB_H as u32 - 1;
        let sky = (0..FB_H as u32)
            .map(|y| Rgb([0, 1, 2].map(|i| lerp(SKY_TOP[i], SKY_HORIZON[i], y, span))))
            .collect();

        Self { ramps, sky }
    }

    pub fn color(&self, pixel: PixelResult, pixel_y: usize) -> Rgb<u8> {
        if pixel.visible {
            let luma = usize::from(pixel.luma).min(LUMA_LEVELS - 1);
            self.ramps[usize::from(pixel.feature.code())][luma]
        } else {
            self.sky[pixel_y.min(FB_H - 1)]
        }
    }

    pub fn to_image(&self, fb: &[PixelResult]) -> RgbImage {
        RgbImage::from_fn(FB_W as u32, FB_H as u32, |x, y| {
            let (x, y) = (x as usize, y as usize);
            self.color(fb[y * FB_W + x], y)
        })
    }
}
