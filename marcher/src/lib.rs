//! Fixed-point SDF ray marcher.
//!
//! Everything on the render path is Q8.8 adds, subtracts and shifts. A
//! `Renderer` steps the camera, ray generator, march engine and per-pixel
//! scheduler in lockstep, one tick at a time, and hands finished pixels to a
//! `Context`.

pub mod camera;
pub mod fixed;
pub mod march;
pub mod rotate;
pub mod schedule;
pub mod shapes;
pub mod step;

use std::fmt;
use std::str::FromStr;

use camera::{CameraState, RayGenerator};
use march::RayMarcher;
use schedule::{query_phase, PhaseScheduler, PixelResult, WINDOW_TICKS};
use shapes::{Character, Coin, Cube, Shape, Sphere};

pub const FB_W: usize = 640;
pub const FB_H: usize = 480;

pub trait Context {
    fn wait_for_line(&mut self, pixel_y: usize);
    /// `FB_W * FB_H` pixels, row major.
    fn fb(&mut self) -> &mut [PixelResult];
    fn stats_count_ticks(&mut self, n: usize);
    fn stats_count_starts(&mut self, n: usize);
    fn stats_count_hits(&mut self, n: usize);
}

pub trait Demo {
    /// Called once the previous frame is complete. Advances the camera.
    fn pre_render(&mut self, context: &mut dyn Context);

    /// Renders the frame prepared by `pre_render`, line by line.
    fn render(&mut self, context: &mut dyn Context);
}

/// One shape, one camera, one march engine.
pub struct Renderer<S> {
    camera: CameraState,
    rays: RayGenerator,
    marcher: RayMarcher<S>,
    scheduler: PhaseScheduler,
    frame: u32,
    frame_parity: bool,
}

impl<S: Shape> Renderer<S> {
    pub fn new(shape: S) -> Self {
        let camera = CameraState::INITIAL;
        Self {
            camera,
            rays: RayGenerator::new(&camera),
            marcher: RayMarcher::new(shape),
            scheduler: PhaseScheduler::new(),
            frame: 0,
            frame_parity: false,
        }
    }

    /// Back to the power-on state.
    pub fn reset(&mut self) {
        self.camera = CameraState::INITIAL;
        self.rays.begin_frame(&self.camera);
        self.marcher.reset();
        self.scheduler.reset();
        self.frame = 0;
        self.frame_parity = false;
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn frame_parity(&self) -> bool {
        self.frame_parity
    }

    /// Integrate the camera one frame and seed the direction accumulators.
    pub fn advance_frame(&mut self) {
        let (camera, reset) = self.camera.next_frame();
        if reset {
            tracing::debug!(frame = self.frame, "camera drift reset");
        }
        self.camera = camera;
        self.frame = self.frame.wrapping_add(1);
        self.frame_parity = !self.frame_parity;
        self.rays.begin_frame(&self.camera);
    }

    pub fn begin_line(&mut self) {
        self.rays.begin_line();
    }

    /// One clock tick for the pixel at (`column`, `row`). Returns the pixel
    /// on the tick that captures it.
    ///
    /// Every decision is made from the values committed on the previous tick
    /// before anything is written back.
    #[inline]
    pub fn tick(&mut self, column: usize, row: usize) -> Option<PixelResult> {
        let query = query_phase(column, row, self.frame_parity);
        let slot = self.scheduler.tick(query);
        let start = slot.start.then(|| self.rays.ray_start(query));

        if slot.capture {
            self.scheduler.capture(self.marcher.hit(), self.marcher.intensity(), self.marcher.feature());
        }
        self.marcher.tick(start);
        if slot.advance {
            self.rays.advance_pixel();
        }

        slot.capture.then(|| self.scheduler.result())
    }

    /// A full window for one pixel.
    pub fn render_pixel(&mut self, column: usize, row: usize) -> PixelResult {
        let mut result = self.scheduler.result();
        for _ in 0..WINDOW_TICKS {
            if let Some(r) = self.tick(column, row) {
                result = r;
            }
        }
        result
    }
}

impl<S: Shape> Demo for Renderer<S> {
    fn pre_render(&mut self, _context: &mut dyn Context) {
        self.advance_frame();
    }

    fn render(&mut self, context: &mut dyn Context) {
        let mut hits = 0usize;
        for pixel_y in 0..FB_H {
            context.wait_for_line(pixel_y);
            self.begin_line();

            let mut line_hits = 0;
            for pixel_x in 0..FB_W {
                let pixel = self.render_pixel(pixel_x, pixel_y);
                line_hits += usize::from(pixel.visible);
                context.fb()[pixel_y * FB_W + pixel_x] = pixel;
            }

            context.stats_count_ticks(FB_W * WINDOW_TICKS as usize);
            context.stats_count_starts(FB_W);
            context.stats_count_hits(line_hits);
            hits += line_hits;
        }
        tracing::trace!(frame = self.frame, hits, "frame rendered");
    }
}

/// Shapes that can be selected by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    #[default]
    Sphere,
    Cube,
    Coin,
    Character,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [ShapeKind::Sphere, ShapeKind::Cube, ShapeKind::Coin, ShapeKind::Character];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Sphere => "sphere",
            ShapeKind::Cube => "cube",
            ShapeKind::Coin => "coin",
            ShapeKind::Character => "character",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseShapeError {
    #[error("unknown shape `{0}` (expected sphere, cube, coin or character)")]
    Unknown(String),
}

impl FromStr for ShapeKind {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseShapeError::Unknown(s.to_owned()))
    }
}

/// Renderer for `kind` at its default parameters.
pub fn new_demo(kind: ShapeKind) -> Box<dyn Demo> {
    match kind {
        ShapeKind::Sphere => Box::new(Renderer::new(Sphere::default())),
        ShapeKind::Cube => Box::new(Renderer::new(Cube::default())),
        ShapeKind::Coin => Box::new(Renderer::new(Coin::default())),
        ShapeKind::Character => Box::new(Renderer::new(Character)),
    }
}
