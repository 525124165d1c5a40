//! Host frontend.
//!
//! Usage:
//!   cargo run -p emulated -- [--shape sphere] [--frames 5] [--output output] [--skip 0]
//!   cargo run -p emulated --features window -- --window [--shape character]
//!
//! Headless runs write `frame_NNNN.png` files; `--window` shows a live view
//! instead.

mod display;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use marcher::schedule::PixelResult;
use marcher::{new_demo, Context, Demo, ShapeKind, FB_H, FB_W};
use tracing::{debug, info};

use display::Lut;

#[derive(Parser, Debug)]
#[command(version, about = "Render the fixed-point ray marcher on the host")]
struct Args {
    /// sphere, cube, coin or character
    #[arg(long, default_value_t = ShapeKind::Sphere)]
    shape: ShapeKind,

    /// Frames to capture.
    #[arg(long, default_value_t = 5)]
    frames: u32,

    #[arg(long, default_value = "output")]
    output: PathBuf,

    /// Advance the camera this many frames before capturing.
    #[arg(long, default_value_t = 0)]
    skip: u32,

    /// Live view instead of PNG capture.
    #[cfg(feature = "window")]
    #[arg(long)]
    window: bool,
}

#[derive(Clone, Copy, Debug, Default)]
struct Stats {
    ticks: usize,
    starts: usize,
    hits: usize,
}

struct ContextS<'a> {
    fb: &'a mut [PixelResult],
    stats: Stats,
}

impl<'a> ContextS<'a> {
    fn new(fb: &'a mut [PixelResult]) -> Self {
        Self { fb, stats: Stats::default() }
    }
}

impl<'a> Context for ContextS<'a> {
    fn wait_for_line(&mut self, _pixel_y: usize) {
    }
    fn fb(&mut self) -> &mut [PixelResult] {
        self.fb
    }
    fn stats_count_ticks(&mut self, n: usize) {
        self.stats.ticks += n;
    }
    fn stats_count_starts(&mut self, n: usize) {
        self.stats.starts += n;
    }
    fn stats_count_hits(&mut self, n: usize) {
        self.stats.hits += n;
    }
}

/// One `pre_render` + `render` cycle into `fb`.
fn render_frame(demo: &mut dyn Demo, fb: &mut [PixelResult]) -> Stats {
    let mut context = ContextS::new(fb);
    demo.pre_render(&mut context);
    demo.render(&mut context);
    context.stats
}

fn capture(demo: &mut dyn Demo, lut: &Lut, args: &Args) -> Result<()> {
    fs::create_dir_all(&args.output)
        .with_context(|| format!("creating output directory {}", args.output.display()))?;

    let mut fb = vec![PixelResult::default(); FB_W * FB_H];
    for n in 0..args.frames {
        let stats = render_frame(demo, &mut fb);
        debug!(frame = n, ticks = stats.ticks, starts = stats.starts, hits = stats.hits, "frame stats");

        let path = args.output.join(format!("frame_{:04}.png", n));
        lut.to_image(&fb)
            .save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), hits = stats.hits, "captured frame");
    }
    Ok(())
}

#[cfg(feature = "window")]
fn run_window(demo: &mut dyn Demo, lut: &Lut) -> Result<()> {
    use sdl2::event::Event;
    use sdl2::keyboard::Keycode;
    use sdl2::rect::Point;
    use std::time::Duration;

    let sdl_context = sdl2::init().map_err(anyhow::Error::msg).context("initialising SDL")?;
    let video_subsystem = sdl_context.video().map_err(anyhow::Error::msg)?;

    let window = video_subsystem
        .window("marcher", FB_W as u32, FB_H as u32)
        .position_centered()
        .build()
        .context("opening window")?;

    let mut canvas = window.into_canvas().build().context("creating canvas")?;
    let mut fb = vec![PixelResult::default(); FB_W * FB_H];

    let mut event_pump = sdl_context.event_pump().map_err(anyhow::Error::msg)?;
    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit {..} |
                Event::KeyDown { keycode: Some(Keycode::Escape), .. } => {
                    break 'running
                },
                _ => {}
            }
        }

        let stats = render_frame(demo, &mut fb);
        debug!(ticks = stats.ticks, hits = stats.hits, "frame stats");

        for y in 0..FB_H {
            for x in 0..FB_W {
                let [r, g, b] = lut.color(fb[y * FB_W + x], y).0;
                canvas.set_draw_color(sdl2::pixels::Color::RGB(r, g, b));
                canvas.draw_point(Point::new(x as i32, y as i32)).map_err(anyhow::Error::msg)?;
            }
        }

        canvas.present();
        ::std::thread::sleep(Duration::new(0, 1_000_000_000u32 / 60));
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    info!(shape = %args.shape, frames = args.frames, skip = args.skip, output = %args.output.display(), "starting");

    let mut demo = new_demo(args.shape);
    let lut = Lut::new(args.shape);

    let mut fb = vec![PixelResult::default(); FB_W * FB_H];
    for _ in 0..args.skip {
        demo.pre_render(&mut ContextS::new(&mut fb));
    }

    #[cfg(feature = "window")]
    {
        if args.window {
            return run_window(demo.as_mut(), &lut);
        }
    }

    capture(demo.as_mut(), &lut, &args)
}
