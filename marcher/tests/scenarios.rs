use marcher::fixed::{Q88, Vec3};
use marcher::march::{RayMarcher, RayStart, DISTANCE_BIAS, MISS_DISTANCE};
use marcher::schedule::{luma_from_intensity, PixelResult};
use marcher::shapes::{Character, Coin, Cube, Feature, Shape, Sphere};
use marcher::{Context, Demo, Renderer, FB_H, FB_W};

fn ray(direction: Vec3) -> RayStart {
    RayStart {
        origin: Vec3::from_raw(0, 0, -0x0600),
        direction,
        light: Vec3::from_raw(0, 0, -0x0100),
    }
}

fn march<S: Shape>(shape: S, start: RayStart, steps: usize) -> RayMarcher<S> {
    let mut m = RayMarcher::new(shape);
    m.tick(Some(start));
    for _ in 0..steps {
        m.tick(None);
    }
    m
}

#[test]
fn head_on_sphere_hits_at_full_brightness() {
    let m = march(Sphere::default(), ray(Vec3::from_raw(0, 0, 0x4000)), 6);
    assert!(m.hit());
    assert_eq!(m.intensity(), Q88(240));
    assert_eq!(luma_from_intensity(m.intensity()), 62);

    let r = m.registers();
    assert!(r.ray.accumulated < MISS_DISTANCE);
    // stopped within the surface tolerance of z = -2.0
    assert!((r.ray.position.z.raw() + 0x0200).abs() < 48, "{:?}", r.ray.position);
}

#[test]
fn head_on_sphere_converges() {
    let mut m = RayMarcher::new(Sphere::default());
    m.tick(Some(ray(Vec3::from_raw(0, 0, 0x4000))));
    let mut z = Vec::new();
    for _ in 0..4 {
        m.tick(None);
        z.push(m.registers().ray.position.z.raw());
    }
    assert_eq!(z, vec![-896, -576, -556, -546]);
}

#[test]
fn parallel_ray_misses_and_stays_missed() {
    let mut m = RayMarcher::new(Sphere::default());
    m.tick(Some(ray(Vec3::from_raw(0x4000, 0, 0))));
    m.tick(None);
    assert!(m.hit());
    m.tick(None);
    assert!(!m.hit());
    assert_eq!(m.registers().ray.accumulated, Q88(2570));

    // the accumulator keeps going and eventually wraps negative; the miss
    // is sticky regardless
    for _ in 0..16 {
        m.tick(None);
        assert!(!m.hit());
    }
}

#[test]
fn new_start_revives_a_dead_ray() {
    let mut m = march(Sphere::default(), ray(Vec3::from_raw(0x4000, 0, 0)), 6);
    assert!(!m.hit());
    m.tick(Some(ray(Vec3::from_raw(0, 0, 0x4000))));
    assert!(m.hit());
    assert_eq!(m.registers().ray.accumulated, DISTANCE_BIAS);
}

#[test]
fn every_shape_is_hit_from_the_pre_step_distance() {
    let near = |direction| RayStart { origin: Vec3::from_raw(0, 0, -0x0400), ..ray(direction) };
    let dir = Vec3::from_raw(0, 0, 0x4000);
    assert!(march(Sphere::default(), near(dir), 6).hit());
    assert!(march(Cube::default(), near(dir), 6).hit());

    let c = march(Character, near(dir), 6);
    assert!(c.hit());
    assert_eq!(c.feature(), Feature::Body);

    // the coin is edge-on along x
    let rim = RayStart {
        origin: Vec3::from_raw(-0x0400, 0, 0),
        direction: Vec3::from_raw(0x4000, 0, 0),
        light: Vec3::from_raw(-0x0100, 0, 0),
    };
    assert!(march(Coin::default(), rim, 6).hit());
}

struct Frame {
    fb: Vec<PixelResult>,
    lines: usize,
    ticks: usize,
    starts: usize,
    hits: usize,
}

impl Frame {
    fn new() -> Self {
        Self { fb: vec![PixelResult::default(); FB_W * FB_H], lines: 0, ticks: 0, starts: 0, hits: 0 }
    }

    fn at(&self, x: usize, y: usize) -> PixelResult {
        self.fb[y * FB_W + x]
    }
}

impl Context for Frame {
    fn wait_for_line(&mut self, pixel_y: usize) {
        assert_eq!(pixel_y, self.lines);
        self.lines += 1;
    }
    fn fb(&mut self) -> &mut [PixelResult] {
        &mut self.fb
    }
    fn stats_count_ticks(&mut self, n: usize) {
        self.ticks += n;
    }
    fn stats_count_starts(&mut self, n: usize) {
        self.starts += n;
    }
    fn stats_count_hits(&mut self, n: usize) {
        self.hits += n;
    }
}

#[test]
fn first_sphere_frame() {
    let mut demo = Renderer::new(Sphere::default());
    let mut frame = Frame::new();
    demo.pre_render(&mut frame);
    demo.render(&mut frame);

    assert_eq!(frame.lines, FB_H);
    assert_eq!(frame.ticks, FB_W * FB_H * 8);
    assert_eq!(frame.starts, FB_W * FB_H);
    assert_eq!(frame.hits, frame.fb.iter().filter(|p| p.visible).count());

    let centre = frame.at(FB_W / 2, FB_H / 2);
    assert!(centre.visible);
    assert_eq!(centre.luma, 50);

    for (x, y) in [(0, 0), (FB_W - 1, 0), (0, FB_H - 1), (FB_W - 1, FB_H - 1), (100, FB_H / 2)] {
        assert!(!frame.at(x, y).visible, "({}, {})", x, y);
    }

    // a disc in the middle of the screen
    assert!(frame.hits > FB_W * FB_H / 10);
    assert!(frame.hits < FB_W * FB_H * 3 / 5);
}

#[test]
fn top_left_corner_is_background() {
    let mut r = Renderer::new(Character);
    r.advance_frame();
    r.begin_line();
    let a = r.render_pixel(0, 0);
    let b = r.render_pixel(1, 0);
    // off to the top left of the character
    assert!(!a.visible && !b.visible);
    assert_eq!(r.frame(), 1);
}
