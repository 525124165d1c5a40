use marcher::fixed::{Q88, Vec2};
use marcher::rotate::{rotate2, rotate3, Rotated};

fn on_circle(radius: f64, degrees: u32) -> Vec2 {
    let t = f64::from(degrees).to_radians();
    Vec2::new(Q88((radius * t.cos()).round() as i16), Q88((radius * t.sin()).round() as i16))
}

fn raw(q: Q88) -> f64 {
    f64::from(q.raw())
}

fn length(v: Vec2) -> f64 {
    raw(v.x).hypot(raw(v.y))
}

// Gain of each unit including the 0.625 compensation.
const GAIN2: f64 = 0.988;
const GAIN3: f64 = 1.019;

#[test]
fn three_stage_length_over_full_turn() {
    for radius in [256.0, 1024.0, 4096.0] {
        for deg in 0..360 {
            let v = on_circle(radius, deg);
            let m = raw(rotate3(v, Vec2::default()).magnitude);
            let ratio = m / length(v);
            assert!((0.98..=1.025).contains(&ratio), "r={} deg={} ratio={}", radius, deg, ratio);
        }
    }
}

#[test]
fn two_stage_length_over_full_turn() {
    for deg in 0..360 {
        let v = on_circle(1024.0, deg);
        let m = raw(rotate2(v, Vec2::default()).magnitude);
        let ratio = m / length(v);
        assert!((0.88..=0.99).contains(&ratio), "deg={} ratio={}", deg, ratio);
    }
}

/// The rotated aux is its projection onto `vec`, off by at most the
/// sine of the residual angle (14° after three stages, 26.6° after two).
#[test]
fn aux_projection_over_full_turn() {
    let aux_len = 256.0;
    for deg in 0..360 {
        let v = on_circle(1024.0, deg);
        let (vx, vy) = (raw(v.x), raw(v.y));
        for light_deg in (0..360).step_by(15) {
            let a = on_circle(aux_len, light_deg);
            let dot = (vx * raw(a.x) + vy * raw(a.y)) / length(v);

            let got3 = raw(rotate3(v, a).aux_x);
            assert!((got3 - GAIN3 * dot).abs() <= 0.25 * aux_len, "deg={} light={}", deg, light_deg);

            let got2 = raw(rotate2(v, a).aux_x);
            assert!((got2 - GAIN2 * dot).abs() <= 0.47 * aux_len, "deg={} light={}", deg, light_deg);
        }
    }
}

#[test]
fn opposite_vectors_have_equal_length() {
    for deg in 0..180 {
        let v = on_circle(1024.0, deg);
        let w = Vec2::new(-v.x, -v.y);
        assert_eq!(rotate3(v, Vec2::default()).magnitude, rotate3(w, Vec2::default()).magnitude, "deg={}", deg);
    }
}

/// The same fold and stage sequence in exact arithmetic: no truncation in
/// the shifts and an exact 0.625 gain.
fn reference(vec: Vec2, aux: Vec2, stages: u32) -> (f64, f64) {
    let (vx, vy, px, py) = (raw(vec.x), raw(vec.y), raw(aux.x), raw(aux.y));
    let (mut x, mut y, mut ax, mut ay) = if (vx < 0.0) != (vy < 0.0) {
        (vy - vx, vx + vy, py - px, px + py)
    } else {
        (vx + vy, vy - vx, px + py, py - px)
    };
    if vy < 0.0 {
        (x, y, ax, ay) = (-x, -y, -ax, -ay);
    }
    for shift in 1..stages {
        let k = 0.5f64.powi(shift as i32);
        if y < 0.0 {
            (x, y) = (x - y * k, y + x * k);
            (ax, ay) = (ax - ay * k, ay + ax * k);
        } else {
            (x, y) = (x + y * k, y - x * k);
            (ax, ay) = (ax + ay * k, ay - ax * k);
        }
    }
    (x * 0.625, ax * 0.625)
}

#[test]
fn both_units_stay_within_two_lsb_of_exact_arithmetic() {
    for (stages, unit) in [(2, rotate2 as fn(Vec2, Vec2) -> Rotated), (3, rotate3)] {
        for deg in 0..360 {
            let v = on_circle(1024.0, deg);
            for light_deg in (0..360).step_by(15) {
                let a = on_circle(256.0, light_deg);
                let (magnitude, aux_x) = reference(v, a, stages);
                let got = unit(v, a);
                assert!((raw(got.magnitude) - magnitude).abs() <= 2.0, "stages={} deg={}", stages, deg);
                assert!(
                    (raw(got.aux_x) - aux_x).abs() <= 2.0,
                    "stages={} deg={} light={}",
                    stages,
                    deg,
                    light_deg
                );
            }
        }
    }
}
