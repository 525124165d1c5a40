use criterion::{criterion_group, criterion_main, Criterion};
use marcher::schedule::PixelResult;
use marcher::{new_demo, Context, ShapeKind, FB_H, FB_W};

struct Sink {
    fb: Vec<PixelResult>,
}

impl Context for Sink {
    fn wait_for_line(&mut self, _pixel_y: usize) {}
    fn fb(&mut self) -> &mut [PixelResult] {
        &mut self.fb
    }
    fn stats_count_ticks(&mut self, _n: usize) {}
    fn stats_count_starts(&mut self, _n: usize) {}
    fn stats_count_hits(&mut self, _n: usize) {}
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");
    group.sample_size(10);
    for kind in ShapeKind::ALL {
        let mut demo = new_demo(kind);
        let mut sink = Sink { fb: vec![PixelResult::default(); FB_W * FB_H] };
        group.bench_function(kind.name(), |b| {
            b.iter(|| {
                demo.pre_render(&mut sink);
                demo.render(&mut sink);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_frame);
criterion_main!(benches);
