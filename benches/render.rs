use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mandelbrot::{render_bigfloat, render_complex, RenderConfig};

// The big float backend is far slower; keep its raster small.
const COMPLEX_SIZE: u32 = 128;
const BIGFLOAT_SIZE: u32 = 32;

fn complex(c: &mut Criterion) {
    let config = RenderConfig::new(COMPLEX_SIZE, COMPLEX_SIZE);
    for &zoom in &[1u8, 10, 30] {
        c.bench_function(&format!("complex {0}x{0} z{1}", COMPLEX_SIZE, zoom), |b| {
            b.iter(|| {
                let mut png = Vec::new();
                render_complex(&mut png, &config, black_box(zoom)).unwrap();
                png
            })
        });
    }
}

fn bigfloat(c: &mut Criterion) {
    let config = RenderConfig::new(BIGFLOAT_SIZE, BIGFLOAT_SIZE);
    for &zoom in &[1u8, 3] {
        c.bench_function(&format!("bigfloat {0}x{0} z{1}", BIGFLOAT_SIZE, zoom), |b| {
            b.iter(|| {
                let mut png = Vec::new();
                render_bigfloat(&mut png, &config, black_box(zoom)).unwrap();
                png
            })
        });
    }
}

criterion_group!(benches, complex, bigfloat);
criterion_main!(benches);
