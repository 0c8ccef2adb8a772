use std::io::Cursor;

use criterion::{black_box, BenchmarkId, Criterion};
use image::{ImageFormat, Rgba, RgbaImage};

use letterfit::{box_blur, letterbox, Background, EngineKind, Letterbox};

const SRC_WIDTH: u32 = 1280;
const SRC_HEIGHT: u32 = 853;

fn source_png() -> Vec<u8> {
    // Gradient, so the resamplers get non-trivial input.
    let image = RgbaImage::from_fn(SRC_WIDTH, SRC_HEIGHT, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    });
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn bench_letterbox(criterion: &mut Criterion) {
    let png = source_png();
    let transparent = Letterbox::new(400, 400);
    let blurred = Letterbox::new(400, 400).background(Background::Blur { block: 10 });

    let mut group = criterion.benchmark_group("letterbox 1280x853 into 400x400");
    group.sample_size(30);
    for kind in EngineKind::ALL {
        let engine = kind.create();
        for (parameter, options) in [("transparent", &transparent), ("blur", &blurred)] {
            group.bench_with_input(
                BenchmarkId::new(kind.name(), parameter),
                options,
                |bencher, options| {
                    bencher.iter(|| letterbox(engine.as_ref(), black_box(&png), options).unwrap())
                },
            );
        }
    }
    group.finish();
}

fn bench_box_blur(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("box blur 400x400");
    group.sample_size(20);
    for block in [2u32, 10] {
        group.bench_with_input(BenchmarkId::new("block", block), &block, |bencher, &block| {
            bencher.iter(|| {
                let mut image = RgbaImage::from_pixel(400, 400, Rgba([90, 120, 30, 255]));
                box_blur(&mut image, black_box(block)).unwrap();
                image
            })
        });
    }
    group.finish();
}

fn main() {
    let mut criterion = Criterion::default().configure_from_args();
    bench_letterbox(&mut criterion);
    bench_box_blur(&mut criterion);
    criterion.final_summary();
}
