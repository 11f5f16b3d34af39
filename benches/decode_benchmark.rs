use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, ImageOutputFormat, RgbaImage};

fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8, 255])
    });

    let mut png_bytes = Vec::new();
    DynamicImage::ImageRgba8(image).write_to(&mut png_bytes, ImageOutputFormat::Png).unwrap();
    png_bytes
}

fn decode_benchmark(c: &mut Criterion) {
    let small = gradient_png(64, 64);
    let large = gradient_png(1920, 1080);

    c.bench_function("decode 64x64", |b| b.iter(|| pngdump::decode(black_box(&small)).unwrap()));
    c.bench_function("decode 1920x1080", |b| {
        b.iter(|| pngdump::decode(black_box(&large)).unwrap())
    });
}

criterion_group!(benches, decode_benchmark);
criterion_main!(benches);
