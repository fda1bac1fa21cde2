//! Criterion benchmarks for the per-frame analysis pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use live_annotator::color_range::ColorRange;
use live_annotator::{segmentation, shape};
use opencv::core::{Mat, Point, Rect, Scalar, Vector, CV_8UC3};
use opencv::imgproc;
use opencv::prelude::*;

fn synthetic_frame() -> Mat {
    let mut frame = Mat::zeros(480, 640, CV_8UC3).unwrap().to_mat().unwrap();
    let green = Scalar::new(0.0, 255.0, 0.0, 0.0);

    imgproc::rectangle(
        &mut frame,
        Rect::new(100, 100, 120, 100),
        green,
        imgproc::FILLED,
        imgproc::LINE_8,
        0,
    )
    .unwrap();

    let mut triangle = Vector::<Vector<Point>>::new();
    triangle.push(Vector::from_iter([
        Point::new(400, 300),
        Point::new(500, 300),
        Point::new(450, 200),
    ]));
    imgproc::fill_poly(&mut frame, &triangle, green, imgproc::LINE_8, 0, Point::new(0, 0)).unwrap();

    frame
}

fn dense_circle_contour() -> Vector<Point> {
    Vector::from_iter((0..128).map(|i| {
        let theta = f64::from(i) * std::f64::consts::TAU / 128.0;
        Point::new(
            (300.0 + 150.0 * theta.cos()).round() as i32,
            (300.0 + 150.0 * theta.sin()).round() as i32,
        )
    }))
}

fn bench_segment(c: &mut Criterion) {
    let frame = synthetic_frame();
    let range = ColorRange::green();

    c.bench_function("segment_640x480_two_shapes", |b| {
        b.iter(|| segmentation::segment(black_box(&frame), black_box(&range), 500.0).unwrap());
    });
}

fn bench_classify(c: &mut Criterion) {
    let contour = dense_circle_contour();

    c.bench_function("classify_dense_circle_contour", |b| {
        b.iter(|| shape::classify(black_box(&contour)).unwrap());
    });
}

fn bench_segment_and_classify(c: &mut Criterion) {
    let frame = synthetic_frame();
    let range = ColorRange::green();

    c.bench_function("segment_and_classify_640x480", |b| {
        b.iter(|| {
            let contours = segmentation::segment(black_box(&frame), black_box(&range), 500.0).unwrap();
            shape::classify_all(&contours).unwrap()
        });
    });
}

criterion_group!(benches, bench_segment, bench_classify, bench_segment_and_classify);
criterion_main!(benches);
