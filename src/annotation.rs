//! Drawing of analysis results onto a copy of the captured frame.
//!
//! Rendering is purely an output step: both entry points clone the pristine
//! frame and draw on the clone, so the caller's frame survives unmodified.

use crate::constants::{
    CENTROID_MARKER_RADIUS, CONTOUR_THICKNESS, DETECTION_BOX_THICKNESS, LABEL_FONT_SCALE,
};
use crate::error::Result;
use crate::face_detection::FaceDetections;
use crate::shape::ClassifiedShape;
use opencv::core::{Mat, Point, Scalar, Vector};
use opencv::imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8};
use opencv::prelude::*;

/// Draw segmentation results: every contour outlined, plus a marker circle
/// and the shape label text at each classified centroid.
pub fn render_shapes(
    frame: &Mat,
    contours: &Vector<Vector<Point>>,
    shapes: &[ClassifiedShape],
) -> Result<Mat> {
    let mut annotated = frame.clone();

    imgproc::draw_contours(
        &mut annotated,
        contours,
        -1,
        Scalar::new(255.0, 0.0, 0.0, 0.0),
        CONTOUR_THICKNESS,
        LINE_8,
        &Mat::default(),
        i32::MAX,
        Point::new(0, 0),
    )?;

    for shape in shapes {
        #[allow(clippy::cast_possible_truncation)]
        let center = Point::new(shape.centroid.x.round() as i32, shape.centroid.y.round() as i32);
        imgproc::put_text(
            &mut annotated,
            &shape.label.to_string(),
            center,
            FONT_HERSHEY_SIMPLEX,
            LABEL_FONT_SCALE,
            Scalar::new(0.0, 0.0, 0.0, 0.0),
            1,
            LINE_8,
            false,
        )?;
        imgproc::circle(
            &mut annotated,
            center,
            CENTROID_MARKER_RADIUS,
            Scalar::new(255.0, 0.0, 0.0, 0.0),
            1,
            LINE_8,
            0,
        )?;
    }

    Ok(annotated)
}

/// Draw one rectangle per detection box.
pub fn render_faces(frame: &Mat, detections: &FaceDetections) -> Result<Mat> {
    let mut annotated = frame.clone();
    for rect in &detections.boxes {
        imgproc::rectangle(
            &mut annotated,
            *rect,
            Scalar::new(255.0, 0.0, 0.0, 0.0),
            DETECTION_BOX_THICKNESS,
            LINE_8,
            0,
        )?;
    }
    Ok(annotated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face_detection::DetectorKind;
    use crate::shape::ShapeLabel;
    use opencv::core::{self, Point2f, Rect, CV_8UC3};

    fn blank_frame() -> Mat {
        Mat::zeros(240, 320, CV_8UC3).unwrap().to_mat().unwrap()
    }

    fn pixel_sum(frame: &Mat) -> f64 {
        let sums = core::sum_elems(frame).unwrap();
        sums[0] + sums[1] + sums[2] + sums[3]
    }

    #[test]
    fn test_render_faces_draws_on_a_copy() {
        let frame = blank_frame();
        let detections = FaceDetections {
            boxes: vec![Rect::new(40, 40, 80, 80)],
            source: Some(DetectorKind::Front),
        };

        let annotated = render_faces(&frame, &detections).unwrap();

        assert!(pixel_sum(&annotated) > 0.0);
        assert_eq!(pixel_sum(&frame), 0.0);
        assert_eq!(annotated.size().unwrap(), frame.size().unwrap());
    }

    #[test]
    fn test_render_shapes_draws_on_a_copy() {
        let frame = blank_frame();
        let mut contours = Vector::<Vector<Point>>::new();
        contours.push(Vector::from_iter([
            Point::new(50, 50),
            Point::new(150, 50),
            Point::new(150, 150),
            Point::new(50, 150),
        ]));
        let shapes = vec![ClassifiedShape {
            centroid: Point2f::new(100.0, 100.0),
            label: ShapeLabel::Rectangle,
        }];

        let annotated = render_shapes(&frame, &contours, &shapes).unwrap();

        assert!(pixel_sum(&annotated) > 0.0);
        assert_eq!(pixel_sum(&frame), 0.0);
    }

    #[test]
    fn test_render_with_no_results_is_a_plain_copy() {
        let frame = blank_frame();
        let annotated = render_faces(&frame, &FaceDetections::default()).unwrap();
        assert_eq!(pixel_sum(&annotated), 0.0);
        assert_eq!(annotated.size().unwrap(), frame.size().unwrap());
    }
}
