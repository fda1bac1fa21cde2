//! Color-based segmentation of a frame into size-filtered contours.
//!
//! The pipeline runs a fixed sequence of image operations: HSV conversion,
//! inclusive range thresholding, morphological opening, Gaussian blur, Canny
//! edge detection and contour extraction, followed by an area filter that
//! drops residual noise blobs. Each step writes into a fresh destination mat,
//! so the caller's frame is never modified.

use crate::color_range::ColorRange;
use crate::constants::{
    BLUR_KERNEL_SIZE, BLUR_SIGMA, CANNY_HIGH_THRESHOLD, CANNY_LOW_THRESHOLD, MORPH_KERNEL_SIZE,
};
use crate::error::{Error, Result};
use log::debug;
use opencv::core::{self, Mat, Point, Size, Vector, BORDER_CONSTANT, BORDER_DEFAULT};
use opencv::imgproc;
use opencv::prelude::*;

/// Segment `frame` into the contours of objects whose color lies within
/// `range`, keeping only contours with enclosed area strictly greater than
/// `min_area`.
///
/// Contour order follows extraction order and carries no meaning for callers.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when `range` is not well-formed, or the
/// underlying `OpenCV` error when a primitive fails.
pub fn segment(frame: &Mat, range: &ColorRange, min_area: f64) -> Result<Vector<Vector<Point>>> {
    if !range.is_valid() {
        return Err(Error::InvalidInput(format!(
            "color range lower bound exceeds upper bound: {range:?}"
        )));
    }

    let mut hsv = Mat::default();
    imgproc::cvt_color(frame, &mut hsv, imgproc::COLOR_BGR2HSV, 0)?;

    let mut mask = Mat::default();
    core::in_range(&hsv, &range.lower_bound(), &range.upper_bound(), &mut mask)?;

    // Opening: erode then dilate with the same 3x3 square element.
    let kernel = imgproc::get_structuring_element(
        imgproc::MORPH_RECT,
        Size::new(MORPH_KERNEL_SIZE, MORPH_KERNEL_SIZE),
        Point::new(-1, -1),
    )?;
    let mut eroded = Mat::default();
    imgproc::erode(
        &mask,
        &mut eroded,
        &kernel,
        Point::new(-1, -1),
        1,
        BORDER_CONSTANT,
        imgproc::morphology_default_border_value()?,
    )?;
    let mut opened = Mat::default();
    imgproc::dilate(
        &eroded,
        &mut opened,
        &kernel,
        Point::new(-1, -1),
        1,
        BORDER_CONSTANT,
        imgproc::morphology_default_border_value()?,
    )?;

    let mut blurred = Mat::default();
    imgproc::gaussian_blur(
        &opened,
        &mut blurred,
        Size::new(BLUR_KERNEL_SIZE, BLUR_KERNEL_SIZE),
        BLUR_SIGMA,
        0.0,
        BORDER_DEFAULT,
    )?;

    let mut edges = Mat::default();
    imgproc::canny(&blurred, &mut edges, CANNY_LOW_THRESHOLD, CANNY_HIGH_THRESHOLD, 3, false)?;

    let mut contours = Vector::<Vector<Point>>::new();
    imgproc::find_contours(
        &edges,
        &mut contours,
        imgproc::RETR_TREE,
        imgproc::CHAIN_APPROX_SIMPLE,
        Point::new(0, 0),
    )?;

    let kept = filter_by_area(&contours, min_area)?;
    debug!("segmentation kept {} of {} contours", kept.len(), contours.len());
    Ok(kept)
}

/// Keep only contours whose enclosed area is strictly greater than `min_area`.
pub fn filter_by_area(contours: &Vector<Vector<Point>>, min_area: f64) -> Result<Vector<Vector<Point>>> {
    let mut kept = Vector::<Vector<Point>>::new();
    for contour in contours.iter() {
        if imgproc::contour_area(&contour, false)? > min_area {
            kept.push(contour);
        }
    }
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::CV_8UC3;

    fn rect_contour(width: i32, height: i32) -> Vector<Point> {
        Vector::from_iter([
            Point::new(0, 0),
            Point::new(width, 0),
            Point::new(width, height),
            Point::new(0, height),
        ])
    }

    #[test]
    fn test_area_filter_uses_strict_greater_than() {
        let mut contours = Vector::<Vector<Point>>::new();
        // Polygon area of an axis-aligned rectangle contour is exactly w * h.
        contours.push(rect_contour(25, 20)); // area 500, at the threshold
        contours.push(rect_contour(3, 167)); // area 501, just above

        let kept = filter_by_area(&contours, 500.0).unwrap();
        assert_eq!(kept.len(), 1);
        let area = imgproc::contour_area(&kept.get(0).unwrap(), false).unwrap();
        assert_eq!(area, 501.0);
    }

    #[test]
    fn test_area_filter_drops_everything_below_threshold() {
        let mut contours = Vector::<Vector<Point>>::new();
        contours.push(rect_contour(10, 10));
        contours.push(rect_contour(20, 20));

        let kept = filter_by_area(&contours, 500.0).unwrap();
        assert!(kept.is_empty());
    }

    #[test]
    fn test_segment_rejects_invalid_range() {
        let frame = Mat::zeros(120, 160, CV_8UC3).unwrap().to_mat().unwrap();
        let range = ColorRange::new([90, 0, 0], [60, 255, 255]);
        assert!(matches!(segment(&frame, &range, 500.0), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_segment_on_blank_frame_finds_nothing() {
        let frame = Mat::zeros(240, 320, CV_8UC3).unwrap().to_mat().unwrap();
        let contours = segment(&frame, &ColorRange::green(), 500.0).unwrap();
        assert!(contours.is_empty());
    }
}
