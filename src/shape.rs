//! Geometric classification of contours into shape labels.

use crate::constants::{CIRCLE_VERTEX_FLOOR, POLY_EPSILON_FACTOR};
use crate::error::Result;
use log::debug;
use opencv::core::{Point, Point2f, Vector};
use opencv::imgproc;
use std::fmt;

/// Shape label inferred from a contour's approximated vertex count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeLabel {
    Triangle,
    Rectangle,
    Circle,
    Unknown,
}

impl ShapeLabel {
    /// Map a vertex count to a shape label.
    ///
    /// 3 vertices are a triangle, 4 a rectangle, 8 or more a circle;
    /// everything else is unknown.
    pub fn from_vertex_count(vertices: usize) -> Self {
        match vertices {
            3 => Self::Triangle,
            4 => Self::Rectangle,
            n if n >= CIRCLE_VERTEX_FLOOR => Self::Circle,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ShapeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Triangle => "Triangle",
            Self::Rectangle => "Rectangle",
            Self::Circle => "Circle",
            Self::Unknown => "Unknown",
        };
        write!(f, "{name}")
    }
}

/// A classified contour: its area-weighted centroid and shape label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedShape {
    pub centroid: Point2f,
    pub label: ShapeLabel,
}

/// Classify one contour, returning `None` for degenerate contours.
///
/// The centroid is derived from the contour's spatial moments as
/// (m10/m00, m01/m00). A zero m00 (degenerate or self-intersecting contour)
/// would divide by zero, so such contours are skipped.
pub fn classify(contour: &Vector<Point>) -> Result<Option<ClassifiedShape>> {
    let moments = imgproc::moments(contour, false)?;
    if moments.m00 == 0.0 {
        return Ok(None);
    }

    #[allow(clippy::cast_possible_truncation)]
    let centroid = Point2f::new(
        (moments.m10 / moments.m00) as f32,
        (moments.m01 / moments.m00) as f32,
    );
    let label = ShapeLabel::from_vertex_count(vertex_count(contour)?);
    Ok(Some(ClassifiedShape { centroid, label }))
}

/// Count the vertices of the contour's polygon approximation.
///
/// The approximation tolerance is a fixed fraction of the closed-contour
/// arc length, so the count is scale invariant.
pub fn vertex_count(contour: &Vector<Point>) -> Result<usize> {
    let epsilon = POLY_EPSILON_FACTOR * imgproc::arc_length(contour, true)?;
    let mut approx = Vector::<Point>::new();
    imgproc::approx_poly_dp(contour, &mut approx, epsilon, true)?;
    Ok(approx.len())
}

/// Classify every contour in a list, dropping degenerate ones.
pub fn classify_all(contours: &Vector<Vector<Point>>) -> Result<Vec<ClassifiedShape>> {
    let mut shapes = Vec::with_capacity(contours.len());
    for contour in contours.iter() {
        match classify(&contour)? {
            Some(shape) => shapes.push(shape),
            None => debug!("skipping degenerate contour"),
        }
    }
    Ok(shapes)
}
