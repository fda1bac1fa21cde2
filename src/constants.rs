//! Constants used throughout the application

/// Interval between scheduler ticks in milliseconds (about 30 fps)
pub const TICK_INTERVAL_MS: u64 = 33;

/// Contours with enclosed area at or below this value are discarded
pub const MIN_CONTOUR_AREA: f64 = 500.0;

/// Side length of the square structuring element for morphological opening
pub const MORPH_KERNEL_SIZE: i32 = 3;

/// Side length of the Gaussian blur kernel applied to the binary mask
pub const BLUR_KERNEL_SIZE: i32 = 3;

/// Standard deviation of the Gaussian blur
pub const BLUR_SIGMA: f64 = 1.5;

/// Lower hysteresis threshold for Canny edge detection
pub const CANNY_LOW_THRESHOLD: f64 = 100.0;

/// Upper hysteresis threshold for Canny edge detection
pub const CANNY_HIGH_THRESHOLD: f64 = 200.0;

/// Polygon approximation tolerance as a fraction of the contour arc length
pub const POLY_EPSILON_FACTOR: f64 = 0.02;

/// Minimum vertex count at which a polygon is labeled a circle
pub const CIRCLE_VERTEX_FLOOR: usize = 8;

/// Scale factor passed to every cascade detector
pub const CASCADE_SCALE_FACTOR: f64 = 1.2;

/// Minimum neighbor count passed to every cascade detector
pub const CASCADE_MIN_NEIGHBORS: i32 = 2;

/// Minimum detectable feature size as a fraction of frame height
pub const MIN_FEATURE_FRACTION: f32 = 0.2;

/// Radius of the marker circle drawn at each shape centroid
pub const CENTROID_MARKER_RADIUS: i32 = 10;

/// Font scale for shape label text
pub const LABEL_FONT_SCALE: f64 = 0.75;

/// Line thickness for contour outlines
pub const CONTOUR_THICKNESS: i32 = 5;

/// Line thickness for detection box rectangles
pub const DETECTION_BOX_THICKNESS: i32 = 3;

/// Capacity of the scheduler-to-display frame channel
pub const FRAME_QUEUE_DEPTH: usize = 2;
