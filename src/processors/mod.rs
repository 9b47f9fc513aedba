//! Image processing steps for the marker-crop transform.
//!
//! The transform is a pipeline of three primitives: HSV thresholding
//! ([`hsv`]), contour-based marker detection ([`marker`]), and the padded
//! bounding-box geometry ([`geometry`]).

pub mod geometry;
pub mod hsv;
pub mod marker;

pub use geometry::{MarkerBox, contour_area};
pub use hsv::{Hsv, HsvRange, threshold_in_range};
pub use marker::detect_marker;
