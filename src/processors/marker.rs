//! Marker region detection.
//!
//! Finds the pink marker in a photograph by thresholding in HSV space,
//! tracing the external contours of the resulting binary mask, and taking
//! the upright bounding rectangle of the largest contour.

use image::RgbImage;
use imageproc::contours::{BorderType, Contour, find_contours};
use tracing::trace;

use crate::processors::geometry::{MarkerBox, contour_area};
use crate::processors::hsv::{HsvRange, threshold_in_range};

/// Detects the marker region in `image`.
///
/// Returns the minimal upright bounding rectangle of the largest external
/// contour of the in-range mask, or `None` when no pixel falls inside
/// `range` (the "no marker found" signal). Detection is deterministic for
/// identical input.
pub fn detect_marker(image: &RgbImage, range: &HsvRange) -> Option<MarkerBox> {
    let mask = threshold_in_range(image, range);
    let contours: Vec<Contour<i32>> = find_contours(&mask);

    let outer = contours
        .iter()
        .filter(|c| c.border_type == BorderType::Outer);

    // Largest enclosed area wins; ties keep the first contour traced.
    let mut best: Option<(&Contour<i32>, f64)> = None;
    for contour in outer {
        let area = contour_area(&contour.points);
        match best {
            Some((_, best_area)) if area <= best_area => {}
            _ => best = Some((contour, area)),
        }
    }

    let (contour, area) = best?;
    trace!(
        "marker contour: {} points, area {:.1}",
        contour.points.len(),
        area
    );
    MarkerBox::from_points(&contour.points)
}
