//! Geometric primitives for marker detection.
//!
//! Provides the axis-aligned marker box, the padding/clamping policy applied
//! before cropping, and the shoelace contour area used to rank candidate
//! regions.

use imageproc::point::Point;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in pixel coordinates.
///
/// Invariant maintained by all constructors: the box lies fully inside the
/// image it was derived from (`x + width <= image width`, likewise for y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerBox {
    /// X-coordinate of the top-left corner.
    pub x: u32,
    /// Y-coordinate of the top-left corner.
    pub y: u32,
    /// Width of the box in pixels.
    pub width: u32,
    /// Height of the box in pixels.
    pub height: u32,
}

impl MarkerBox {
    /// Creates a box from its top-left corner and size.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Computes the minimal upright rectangle enclosing a set of contour
    /// points.
    ///
    /// Bounds are inclusive, so a contour spanning columns `3..=7` yields a
    /// width of 5. Returns `None` for an empty point set or if any point has
    /// a negative coordinate.
    pub fn from_points(points: &[Point<i32>]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut max_x) = (first.x, first.x);
        let (mut min_y, mut max_y) = (first.y, first.y);

        for p in &points[1..] {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }

        if min_x < 0 || min_y < 0 {
            return None;
        }

        Some(Self::new(
            min_x as u32,
            min_y as u32,
            (max_x - min_x + 1) as u32,
            (max_y - min_y + 1) as u32,
        ))
    }

    /// Grows the box by `pad` pixels on every side, clamped to the image
    /// bounds.
    ///
    /// The origin saturates at zero and the size clamps to the remaining
    /// extent of the image, so the padded box never has a negative origin and
    /// never reaches past `(img_width, img_height)`.
    pub fn padded(&self, pad: u32, img_width: u32, img_height: u32) -> Self {
        let x = self.x.saturating_sub(pad);
        let y = self.y.saturating_sub(pad);
        let width = (self.width + 2 * pad).min(img_width - x);
        let height = (self.height + 2 * pad).min(img_height - y);
        Self::new(x, y, width, height)
    }

    /// Area of the box in pixels.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Calculates the enclosed area of a contour using the shoelace formula.
///
/// Returns 0.0 for contours with fewer than 3 points.
pub fn contour_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        area += points[i].x as f64 * points[j].y as f64;
        area -= points[j].x as f64 * points[i].y as f64;
    }
    area.abs() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_inclusive_bounds() {
        let points = vec![Point::new(3, 2), Point::new(7, 2), Point::new(5, 6)];
        let bbox = MarkerBox::from_points(&points).unwrap();
        assert_eq!(bbox, MarkerBox::new(3, 2, 5, 5));
    }

    #[test]
    fn test_from_points_empty() {
        assert!(MarkerBox::from_points(&[]).is_none());
    }

    #[test]
    fn test_padded_interior_box() {
        let bbox = MarkerBox::new(50, 50, 20, 20);
        let padded = bbox.padded(10, 200, 200);
        assert_eq!(padded, MarkerBox::new(40, 40, 40, 40));
    }

    #[test]
    fn test_padded_clamps_at_origin() {
        let bbox = MarkerBox::new(3, 5, 20, 20);
        let padded = bbox.padded(10, 200, 200);
        // Origin saturates at zero; the far edge still gains the full pad.
        assert_eq!(padded.x, 0);
        assert_eq!(padded.y, 0);
        assert_eq!(padded.width, 40);
        assert_eq!(padded.height, 40);
    }

    #[test]
    fn test_padded_clamps_at_far_edge() {
        let bbox = MarkerBox::new(180, 185, 15, 10);
        let padded = bbox.padded(10, 200, 200);
        assert_eq!(padded.x, 170);
        assert_eq!(padded.y, 175);
        assert_eq!(padded.x + padded.width, 200);
        assert_eq!(padded.y + padded.height, 200);
    }

    #[test]
    fn test_padded_never_exceeds_bounds() {
        for (x, y, w, h) in [(0, 0, 5, 5), (95, 95, 5, 5), (10, 90, 80, 10)] {
            let padded = MarkerBox::new(x, y, w, h).padded(10, 100, 100);
            assert!(padded.x + padded.width <= 100);
            assert!(padded.y + padded.height <= 100);
        }
    }

    #[test]
    fn test_contour_area_square() {
        let square = vec![
            Point::new(0, 0),
            Point::new(4, 0),
            Point::new(4, 4),
            Point::new(0, 4),
        ];
        assert_eq!(contour_area(&square), 16.0);
    }

    #[test]
    fn test_contour_area_degenerate() {
        assert_eq!(contour_area(&[Point::new(1, 1)]), 0.0);
        assert_eq!(contour_area(&[Point::new(1, 1), Point::new(2, 2)]), 0.0);
    }
}
