//! HSV color-space thresholding.
//!
//! Conversions use the OpenCV 8-bit convention so that threshold constants
//! taken from OpenCV-based tooling carry over unchanged: hue is degrees
//! halved (`0..180`), saturation and value span `0..=255`.

use image::{GrayImage, Luma, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

/// A pixel in HSV space, OpenCV 8-bit scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    /// Hue in `0..180` (degrees divided by two).
    pub h: u8,
    /// Saturation in `0..=255`.
    pub s: u8,
    /// Value in `0..=255`.
    pub v: u8,
}

impl Hsv {
    /// Converts an RGB pixel to HSV.
    ///
    /// # Arguments
    ///
    /// * `pixel` - The 8-bit RGB pixel to convert.
    ///
    /// # Returns
    ///
    /// The pixel in HSV space with hue scaled to `0..180`.
    pub fn from_rgb(pixel: &Rgb<u8>) -> Self {
        let r = pixel[0] as f32;
        let g = pixel[1] as f32;
        let b = pixel[2] as f32;

        let v = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = v - min;

        let s = if v == 0.0 {
            0.0
        } else {
            255.0 * delta / v
        };

        let h_deg = if delta == 0.0 {
            0.0
        } else if v == r {
            60.0 * (g - b) / delta
        } else if v == g {
            120.0 + 60.0 * (b - r) / delta
        } else {
            240.0 + 60.0 * (r - g) / delta
        };
        let h_deg = if h_deg < 0.0 { h_deg + 360.0 } else { h_deg };

        Hsv {
            h: (h_deg / 2.0) as u8,
            s: s.round() as u8,
            v: v as u8,
        }
    }
}

/// Inclusive hue/saturation/value bounds used to threshold marker pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    /// Lower `[h, s, v]` bound, inclusive.
    pub lower: [u8; 3],
    /// Upper `[h, s, v]` bound, inclusive.
    pub upper: [u8; 3],
}

impl HsvRange {
    /// Creates a new range from inclusive lower and upper bounds.
    pub fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    /// The pink-marker band used by the dataset photographs.
    pub fn pink_marker() -> Self {
        Self::new([140, 50, 50], [170, 255, 255])
    }

    /// Returns true if every channel of `hsv` lies inside the bounds.
    pub fn contains(&self, hsv: Hsv) -> bool {
        let [h_lo, s_lo, v_lo] = self.lower;
        let [h_hi, s_hi, v_hi] = self.upper;
        (h_lo..=h_hi).contains(&hsv.h)
            && (s_lo..=s_hi).contains(&hsv.s)
            && (v_lo..=v_hi).contains(&hsv.v)
    }

    /// Returns true if any channel has an inverted (lower > upper) bound.
    pub fn is_inverted(&self) -> bool {
        self.lower
            .iter()
            .zip(self.upper.iter())
            .any(|(lo, hi)| lo > hi)
    }
}

impl Default for HsvRange {
    fn default() -> Self {
        Self::pink_marker()
    }
}

/// Builds a binary mask selecting the pixels of `image` inside `range`.
///
/// In-range pixels become 255, everything else 0. The mask is built directly
/// as a `GrayImage` so it can feed contour extraction without intermediate
/// buffers.
pub fn threshold_in_range(image: &RgbImage, range: &HsvRange) -> GrayImage {
    let mut mask = GrayImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        let value = if range.contains(Hsv::from_rgb(pixel)) {
            255
        } else {
            0
        };
        mask.put_pixel(x, y, Luma([value]));
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_primary_colors() {
        // OpenCV reference values: H = degrees / 2.
        assert_eq!(Hsv::from_rgb(&Rgb([255, 0, 0])), Hsv { h: 0, s: 255, v: 255 });
        assert_eq!(Hsv::from_rgb(&Rgb([0, 255, 0])), Hsv { h: 60, s: 255, v: 255 });
        assert_eq!(Hsv::from_rgb(&Rgb([0, 0, 255])), Hsv { h: 120, s: 255, v: 255 });
    }

    #[test]
    fn test_hsv_achromatic() {
        assert_eq!(Hsv::from_rgb(&Rgb([0, 0, 0])), Hsv { h: 0, s: 0, v: 0 });
        assert_eq!(Hsv::from_rgb(&Rgb([128, 128, 128])), Hsv { h: 0, s: 0, v: 128 });
        assert_eq!(Hsv::from_rgb(&Rgb([255, 255, 255])), Hsv { h: 0, s: 0, v: 255 });
    }

    #[test]
    fn test_magenta_falls_in_pink_band() {
        // Magenta sits at 300 degrees, i.e. H = 150, inside [140, 170].
        let hsv = Hsv::from_rgb(&Rgb([255, 0, 255]));
        assert_eq!(hsv.h, 150);
        assert!(HsvRange::pink_marker().contains(hsv));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let range = HsvRange::new([140, 50, 50], [170, 255, 255]);
        assert!(range.contains(Hsv { h: 140, s: 50, v: 50 }));
        assert!(range.contains(Hsv { h: 170, s: 255, v: 255 }));
        assert!(!range.contains(Hsv { h: 139, s: 255, v: 255 }));
        assert!(!range.contains(Hsv { h: 171, s: 255, v: 255 }));
        assert!(!range.contains(Hsv { h: 150, s: 49, v: 255 }));
    }

    #[test]
    fn test_threshold_mask_selects_marker_pixels() {
        let mut img = RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]));
        img.put_pixel(1, 2, Rgb([255, 0, 255]));
        img.put_pixel(2, 2, Rgb([255, 0, 255]));

        let mask = threshold_in_range(&img, &HsvRange::pink_marker());
        assert_eq!(mask.get_pixel(1, 2), &Luma([255]));
        assert_eq!(mask.get_pixel(2, 2), &Luma([255]));
        assert_eq!(mask.get_pixel(0, 0), &Luma([0]));
        assert_eq!(mask.pixels().filter(|p| p[0] == 255).count(), 2);
    }
}
