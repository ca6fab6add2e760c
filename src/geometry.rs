//! Physical geometry derived from image pixel dimensions.
//!
//! The engraver advances a fixed raster step per pixel. Physical height
//! follows from the image aspect ratio so the engraving is never
//! stretched. All derived values are truncated (not rounded) to two
//! decimal places so repeated runs produce byte-identical output.

/// Fixed raster step in millimeters per pixel, both axes.
pub const STEP_MM: f64 = 0.1;

/// Truncate a value toward zero at two decimal places.
///
/// A computed `0.1266` becomes `0.12`, never `0.13`. This is a
/// deliberate quantization contract, not a rounding mode.
pub fn truncate2(v: f64) -> f64 {
    (v * 100.0).trunc() / 100.0
}

/// Physical scaling, computed once at load time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Raster step along X in mm per pixel.
    pub step_x: f64,
    /// Raster step along Y in mm per pixel.
    pub step_y: f64,
    /// Physical width of the engraving in mm.
    pub width_mm: f64,
    /// Physical height in mm, derived from the aspect ratio.
    pub height_mm: f64,
    /// mm advanced per pixel column, truncated to 2 decimals.
    pub scale_x: f64,
    /// mm advanced per pixel row, truncated to 2 decimals.
    pub scale_y: f64,
}

impl Geometry {
    /// Derive the geometry for a `width` x `height` pixel image.
    ///
    /// Zero-size images get an all-zero geometry; generation over them
    /// emits a degenerate (possibly empty) instruction sequence.
    pub fn from_pixel_size(width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self {
                step_x: STEP_MM,
                step_y: STEP_MM,
                width_mm: 0.0,
                height_mm: 0.0,
                scale_x: 0.0,
                scale_y: 0.0,
            };
        }

        let width_mm = width as f64 * STEP_MM;
        let aspect_ratio = width as f64 / height as f64;
        let height_mm = truncate2(width_mm / aspect_ratio);
        let scale_x = truncate2(width_mm / width as f64);
        let scale_y = truncate2(height_mm / height as f64);

        Self {
            step_x: STEP_MM,
            step_y: STEP_MM,
            width_mm,
            height_mm,
            scale_x,
            scale_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate2_truncates_not_rounds() {
        assert_eq!(truncate2(0.1266), 0.12);
        assert_eq!(truncate2(0.999), 0.99);
        assert_eq!(truncate2(2207.0588235294117), 2207.05);
        assert_eq!(truncate2(1.9), 1.9);
        assert_eq!(truncate2(0.0), 0.0);
    }

    #[test]
    fn test_geometry_37x19() {
        let g = Geometry::from_pixel_size(37, 19);
        assert_eq!(g.width_mm, 3.7);
        assert_eq!(g.height_mm, 1.9);
        assert_eq!(g.scale_x, 0.1);
        assert_eq!(g.scale_y, 0.1);
    }

    #[test]
    fn test_geometry_preserves_aspect_ratio() {
        let g = Geometry::from_pixel_size(200, 100);
        assert_eq!(g.width_mm, 20.0);
        assert_eq!(g.height_mm, 10.0);
        assert_eq!(g.scale_x, 0.1);
        assert_eq!(g.scale_y, 0.1);
    }

    #[test]
    fn test_geometry_zero_size() {
        let g = Geometry::from_pixel_size(0, 19);
        assert_eq!(g.width_mm, 0.0);
        assert_eq!(g.scale_x, 0.0);
        assert_eq!(g.scale_y, 0.0);

        let g = Geometry::from_pixel_size(37, 0);
        assert_eq!(g.height_mm, 0.0);
        assert_eq!(g.scale_y, 0.0);
    }
}
