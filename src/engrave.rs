//! Raster engraving toolpath generation.
//!
//! The conversion process:
//! 1. Load image and derive physical geometry
//! 2. Scan rows top to bottom, columns left to right
//! 3. Map each pixel's greyscale intensity to a feed rate
//! 4. Coalesce runs of identical feed rates into single moves
//! 5. Close each row with an edge move and a fast return stroke
//!
//! Darker pixels map to slower feeds (more energy into the material),
//! lighter pixels to faster feeds. Only pure white gets the distinct
//! travel rate.

use image::{Rgb, RgbImage};
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};
use crate::gcode::{Axis, Instruction};
use crate::geometry::{Geometry, truncate2};

/// Feed rates in mm/min anchoring the greyscale mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedRates {
    /// Slowest rate, applied to pure black (maximum burn).
    pub black: u32,
    /// Fastest engraving rate, approached by near-white pixels.
    pub white: u32,
    /// Travel rate for pure white pixels and return strokes (no burn).
    pub white_plus: u32,
}

impl Default for FeedRates {
    fn default() -> Self {
        Self {
            black: 400,
            white: 4000,
            white_plus: 6000,
        }
    }
}

impl FeedRates {
    /// Map a greyscale intensity (0 = black, 255 = white) to a feed rate.
    ///
    /// Pure white gets the travel rate; everything else interpolates
    /// linearly between `black` and `white`, truncated to a whole
    /// number of mm/min.
    pub fn for_intensity(&self, gs: u8) -> u32 {
        if gs == 255 {
            self.white_plus
        } else {
            map_val(gs as f64, 0.0, 255.0, self.black as f64, self.white as f64).trunc() as u32
        }
    }
}

/// Linearly map `x` from `[in_min, in_max]` onto `[out_min, out_max]`.
fn map_val(x: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Options for toolpath generation.
#[derive(Debug, Clone)]
pub struct EngraveOptions {
    /// Feed rate table used for the greyscale mapping.
    pub feed_rates: FeedRates,
    /// Emit a comment block describing the run at the top of the output.
    pub emit_header: bool,
}

impl Default for EngraveOptions {
    fn default() -> Self {
        Self {
            feed_rates: FeedRates::default(),
            emit_header: true,
        }
    }
}

/// Toolpath generator for a loaded raster image.
#[derive(Debug)]
pub struct RasterEngraver {
    image: RgbImage,
    geometry: Geometry,
    options: EngraveOptions,
    source_name: String,
}

impl RasterEngraver {
    /// Create an engraver from an image file.
    ///
    /// Fails with [`Error::ImageLoad`] when the file is missing,
    /// unreadable, or not a decodable raster format.
    pub fn from_file<P: AsRef<Path>>(path: P, options: EngraveOptions) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| Error::ImageLoad {
            path: path.display().to_string(),
            source: e,
        })?;
        let source_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::from_image(img.to_rgb8(), options, source_name))
    }

    /// Create an engraver from an already-decoded RGB image.
    pub fn from_image(image: RgbImage, options: EngraveOptions, source_name: String) -> Self {
        let geometry = Geometry::from_pixel_size(image.width(), image.height());
        Self {
            image,
            geometry,
            options,
            source_name,
        }
    }

    /// The physical geometry derived from the image dimensions.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Generate the full toolpath.
    pub fn generate(&self) -> Vec<Instruction> {
        self.generate_with_progress(|_| {})
    }

    /// Generate the full toolpath, reporting per-row progress in `0.0..=1.0`.
    pub fn generate_with_progress<F>(&self, mut progress: F) -> Vec<Instruction>
    where
        F: FnMut(f32),
    {
        let width = self.image.width();
        let height = self.image.height();
        let rates = &self.options.feed_rates;
        let mut out = Vec::new();

        if self.options.emit_header {
            self.push_header(&mut out);
        }

        for y in 0..height {
            let y_pos = truncate2(y as f64 * self.geometry.scale_y);
            push(&mut out, Instruction::position(Axis::Y, y_pos));

            // No feed is active at the start of a row, so the first
            // pixel always emits a move.
            let mut active_feed = None;
            let mut row_end = None;

            for x in 0..width {
                let x_pos = truncate2(x as f64 * self.geometry.scale_x);
                let feed = rates.for_intensity(self.intensity(x, y));
                if active_feed != Some(feed) {
                    active_feed = Some(feed);
                    push(&mut out, Instruction::feed_move(Axis::X, x_pos, feed));
                }
                row_end = Some((x_pos, feed));
            }

            // Land on the right edge even when the final run was
            // coalesced away, then return fast for the next row.
            if let Some((x_pos, feed)) = row_end {
                push(&mut out, Instruction::feed_move(Axis::X, x_pos, feed));
            }
            push(&mut out, Instruction::feed_move(Axis::X, 0.0, rates.white_plus));

            // height <= 1 would divide by zero; a single row is 100%
            // complete as soon as it is emitted.
            if height > 1 {
                progress(y as f32 / (height - 1) as f32);
            } else {
                progress(1.0);
            }
        }

        out
    }

    /// Greyscale intensity of a pixel: integer-truncated RGB average.
    fn intensity(&self, x: u32, y: u32) -> u8 {
        let Rgb([r, g, b]) = *self.image.get_pixel(x, y);
        ((r as u16 + g as u16 + b as u16) / 3) as u8
    }

    fn push_header(&self, out: &mut Vec<Instruction>) {
        let g = &self.geometry;
        let rates = &self.options.feed_rates;
        let lines = [
            format!("Source: {}", self.source_name),
            format!(
                "Generated: {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
            ),
            format!(
                "Feed rates: black F{} white F{} travel F{}",
                rates.black, rates.white, rates.white_plus
            ),
            format!("Raster step: {:.2}mm x {:.2}mm", g.step_x, g.step_y),
            format!("Physical size: {:.2}mm x {:.2}mm", g.width_mm, g.height_mm),
        ];
        for line in lines {
            push(out, Instruction::Comment(line));
        }
    }
}

fn push(out: &mut Vec<Instruction>, instruction: Instruction) {
    debug!("{}", instruction);
    out.push(instruction);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_rate_boundaries() {
        let rates = FeedRates::default();
        assert_eq!(rates.for_intensity(0), 400);
        assert_eq!(rates.for_intensity(255), 6000);
        assert_eq!(rates.for_intensity(128), 2207);
    }

    #[test]
    fn test_feed_rate_interpolation_truncates() {
        let rates = FeedRates::default();
        // 254 maps to 3985.88..., truncated to a whole feed, well below
        // the travel rate reserved for pure white.
        assert_eq!(rates.for_intensity(254), 3985);
        assert_eq!(rates.for_intensity(1), 414);
    }

    #[test]
    fn test_feed_rate_custom_table() {
        let rates = FeedRates {
            black: 100,
            white: 200,
            white_plus: 300,
        };
        assert_eq!(rates.for_intensity(0), 100);
        assert_eq!(rates.for_intensity(255), 300);
    }

    #[test]
    fn test_intensity_is_truncated_average() {
        let mut img = RgbImage::new(1, 1);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        let engraver = RasterEngraver::from_image(img, EngraveOptions::default(), String::new());
        assert_eq!(engraver.intensity(0, 0), 85);
    }
}
