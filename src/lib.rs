//! # pyro-tools
//!
//! A Rust library for converting raster images into pyrography/laser
//! engraving toolpaths.
//!
//! Each pixel's greyscale intensity is mapped to a feed rate and the
//! image is traversed row by row, emitting G-code moves so that darker
//! pixels are burned slower (more energy) and lighter pixels faster.
//! Runs of identical feed rates along a row coalesce into a single
//! move, keeping the instruction count proportional to the number of
//! feed-rate transitions rather than the pixel count.
//!
//! ## Example
//!
//! ```rust,ignore
//! use pyro_tools::{EngraveOptions, RasterEngraver, write_gcode};
//!
//! let engraver = RasterEngraver::from_file("input.bmp", EngraveOptions::default()).unwrap();
//! let instructions = engraver.generate();
//! write_gcode("output.nc", &instructions).unwrap();
//! ```

pub mod engrave;
pub mod error;
pub mod gcode;
pub mod geometry;
pub mod output;

// Re-export commonly used items
pub use engrave::{EngraveOptions, FeedRates, RasterEngraver};
pub use error::{Error, Result};
pub use gcode::{Axis, Instruction};
pub use geometry::{Geometry, STEP_MM, truncate2};
pub use output::write_gcode;
