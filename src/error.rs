//! Error types for the conversion pipeline.
//!
//! Every failure is fatal for the run: this is a one-shot batch
//! conversion with no retries.

use std::io;
use thiserror::Error;

/// Errors that can occur during a conversion run.
#[derive(Error, Debug)]
pub enum Error {
    /// The input image is missing, unreadable, or not a decodable raster
    /// format. Raised before any output file is touched.
    #[error("failed to load image '{path}': {source}")]
    ImageLoad {
        path: String,
        #[source]
        source: image::ImageError,
    },

    /// The destination path could not be written.
    #[error("failed to write output '{path}': {source}")]
    OutputWrite {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::OutputWrite {
            path: "out/engraving.nc".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        };
        assert_eq!(
            err.to_string(),
            "failed to write output 'out/engraving.nc': access denied"
        );
    }
}
