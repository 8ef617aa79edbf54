//! Custom error types for imgnorm.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::image::{ElementType, Shape};

/// Main error type for the imgnorm library.
#[derive(Error, Debug)]
pub enum Error {
    /// The file is missing, unreadable, or not a decodable image.
    #[error("failed to read image from {}", .path.display())]
    ImageRead { path: PathBuf },

    /// The decoded element type is neither `uint8` nor `uint16`.
    #[error("unsupported image dtype {dtype} in {}: expected uint8 or uint16", .path.display())]
    UnsupportedDtype { path: PathBuf, dtype: ElementType },

    /// The decoded layout is not grayscale, BGR or BGRA.
    #[error(
        "unsupported image shape {shape} in {}: expected (H, W), (H, W, 1), (H, W, 3) or (H, W, 4)",
        .path.display()
    )]
    UnsupportedShape { path: PathBuf, shape: Shape },

    /// Failed to save an image file.
    #[error("failed to save image to {}: {source}", .path.display())]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Path of the image the error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::ImageRead { path }
            | Self::UnsupportedDtype { path, .. }
            | Self::UnsupportedShape { path, .. }
            | Self::ImageSave { path, .. } => Some(path),
            Self::Io(_) => None,
        }
    }
}

/// Result type alias for imgnorm operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_path_and_cause() {
        let err = Error::UnsupportedDtype {
            path: PathBuf::from("depth.exr"),
            dtype: ElementType::F32,
        };
        assert_eq!(
            err.to_string(),
            "unsupported image dtype float32 in depth.exr: expected uint8 or uint16"
        );

        let err = Error::UnsupportedShape {
            path: PathBuf::from("weird.tif"),
            shape: Shape::from(&[4, 5, 2][..]),
        };
        assert!(err.to_string().starts_with("unsupported image shape (4, 5, 2) in weird.tif"));

        let err = Error::ImageRead {
            path: PathBuf::from("missing.png"),
        };
        assert_eq!(err.to_string(), "failed to read image from missing.png");
    }

    #[test]
    fn test_path_accessor() {
        let err = Error::ImageRead {
            path: PathBuf::from("a.png"),
        };
        assert_eq!(err.path(), Some(Path::new("a.png")));

        let err = Error::from(std::io::Error::other("boom"));
        assert!(err.path().is_none());
    }
}
