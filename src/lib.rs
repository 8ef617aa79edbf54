//! # imgnorm
//!
//! Load image files as canonical arrays for vision pipelines.
//!
//! Every image comes back in one of two shapes, whatever the file stored:
//! grayscale `(H, W)` or color `(H, W, 3)` in B,G,R order, with `uint8` or
//! `uint16` elements. Alpha is dropped, redundant singleton channel axes are
//! squeezed, and anything else (float or signed depths, two-channel or
//! five-plus-channel layouts, undecodable files) is reported as a distinct
//! [`Error`] variant.
//!
//! ## Example
//!
//! ```no_run
//! use imgnorm::NormalizedImage;
//!
//! # fn main() -> imgnorm::Result<()> {
//! match imgnorm::read("frame.png")? {
//!     NormalizedImage::Gray8(gray) => println!("gray {:?}", gray.dim()),
//!     NormalizedImage::Bgr8(bgr) => println!("bgr {:?}", bgr.dim()),
//!     other => println!("16-bit {}", other.shape()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod image;

pub use error::{Error, Result};
pub use crate::image::{
    read, save_image, ElementType, ImageLoader, NormalizedImage, RawImage, Shape,
};
