//! Image decoding, normalization, and saving utilities.

mod convert;
mod decode;
mod load;
mod normalized;
mod raw;
mod save;

pub use convert::{ChannelConverter, SliceConverter};
pub use decode::{Decoder, ImageCrateDecoder};
pub use load::{read, ImageLoader};
pub use normalized::NormalizedImage;
pub use raw::{ElementType, RawImage, Shape};
pub use save::save_image;

/// Number of channels in canonical color images (B, G, R).
pub const BGR_CHANNELS: usize = 3;

/// Number of channels in color images carrying alpha (B, G, R, A).
pub const BGRA_CHANNELS: usize = 4;
