//! Decoding image files without depth or channel conversion.

use std::path::Path;

use image::{DynamicImage, ImageReader, ImageResult, Limits};
use ndarray::{ArrayD, IxDyn};

use super::{RawImage, BGRA_CHANNELS, BGR_CHANNELS};

/// Largest pixel count a file may decode to.
const MAX_IMAGE_PIXELS: u64 = 1 << 30;

/// Largest width or height a file may declare.
const MAX_IMAGE_SIDE: u32 = 1 << 20;

/// Bytes per pixel of the widest decoded layout (four `f32` samples).
const MAX_BYTES_PER_PIXEL: u64 = 16;

/// Turns an image file into raw pixels.
pub trait Decoder {
    /// Decode `path` keeping its original bit depth and channel count.
    ///
    /// Returns `None` when the file is missing, unreadable, or not an image
    /// this decoder understands.
    fn decode_unchanged(&self, path: &Path) -> Option<RawImage>;
}

/// Decoder backed by the `image` crate.
///
/// Color channels are reported in B,G,R(,A) order. Gray+alpha files expand to
/// four channels with the gray value replicated into B, G and R.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateDecoder;

impl Decoder for ImageCrateDecoder {
    fn decode_unchanged(&self, path: &Path) -> Option<RawImage> {
        let image = match open_unchanged(path) {
            Ok(image) => image,
            Err(err) => {
                tracing::debug!("failed to decode {}: {err}", path.display());
                return None;
            }
        };

        tracing::debug!("decoded {} as {:?}", path.display(), image.color());
        raw_from_dynamic(image)
    }
}

fn open_unchanged(path: &Path) -> ImageResult<DynamicImage> {
    let mut reader = ImageReader::open(path)?.with_guessed_format()?;
    reader.limits(decode_limits());
    reader.decode()
}

/// Caps decoding by pixel count rather than the `image` crate's 512 MiB default.
fn decode_limits() -> Limits {
    let mut limits = Limits::no_limits();
    limits.max_image_width = Some(MAX_IMAGE_SIDE);
    limits.max_image_height = Some(MAX_IMAGE_SIDE);
    limits.max_alloc = Some(MAX_IMAGE_PIXELS * MAX_BYTES_PER_PIXEL);
    limits
}

/// Map a decoded image onto a raw array without touching sample values.
fn raw_from_dynamic(image: DynamicImage) -> Option<RawImage> {
    let (width, height) = (image.width() as usize, image.height() as usize);

    match image {
        DynamicImage::ImageLuma8(buf) => {
            to_array(height, width, 1, buf.into_raw()).map(RawImage::U8)
        }
        DynamicImage::ImageLuma16(buf) => {
            to_array(height, width, 1, buf.into_raw()).map(RawImage::U16)
        }
        DynamicImage::ImageLumaA8(buf) => {
            to_array(height, width, BGRA_CHANNELS, gray_alpha_to_bgra(&buf.into_raw()))
                .map(RawImage::U8)
        }
        DynamicImage::ImageLumaA16(buf) => {
            to_array(height, width, BGRA_CHANNELS, gray_alpha_to_bgra(&buf.into_raw()))
                .map(RawImage::U16)
        }
        DynamicImage::ImageRgb8(buf) => {
            to_array(height, width, BGR_CHANNELS, swap_red_blue(buf.into_raw(), BGR_CHANNELS))
                .map(RawImage::U8)
        }
        DynamicImage::ImageRgb16(buf) => {
            to_array(height, width, BGR_CHANNELS, swap_red_blue(buf.into_raw(), BGR_CHANNELS))
                .map(RawImage::U16)
        }
        DynamicImage::ImageRgb32F(buf) => {
            to_array(height, width, BGR_CHANNELS, swap_red_blue(buf.into_raw(), BGR_CHANNELS))
                .map(RawImage::F32)
        }
        DynamicImage::ImageRgba8(buf) => {
            to_array(height, width, BGRA_CHANNELS, swap_red_blue(buf.into_raw(), BGRA_CHANNELS))
                .map(RawImage::U8)
        }
        DynamicImage::ImageRgba16(buf) => {
            to_array(height, width, BGRA_CHANNELS, swap_red_blue(buf.into_raw(), BGRA_CHANNELS))
                .map(RawImage::U16)
        }
        DynamicImage::ImageRgba32F(buf) => {
            to_array(height, width, BGRA_CHANNELS, swap_red_blue(buf.into_raw(), BGRA_CHANNELS))
                .map(RawImage::F32)
        }
        other => {
            tracing::debug!("no raw layout for color type {:?}", other.color());
            None
        }
    }
}

/// Wrap interleaved samples as `(H, W)` for one channel, `(H, W, C)` otherwise.
fn to_array<T>(height: usize, width: usize, channels: usize, samples: Vec<T>) -> Option<ArrayD<T>> {
    let dims = if channels == 1 {
        vec![height, width]
    } else {
        vec![height, width, channels]
    };
    ArrayD::from_shape_vec(IxDyn(&dims), samples).ok()
}

/// RGB(A) -> BGR(A), in place.
fn swap_red_blue<T>(mut samples: Vec<T>, channels: usize) -> Vec<T> {
    for pixel in samples.chunks_exact_mut(channels) {
        pixel.swap(0, 2);
    }
    samples
}

fn gray_alpha_to_bgra<T: Copy>(samples: &[T]) -> Vec<T> {
    samples
        .chunks_exact(2)
        .flat_map(|pixel| [pixel[0], pixel[0], pixel[0], pixel[1]])
        .collect()
}
