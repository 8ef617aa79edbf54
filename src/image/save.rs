//! Image saving utilities.

use std::fs;
use std::path::Path;

use image::error::{
    ImageFormatHint, ParameterError, ParameterErrorKind, UnsupportedError, UnsupportedErrorKind,
};
use image::{
    DynamicImage, ExtendedColorType, ImageBuffer, ImageError, ImageFormat, Luma, Pixel, Rgb,
};
use ndarray::{Array2, Array3};

use crate::error::{Error, Result};

use super::NormalizedImage;

/// Save a normalized image to disk.
///
/// The image is written at its own depth: `uint16` images stay 16-bit and are
/// refused by formats that would narrow them (only PNG, TIFF and PNM keep 16
/// bits). B,G,R channels are reordered to the encoder's R,G,B. The format is
/// inferred from the extension; paths without one are written as PNG.
///
/// # Errors
///
/// Returns an error if the format is unknown or cannot hold the image's
/// depth, the parent directory cannot be created, or encoding fails.
pub fn save_image<P: AsRef<Path>>(image: &NormalizedImage, path: P) -> Result<()> {
    let path = path.as_ref();
    let save_error = |source: ImageError| Error::ImageSave {
        path: path.to_path_buf(),
        source,
    };

    let format = if path.extension().is_some() {
        ImageFormat::from_path(path).map_err(save_error)?
    } else {
        ImageFormat::Png
    };

    let dynamic = to_dynamic(image).ok_or_else(|| save_error(dimension_mismatch()))?;
    if is_sixteen_bit(image) && !keeps_sixteen_bit(format) {
        return Err(save_error(unsupported_depth(format, &dynamic)));
    }

    ensure_parent_dir(path)?;
    dynamic.save_with_format(path, format).map_err(save_error)
}

const fn is_sixteen_bit(image: &NormalizedImage) -> bool {
    matches!(
        image,
        NormalizedImage::Gray16(_) | NormalizedImage::Bgr16(_)
    )
}

/// Formats whose encoders write 16-bit gray and RGB without narrowing.
const fn keeps_sixteen_bit(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Png | ImageFormat::Tiff | ImageFormat::Pnm
    )
}

fn unsupported_depth(format: ImageFormat, image: &DynamicImage) -> ImageError {
    ImageError::Unsupported(UnsupportedError::from_format_and_kind(
        ImageFormatHint::Exact(format),
        UnsupportedErrorKind::Color(ExtendedColorType::from(image.color())),
    ))
}

fn to_dynamic(image: &NormalizedImage) -> Option<DynamicImage> {
    let dynamic = match image {
        NormalizedImage::Gray8(gray) => DynamicImage::ImageLuma8(gray_buffer(gray)?),
        NormalizedImage::Gray16(gray) => DynamicImage::ImageLuma16(gray_buffer(gray)?),
        NormalizedImage::Bgr8(bgr) => DynamicImage::ImageRgb8(rgb_buffer(bgr)?),
        NormalizedImage::Bgr16(bgr) => DynamicImage::ImageRgb16(rgb_buffer(bgr)?),
    };
    Some(dynamic)
}

fn gray_buffer<T>(gray: &Array2<T>) -> Option<ImageBuffer<Luma<T>, Vec<T>>>
where
    Luma<T>: Pixel<Subpixel = T>,
    T: Copy,
{
    let (height, width) = gray.dim();
    let samples = gray.iter().copied().collect();
    ImageBuffer::from_raw(u32::try_from(width).ok()?, u32::try_from(height).ok()?, samples)
}

fn rgb_buffer<T>(bgr: &Array3<T>) -> Option<ImageBuffer<Rgb<T>, Vec<T>>>
where
    Rgb<T>: Pixel<Subpixel = T>,
    T: Copy,
{
    let (height, width, _) = bgr.dim();
    // Iterating a reversed channel axis yields R,G,B per pixel.
    let mut rgb = bgr.view();
    rgb.invert_axis(ndarray::Axis(2));
    let samples = rgb.iter().copied().collect();
    ImageBuffer::from_raw(u32::try_from(width).ok()?, u32::try_from(height).ok()?, samples)
}

fn dimension_mismatch() -> ImageError {
    ImageError::Parameter(ParameterError::from_kind(
        ParameterErrorKind::DimensionMismatch,
    ))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bgr_is_written_as_rgb() {
        let mut bgr = Array3::<u8>::zeros((1, 2, 3));
        bgr[[0, 1, 0]] = 10; // B
        bgr[[0, 1, 1]] = 20; // G
        bgr[[0, 1, 2]] = 30; // R

        let buf = rgb_buffer(&bgr).unwrap();
        assert_eq!(buf.dimensions(), (2, 1));
        assert_eq!(buf.get_pixel(1, 0).0, [30, 20, 10]);
    }

    #[test]
    fn test_gray16_keeps_depth() {
        let gray = Array2::from_shape_fn((3, 2), |(y, x)| (y * 1000 + x) as u16);
        let DynamicImage::ImageLuma16(buf) = to_dynamic(&NormalizedImage::Gray16(gray)).unwrap()
        else {
            panic!("expected 16-bit luma");
        };

        assert_eq!(buf.dimensions(), (2, 3));
        assert_eq!(buf.get_pixel(1, 2).0, [2001]);
    }

    #[test]
    fn test_sixteen_bit_formats() {
        assert!(keeps_sixteen_bit(ImageFormat::Png));
        assert!(keeps_sixteen_bit(ImageFormat::Tiff));
        assert!(!keeps_sixteen_bit(ImageFormat::Jpeg));
        assert!(!keeps_sixteen_bit(ImageFormat::Bmp));
        assert!(!keeps_sixteen_bit(ImageFormat::Gif));
    }

    #[test]
    fn test_sixteen_bit_bmp_is_refused_before_writing() {
        let dir = std::env::temp_dir().join("imgnorm-save-bmp-test");
        let path = dir.join("deep.bmp");
        let image = NormalizedImage::Bgr16(Array3::zeros((2, 2, 3)));

        let err = save_image(&image, &path).unwrap_err();
        assert!(matches!(
            err,
            Error::ImageSave {
                source: ImageError::Unsupported(_),
                ..
            }
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_unknown_extension_is_a_save_error() {
        let image = NormalizedImage::Gray8(Array2::zeros((1, 1)));
        let err = save_image(&image, std::env::temp_dir().join("imgnorm.notaformat")).unwrap_err();
        assert!(matches!(err, Error::ImageSave { .. }));
    }

    #[test]
    fn test_rgb_buffer_handles_non_standard_layout() {
        let bgr = Array3::from_shape_fn((2, 2, 3), |(y, x, c)| (y * 100 + x * 10 + c) as u8);
        let transposed = bgr.clone().permuted_axes([1, 0, 2]);

        let buf = rgb_buffer(&transposed).unwrap();
        // Pixel (x=1, y=0) of the transposed array is pixel (x=0, y=1) of `bgr`.
        assert_eq!(buf.get_pixel(1, 0).0, [102, 101, 100]);
    }
}
