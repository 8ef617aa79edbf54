//! Image loading into canonical grayscale or BGR form.

use std::path::Path;

use ndarray::{Array2, Array3, ArrayD, Axis, Ix2, Ix3};

use crate::error::{Error, Result};

use super::{
    ChannelConverter, Decoder, ImageCrateDecoder, NormalizedImage, RawImage, Shape, SliceConverter,
    BGRA_CHANNELS, BGR_CHANNELS,
};

/// Load an image with the default `image`-crate decoder.
///
/// See [`ImageLoader::read`].
///
/// # Errors
///
/// Returns an error if the image cannot be decoded or its dtype or shape is
/// not supported.
pub fn read<P: AsRef<Path>>(path: P) -> Result<NormalizedImage> {
    <ImageLoader>::default().read(path)
}

/// Loads image files as [`NormalizedImage`]s.
///
/// Stateless: one loader can serve any number of calls, from any number of
/// threads when its decoder and converter allow it.
#[derive(Debug, Clone, Default)]
pub struct ImageLoader<D = ImageCrateDecoder, C = SliceConverter> {
    decoder: D,
    converter: C,
}

/// Canonical layout of a single element type.
enum Layout<T> {
    Gray(Array2<T>),
    Bgr(Array3<T>),
}

impl<D: Decoder, C: ChannelConverter> ImageLoader<D, C> {
    /// Create a loader from a decoder and a channel converter.
    pub const fn new(decoder: D, converter: C) -> Self {
        Self { decoder, converter }
    }

    /// Read an image, keeping grayscale if possible and returning BGR otherwise.
    ///
    /// The file is decoded with its original depth and channels, then:
    /// 1. Rejected unless its elements are `uint8` or `uint16`
    /// 2. Returned as-is when already `(H, W)` or `(H, W, 3)`
    /// 3. Stripped of alpha when `(H, W, 4)`
    /// 4. Squeezed to `(H, W)` when `(H, W, 1)`
    ///
    /// # Errors
    ///
    /// - [`Error::ImageRead`] if the file cannot be decoded
    /// - [`Error::UnsupportedDtype`] if the depth is not 8 or 16 bits unsigned
    /// - [`Error::UnsupportedShape`] for any other layout
    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<NormalizedImage> {
        let path = path.as_ref();

        let raw = self
            .decoder
            .decode_unchanged(path)
            .ok_or_else(|| Error::ImageRead {
                path: path.to_path_buf(),
            })?;

        match raw {
            RawImage::U8(pixels) => Ok(match self.normalize(path, pixels)? {
                Layout::Gray(gray) => NormalizedImage::Gray8(gray),
                Layout::Bgr(bgr) => NormalizedImage::Bgr8(bgr),
            }),
            RawImage::U16(pixels) => Ok(match self.normalize(path, pixels)? {
                Layout::Gray(gray) => NormalizedImage::Gray16(gray),
                Layout::Bgr(bgr) => NormalizedImage::Bgr16(bgr),
            }),
            other => Err(Error::UnsupportedDtype {
                path: path.to_path_buf(),
                dtype: other.element_type(),
            }),
        }
    }

    /// Resolve a raw layout into grayscale or BGR.
    fn normalize<T: Clone>(&self, path: &Path, pixels: ArrayD<T>) -> Result<Layout<T>> {
        let shape = Shape::from(pixels.shape());
        let unsupported = || Error::UnsupportedShape {
            path: path.to_path_buf(),
            shape: shape.clone(),
        };

        let layout = match (shape.ndim(), shape.channels()) {
            (2, _) => Layout::Gray(
                pixels
                    .into_dimensionality::<Ix2>()
                    .map_err(|_| unsupported())?,
            ),
            (3, Some(BGR_CHANNELS)) => Layout::Bgr(
                pixels
                    .into_dimensionality::<Ix3>()
                    .map_err(|_| unsupported())?,
            ),
            (3, Some(BGRA_CHANNELS)) => {
                let bgra = pixels
                    .view()
                    .into_dimensionality::<Ix3>()
                    .map_err(|_| unsupported())?;
                Layout::Bgr(self.converter.drop_alpha(bgra))
            }
            (3, Some(1)) => Layout::Gray(
                pixels
                    .index_axis_move(Axis(2), 0)
                    .into_dimensionality::<Ix2>()
                    .map_err(|_| unsupported())?,
            ),
            _ => return Err(unsupported()),
        };

        tracing::debug!("normalized {} from {shape}", path.display());
        Ok(layout)
    }
}
