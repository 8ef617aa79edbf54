//! Channel conversion.

use ndarray::{s, Array3, ArrayView3};

use super::BGR_CHANNELS;

/// Removes the alpha channel from interleaved color pixels.
pub trait ChannelConverter {
    /// Drop the trailing alpha channel of an `(H, W, 4)` view.
    ///
    /// The first three channels are returned unchanged and in their original
    /// order. Alpha is discarded, never blended.
    fn drop_alpha<T: Clone>(&self, pixels: ArrayView3<'_, T>) -> Array3<T>;
}

/// Drops alpha by slicing off every channel past the third.
#[derive(Debug, Clone, Copy, Default)]
pub struct SliceConverter;

impl ChannelConverter for SliceConverter {
    fn drop_alpha<T: Clone>(&self, pixels: ArrayView3<'_, T>) -> Array3<T> {
        pixels
            .slice(s![.., .., ..BGR_CHANNELS])
            .as_standard_layout()
            .into_owned()
    }
}
