//! Canonical output of the loader.

use ndarray::{Array2, Array3};

use super::{ElementType, Shape, BGR_CHANNELS};

/// An image in canonical form.
///
/// Grayscale images are `(H, W)` arrays, color images are `(H, W, 3)` arrays
/// in B,G,R channel order. Depth is 8 or 16 bits unsigned; nothing else can be
/// represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedImage {
    /// 8-bit grayscale, `(H, W)`.
    Gray8(Array2<u8>),
    /// 16-bit grayscale, `(H, W)`.
    Gray16(Array2<u16>),
    /// 8-bit color, `(H, W, 3)` in B,G,R order.
    Bgr8(Array3<u8>),
    /// 16-bit color, `(H, W, 3)` in B,G,R order.
    Bgr16(Array3<u16>),
}

impl NormalizedImage {
    /// `uint8` or `uint16`.
    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        match self {
            Self::Gray8(_) | Self::Bgr8(_) => ElementType::U8,
            Self::Gray16(_) | Self::Bgr16(_) => ElementType::U16,
        }
    }

    /// `(H, W)` or `(H, W, 3)`.
    #[must_use]
    pub fn shape(&self) -> Shape {
        match self {
            Self::Gray8(a) => Shape::from(a.shape()),
            Self::Gray16(a) => Shape::from(a.shape()),
            Self::Bgr8(a) => Shape::from(a.shape()),
            Self::Bgr16(a) => Shape::from(a.shape()),
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        match self {
            Self::Gray8(a) => a.nrows(),
            Self::Gray16(a) => a.nrows(),
            Self::Bgr8(a) => a.dim().0,
            Self::Bgr16(a) => a.dim().0,
        }
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        match self {
            Self::Gray8(a) => a.ncols(),
            Self::Gray16(a) => a.ncols(),
            Self::Bgr8(a) => a.dim().1,
            Self::Bgr16(a) => a.dim().1,
        }
    }

    /// 1 for grayscale, 3 for BGR.
    #[must_use]
    pub const fn channels(&self) -> usize {
        match self {
            Self::Gray8(_) | Self::Gray16(_) => 1,
            Self::Bgr8(_) | Self::Bgr16(_) => BGR_CHANNELS,
        }
    }

    #[must_use]
    pub const fn is_grayscale(&self) -> bool {
        matches!(self, Self::Gray8(_) | Self::Gray16(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_accessors() {
        let img = NormalizedImage::Gray16(Array2::zeros((100, 200)));
        assert_eq!(img.element_type(), ElementType::U16);
        assert_eq!(img.shape().to_string(), "(100, 200)");
        assert_eq!((img.height(), img.width(), img.channels()), (100, 200, 1));
        assert!(img.is_grayscale());
    }

    #[test]
    fn test_bgr_accessors() {
        let img = NormalizedImage::Bgr8(Array3::zeros((100, 200, 3)));
        assert_eq!(img.element_type(), ElementType::U8);
        assert_eq!(img.shape().dims(), &[100, 200, 3]);
        assert_eq!((img.height(), img.width(), img.channels()), (100, 200, 3));
        assert!(!img.is_grayscale());
    }
}
