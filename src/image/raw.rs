//! Raw decoder output: pixels at their original depth and channel count.

use std::fmt;

use ndarray::ArrayD;

/// Per-pixel numeric representation reported by a decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 32-bit unsigned integer.
    U32,
    /// 8-bit signed integer.
    I8,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
}

impl ElementType {
    /// Conventional dtype name, e.g. `uint8` or `float32`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::U8 => "uint8",
            Self::U16 => "uint16",
            Self::U32 => "uint32",
            Self::I8 => "int8",
            Self::I16 => "int16",
            Self::I32 => "int32",
            Self::F32 => "float32",
            Self::F64 => "float64",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Dimensions of a pixel buffer, outermost first: `(H, W)` or `(H, W, C)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape(Vec<usize>);

impl Shape {
    /// Number of axes.
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    /// Axis lengths, outermost first.
    #[must_use]
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// Size of the trailing channel axis of a 3-D shape.
    #[must_use]
    pub fn channels(&self) -> Option<usize> {
        match self.0.as_slice() {
            [_, _, c] => Some(*c),
            _ => None,
        }
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self(dims.to_vec())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, dim) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{dim}")?;
        }
        if self.0.len() == 1 {
            f.write_str(",")?;
        }
        f.write_str(")")
    }
}

/// A decoded image before normalization.
///
/// One variant per element type; each holds a row-major array whose shape is
/// whatever the decoder reported.
#[derive(Debug, Clone, PartialEq)]
pub enum RawImage {
    /// `uint8` samples.
    U8(ArrayD<u8>),
    /// `uint16` samples.
    U16(ArrayD<u16>),
    /// `uint32` samples.
    U32(ArrayD<u32>),
    /// `int8` samples.
    I8(ArrayD<i8>),
    /// `int16` samples.
    I16(ArrayD<i16>),
    /// `int32` samples.
    I32(ArrayD<i32>),
    /// `float32` samples.
    F32(ArrayD<f32>),
    /// `float64` samples.
    F64(ArrayD<f64>),
}

impl RawImage {
    /// Element type of the samples.
    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        match self {
            Self::U8(_) => ElementType::U8,
            Self::U16(_) => ElementType::U16,
            Self::U32(_) => ElementType::U32,
            Self::I8(_) => ElementType::I8,
            Self::I16(_) => ElementType::I16,
            Self::I32(_) => ElementType::I32,
            Self::F32(_) => ElementType::F32,
            Self::F64(_) => ElementType::F64,
        }
    }

    /// Shape as reported by the decoder.
    #[must_use]
    pub fn shape(&self) -> Shape {
        let dims = match self {
            Self::U8(a) => a.shape(),
            Self::U16(a) => a.shape(),
            Self::U32(a) => a.shape(),
            Self::I8(a) => a.shape(),
            Self::I16(a) => a.shape(),
            Self::I32(a) => a.shape(),
            Self::F32(a) => a.shape(),
            Self::F64(a) => a.shape(),
        };
        Shape::from(dims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    #[test]
    fn test_shape_display() {
        assert_eq!(Shape::from(&[100, 200][..]).to_string(), "(100, 200)");
        assert_eq!(Shape::from(&[100, 200, 3][..]).to_string(), "(100, 200, 3)");
        assert_eq!(Shape::from(&[7][..]).to_string(), "(7,)");
    }

    #[test]
    fn test_shape_channels() {
        assert_eq!(Shape::from(&[4, 4][..]).channels(), None);
        assert_eq!(Shape::from(&[4, 4, 4][..]).channels(), Some(4));
        assert_eq!(Shape::from(&[1, 4, 4, 3][..]).channels(), None);
    }

    #[test]
    fn test_raw_reports_dtype_and_shape() {
        let raw = RawImage::F32(ArrayD::zeros(IxDyn(&[2, 3, 3])));
        assert_eq!(raw.element_type(), ElementType::F32);
        assert_eq!(raw.element_type().to_string(), "float32");
        assert_eq!(raw.shape().dims(), &[2, 3, 3]);
    }
}
