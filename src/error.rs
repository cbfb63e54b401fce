use crate::kind::ElementKind;

/// Errors surfaced by the dense primitives.
///
/// Kind mismatches between two arrays during a copy are not part of this
/// enum: they are programmer errors and panic.
#[derive(Debug, thiserror::Error)]
pub enum DenseError {
    /// A value's kind disagrees with the array's element kind.
    #[error("cannot store {value} in an array of kind {kind}")]
    DtypeMismatch { kind: ElementKind, value: String },

    /// Shape does not describe the given number of elements.
    #[error("shape {shape:?} describes {expected} elements, got {got}")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        got: usize,
    },

    /// Mask length differs from the logical element count.
    #[error("mask of length {got} for an array of {expected} elements")]
    MaskLength { expected: usize, got: usize },

    /// Stride list and shape list have different lengths.
    #[error("access pattern has {shape} dimensions but {strides} strides")]
    StrideLengthMismatch { shape: usize, strides: usize },

    /// Offset arithmetic overflowed or went below zero.
    #[error("offset overflow while walking the access pattern")]
    OffsetOverflow,

    /// Offset or range outside of the backing buffer.
    #[error("offset {offset} out of bounds for a buffer of length {len}")]
    OutOfBounds { offset: usize, len: usize },

    /// An iterator fault interrupted an element-wise copy.
    #[error("copy interrupted after {copied} elements")]
    PartialCopy {
        copied: usize,
        #[source]
        source: Box<DenseError>,
    },
}

pub type Result<T> = std::result::Result<T, DenseError>;
