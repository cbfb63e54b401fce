//! `access` describes how logical elements of an array map onto offsets of
//! its backing buffer.
//!
//! An `AccessPattern` is a shape, one stride per dimension and a base offset.
//! Strides are signed so that reversed views can be expressed without
//! copying. A pattern is *materializable* when its logical row-major order is
//! exactly one contiguous run of the buffer starting at offset 0; primitives
//! use that flag to pick a direct loop over the buffer instead of a
//! `FlatIterator`.

use crate::error::{DenseError, Result};
use std::convert::TryFrom;

mod flat_iterator;
pub use flat_iterator::FlatIterator;

/// Row-major (C order) strides of a shape.
pub fn row_major_strides(shape: &[usize]) -> Vec<isize> {
    let mut strides = vec![0; shape.len()];
    let mut product = 1;
    for (stride, dim) in strides.iter_mut().zip(shape.iter()).rev() {
        *stride = product as isize;
        product *= *dim;
    }

    strides
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPattern {
    shape: Vec<usize>,
    strides: Vec<isize>,
    offset: usize,
    materializable: bool,
}

impl AccessPattern {
    /// Contiguous row-major pattern over `shape`.
    pub fn contiguous(shape: Vec<usize>) -> Self {
        let strides = row_major_strides(&shape);
        AccessPattern::from_raw_parts_unchecked(shape, strides, 0)
    }

    pub fn new(shape: Vec<usize>, strides: Vec<isize>, offset: usize) -> Result<Self> {
        if shape.len() != strides.len() {
            return Err(DenseError::StrideLengthMismatch {
                shape: shape.len(),
                strides: strides.len(),
            });
        }

        Ok(AccessPattern::from_raw_parts_unchecked(shape, strides, offset))
    }

    /// Builds a pattern without checking that shape and strides agree.
    ///
    /// Patterns coming from an external shape subsystem go through here; a
    /// malformed one is reported as a fault by the `FlatIterator` walking it.
    pub fn from_raw_parts_unchecked(shape: Vec<usize>, strides: Vec<isize>, offset: usize) -> Self {
        let materializable = offset == 0
            && shape.len() == strides.len()
            && shape
                .iter()
                .zip(strides.iter().zip(row_major_strides(&shape)))
                .all(|(dim, (stride, expected))| *dim <= 1 || *stride == expected);

        AccessPattern {
            shape,
            strides,
            offset,
            materializable,
        }
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Number of logical elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }

    #[inline]
    pub fn is_materializable(&self) -> bool {
        self.materializable
    }

    /// Buffer offset of the logical (row-major) element `index`.
    pub fn offset_of(&self, index: usize) -> Option<usize> {
        if index >= self.size() || self.shape.len() != self.strides.len() {
            return None;
        }

        let mut remainder = index;
        let mut offset = isize::try_from(self.offset).ok()?;
        for (dim, stride) in self.shape.iter().zip(self.strides.iter()).rev() {
            let coordinate = isize::try_from(remainder % dim).ok()?;
            remainder /= dim;
            offset = offset.checked_add(coordinate.checked_mul(*stride)?)?;
        }

        usize::try_from(offset).ok()
    }

    /// Checks that every offset reachable through the pattern lies in a
    /// buffer of length `len`.
    pub fn validate(&self, len: usize) -> Result<()> {
        if self.shape.len() != self.strides.len() {
            return Err(DenseError::StrideLengthMismatch {
                shape: self.shape.len(),
                strides: self.strides.len(),
            });
        }
        if self.shape.iter().any(|&dim| dim == 0) {
            return Ok(());
        }

        let base = isize::try_from(self.offset).map_err(|_| DenseError::OffsetOverflow)?;
        let (mut min_offset, mut max_offset) = (base, base);
        for (&dim, &stride) in self.shape.iter().zip(self.strides.iter()) {
            let extent = isize::try_from(dim - 1)
                .ok()
                .and_then(|steps| steps.checked_mul(stride))
                .ok_or(DenseError::OffsetOverflow)?;
            if extent >= 0 {
                max_offset = max_offset.checked_add(extent).ok_or(DenseError::OffsetOverflow)?;
            } else {
                min_offset = min_offset.checked_add(extent).ok_or(DenseError::OffsetOverflow)?;
            }
        }

        if min_offset < 0 {
            return Err(DenseError::OffsetOverflow);
        }
        if max_offset as usize >= len {
            return Err(DenseError::OutOfBounds {
                offset: max_offset as usize,
                len,
            });
        }
        Ok(())
    }
}
