//! `dense` defines `Dense`, a dense N-dimensional array over a typed,
//! shareable backing buffer, and its primitive operations.
//!
//! A `Dense` array combines:
//! * a `Storage`, i.e. the backing buffer of one element kind,
//! * an `AccessPattern` mapping logical elements onto buffer offsets,
//! * an optional mask, parallel to the logical elements, where `true`
//!   marks an element as invalid.
//!
//! Every primitive first checks whether the array is materializable (its
//! logical order is exactly its buffer). If so it loops over the buffer
//! directly, otherwise it walks a `FlatIterator`. Inside either loop the
//! element kind is dispatched once, to the compiled path of a fixed kind or
//! to the type-erased path of a parameterized one.
//!
//! The primitives are spread over submodules:
//! * `memset`: `memset` and `zero`,
//! * `copy`: `copy_dense`, `copy_sliced` and `copy_iter`,
//! * `slice`: `slice` and the aliasing views,
//! * `eq`: structural equality (`PartialEq`),
//! * `mask`: mask bookkeeping.

use crate::access::{AccessPattern, FlatIterator};
use crate::error::{DenseError, Result};
use crate::kind::{DynElement, Element, ElementKind, OpaqueKind, OpaqueValue, Scalar};
use crate::storage::{Buffer, OpaqueBuffer, Storage};
use std::cell::Ref;

pub mod copy;
mod eq;
mod mask;
mod memset;
mod slice;

pub use copy::{copy_dense, copy_iter, copy_sliced};

#[derive(Debug)]
pub struct Dense {
    storage: Storage,
    pattern: AccessPattern,
    mask: Option<Vec<bool>>,
}

impl Dense {
    /// Contiguous row-major array; `data` must hold exactly one element per
    /// position of `shape`.
    pub fn from_vec<T: Element>(data: Vec<T>, shape: Vec<usize>) -> Result<Self> {
        let expected = shape.iter().product();
        if data.len() != expected {
            return Err(DenseError::ShapeMismatch {
                shape,
                expected,
                got: data.len(),
            });
        }

        Dense::with_pattern(data, AccessPattern::contiguous(shape))
    }

    /// Array viewing `data` through an arbitrary pattern, e.g. a transposed or
    /// reversed one.
    pub fn with_pattern<T: Element>(data: Vec<T>, pattern: AccessPattern) -> Result<Self> {
        pattern.validate(data.len())?;

        Ok(Dense {
            storage: T::into_storage(Buffer::new(data)),
            pattern,
            mask: None,
        })
    }

    /// Array of a parameterized kind. Such arrays take the type-erased path
    /// of every primitive.
    pub fn from_opaque<T>(data: Vec<T>, pattern: AccessPattern) -> Result<Self>
    where
        T: DynElement + Default,
    {
        pattern.validate(data.len())?;
        let values = data.into_iter().map(OpaqueValue::new).collect();

        Ok(Dense {
            storage: Storage::Opaque(OpaqueBuffer::new(values, OpaqueKind::of::<T>())),
            pattern,
            mask: None,
        })
    }

    #[inline]
    pub fn kind(&self) -> ElementKind {
        self.storage.kind()
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.pattern.shape()
    }

    #[inline]
    pub fn pattern(&self) -> &AccessPattern {
        &self.pattern
    }

    /// Installs a new access pattern without validating it against the
    /// buffer. Callers slicing an array set the matching pattern first.
    pub fn set_pattern(&mut self, pattern: AccessPattern) {
        self.pattern = pattern;
    }

    /// Number of logical elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.pattern.size()
    }

    /// Length of the backing buffer view.
    #[inline]
    pub fn data_len(&self) -> usize {
        self.storage.len()
    }

    /// Whether logical order is exactly the backing buffer, start to end.
    pub fn is_materializable(&self) -> bool {
        self.pattern.is_materializable() && self.pattern.size() == self.storage.len()
    }

    /// Fresh cursor over the buffer offsets of the logical elements.
    pub fn flat_iter(&self) -> FlatIterator {
        FlatIterator::new(&self.pattern).bounded(self.storage.len())
    }

    /// Element at logical (row-major) position `index`.
    pub fn get(&self, index: usize) -> Option<Scalar> {
        let offset = self.pattern.offset_of(index)?;
        self.storage.get(offset)
    }

    pub fn set<V: Into<Scalar>>(&mut self, index: usize, value: V) -> Result<()> {
        let offset = self
            .pattern
            .offset_of(index)
            .ok_or(DenseError::OutOfBounds {
                offset: index,
                len: self.size(),
            })?;
        self.storage.set(offset, value.into())
    }

    /// Raw buffer view, in buffer order, if the array holds `T`s.
    pub fn data<T: Element>(&self) -> Option<Ref<'_, [T]>> {
        T::buffer(&self.storage).map(Buffer::borrow)
    }

    /// Logical elements, in row-major order, if the array holds `T`s and its
    /// pattern can be walked.
    pub fn to_vec<T: Element>(&self) -> Option<Vec<T>> {
        let data = self.data::<T>()?;
        self.flat_iter()
            .map(|offset| offset.ok().map(|offset| data[offset].clone()))
            .collect()
    }
}
