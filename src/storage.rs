//! `storage` holds the backing buffers of dense arrays.
//!
//! A `Buffer<T>` is a window `[start, end)` over a vector shared through
//! `Rc<RefCell<_>>`: slicing a buffer narrows the window without copying,
//! and every window over the same vector observes writes made through the
//! others. Storage is therefore neither `Send` nor `Sync`.
//!
//! `Storage` is the closed sum over all fixed kinds plus the opaque variant;
//! its per-kind variants are generated by `expand_kinds`.

use crate::access::FlatIterator;
use crate::error::{DenseError, Result};
use crate::kind::{ElementKind, OpaqueKind, OpaqueValue, Scalar};
use dense_macros::expand_kinds;
use std::cell::{Ref, RefCell, RefMut};
use std::ops::Range;
use std::rc::Rc;

#[derive(Debug)]
pub struct Buffer<T> {
    data: Rc<RefCell<Vec<T>>>,
    start: usize,
    end: usize,
}

impl<T> Clone for Buffer<T> {
    fn clone(&self) -> Self {
        Buffer {
            data: Rc::clone(&self.data),
            start: self.start,
            end: self.end,
        }
    }
}

impl<T> Buffer<T> {
    pub fn new(data: Vec<T>) -> Self {
        let end = data.len();
        Buffer {
            data: Rc::new(RefCell::new(data)),
            start: 0,
            end,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn borrow(&self) -> Ref<'_, [T]> {
        let (start, end) = (self.start, self.end);
        Ref::map(self.data.borrow(), |data| &data[start..end])
    }

    pub fn borrow_mut(&self) -> RefMut<'_, [T]> {
        let (start, end) = (self.start, self.end);
        RefMut::map(self.data.borrow_mut(), |data| &mut data[start..end])
    }

    /// Window `[start, end)` relative to this one, sharing the same vector.
    pub fn slice(&self, start: usize, end: usize) -> Option<Self> {
        if start > end || end > self.len() {
            return None;
        }

        Some(Buffer {
            data: Rc::clone(&self.data),
            start: self.start + start,
            end: self.start + end,
        })
    }

    /// Whether both windows view the same vector.
    #[inline]
    pub fn aliases(&self, other: &Buffer<T>) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

impl<T: Clone> Buffer<T> {
    pub fn get(&self, offset: usize) -> Option<T> {
        self.borrow().get(offset).cloned()
    }

    pub fn set(&self, offset: usize, value: T) -> Result<()> {
        let len = self.len();
        match self.borrow_mut().get_mut(offset) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(DenseError::OutOfBounds { offset, len }),
        }
    }

    pub fn fill(&self, value: T) {
        self.borrow_mut().fill(value);
    }

    /// Assigns `value` at every offset produced by `offsets`.
    pub fn fill_offsets(&self, offsets: &mut FlatIterator, value: T) -> Result<()> {
        let mut data = self.borrow_mut();
        while let Some(offset) = offsets.next_offset()? {
            data[offset] = value.clone();
        }

        Ok(())
    }

    /// Copies `src[src_range]` into `self[range]`, stopping at the shorter
    /// range, and returns the number of elements copied. Overlapping windows
    /// of the same vector are handled.
    ///
    /// # Panics
    /// If either range exceeds its buffer.
    pub fn copy_from(&self, range: Range<usize>, src: &Buffer<T>, src_range: Range<usize>) -> usize {
        assert!(
            range.start <= range.end && range.end <= self.len(),
            "Destination range {:?} out of bounds for a buffer of length {}",
            range,
            self.len()
        );
        assert!(
            src_range.start <= src_range.end && src_range.end <= src.len(),
            "Source range {:?} out of bounds for a buffer of length {}",
            src_range,
            src.len()
        );
        let count = range.len().min(src_range.len());

        if self.aliases(src) {
            let from = src.start + src_range.start;
            let to = self.start + range.start;
            if from != to {
                let mut data = self.data.borrow_mut();
                let staged = data[from..from + count].to_vec();
                data[to..to + count].clone_from_slice(&staged);
            }
        } else {
            let source = src.borrow();
            self.borrow_mut()[range.start..range.start + count]
                .clone_from_slice(&source[src_range.start..src_range.start + count]);
        }

        count
    }

    /// Independent copy of the window.
    pub fn detach(&self) -> Buffer<T> {
        Buffer::new(self.borrow().to_vec())
    }
}

/// Backing buffer of a parameterized kind.
#[derive(Debug, Clone)]
pub struct OpaqueBuffer {
    pub(crate) values: Buffer<OpaqueValue>,
    pub(crate) kind: OpaqueKind,
}

impl OpaqueBuffer {
    pub fn new(values: Vec<OpaqueValue>, kind: OpaqueKind) -> Self {
        OpaqueBuffer {
            values: Buffer::new(values),
            kind,
        }
    }

    pub fn slice(&self, start: usize, end: usize) -> Option<Self> {
        Some(OpaqueBuffer {
            values: self.values.slice(start, end)?,
            kind: self.kind,
        })
    }
}

#[expand_kinds]
#[derive(Debug, Clone)]
pub enum Storage {
    Kind(Buffer<Elem>),
    Opaque(OpaqueBuffer),
}

#[expand_kinds]
impl Storage {
    pub fn kind(&self) -> ElementKind {
        match self {
            Storage::Kind(_) => ElementKind::Kind,
            Storage::Opaque(buffer) => ElementKind::from(&buffer.kind),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Storage::Kind(buffer) => buffer.len(),
            Storage::Opaque(buffer) => buffer.values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Zero-copy window `[start, end)` of the current view.
    pub fn slice(&self, start: usize, end: usize) -> Option<Storage> {
        match self {
            Storage::Kind(buffer) => buffer.slice(start, end).map(Storage::Kind),
            Storage::Opaque(buffer) => buffer.slice(start, end).map(Storage::Opaque),
        }
    }

    pub fn get(&self, offset: usize) -> Option<Scalar> {
        match self {
            Storage::Kind(buffer) => buffer.get(offset).map(Scalar::Kind),
            Storage::Opaque(buffer) => buffer.values.get(offset).map(Scalar::Opaque),
        }
    }

    pub fn set(&self, offset: usize, value: Scalar) -> Result<()> {
        match (self, value) {
            (Storage::Kind(buffer), Scalar::Kind(value)) => buffer.set(offset, value),
            (Storage::Opaque(buffer), Scalar::Opaque(value)) if buffer.kind.accepts(&value) => {
                buffer.values.set(offset, value)
            }
            (storage, value) => Err(DenseError::DtypeMismatch {
                kind: storage.kind(),
                value: format!("{:?}", value),
            }),
        }
    }
}
