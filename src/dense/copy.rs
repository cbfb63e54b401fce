//! Copies between dense arrays of the same kind.
//!
//! `copy_dense` and `copy_sliced` work on raw buffer positions and ignore the
//! access patterns; `copy_iter` pairs logical elements of both arrays through
//! their `FlatIterator`s. Copying arrays of different kinds is a programmer
//! error and panics.

use super::Dense;
use crate::access::FlatIterator;
use crate::error::{DenseError, Result};
use crate::storage::{Buffer, Storage};
use dense_macros::expand_kinds;
use std::ops::Range;
use tracing::{trace, warn};

fn assert_same_kind(dest: &Dense, src: &Dense) {
    assert_eq!(
        dest.kind(),
        src.kind(),
        "Cannot copy arrays of different kinds: {} into {}",
        src.kind(),
        dest.kind()
    );
}

#[expand_kinds]
fn copy_raw(dest: &Storage, range: Range<usize>, src: &Storage, src_range: Range<usize>) -> usize {
    match (dest, src) {
        (Storage::Kind(to), Storage::Kind(from)) => to.copy_from(range, from, src_range),
        (Storage::Opaque(to), Storage::Opaque(from)) => to.values.copy_from(range, &from.values, src_range),
        _ => unreachable!(),
    }
}

/// Copies the raw buffer of `src` into the raw buffer of `dest`, up to the
/// shorter of the two, and returns the number of elements copied.
///
/// A masked `src` replaces the mask of `dest`.
///
/// # Panics
/// If the arrays are of different kinds.
pub fn copy_dense(dest: &mut Dense, src: &Dense) -> usize {
    assert_same_kind(dest, src);

    if let Some(mask) = src.mask.as_deref() {
        dest.overwrite_mask(mask);
    }
    let count = copy_raw(&dest.storage, 0..dest.data_len(), &src.storage, 0..src.data_len());
    trace!(count, "dense copy");

    count
}

/// Copies raw positions `[sstart, send)` of `src` into raw positions
/// `[dstart, dend)` of `dest`, up to the shorter range, and returns the
/// number of elements copied.
///
/// A masked `src` has the matching mask entries copied along, growing the
/// mask of `dest` to at least `dend` entries.
///
/// # Panics
/// If the arrays are of different kinds or a range exceeds its buffer.
pub fn copy_sliced(dest: &mut Dense, dstart: usize, dend: usize, src: &Dense, sstart: usize, send: usize) -> usize {
    assert_same_kind(dest, src);

    let count = copy_raw(&dest.storage, dstart..dend, &src.storage, sstart..send);
    if let Some(src_mask) = src.mask.as_deref() {
        let dest_mask = dest.grow_mask(dend);
        let masked = count.min(src_mask.len().saturating_sub(sstart));
        dest_mask[dstart..dstart + masked].copy_from_slice(&src_mask[sstart..sstart + masked]);
    }
    trace!(count, dstart, sstart, "sliced copy");

    count
}

/// Copies logical elements of `src` into logical elements of `dest`, pairing
/// them in the order of the two iterators, until either runs out. Returns the
/// number of elements copied.
///
/// Missing iterators default to the arrays' own `flat_iter`; supplied ones
/// are bounded to the buffer they address. When both arrays are
/// materializable and no iterator is supplied, this is `copy_dense`.
///
/// A masked `src` grows the mask of `dest` to cover both the logical size of
/// `src` and the buffer of `dest`, and carries each copied element's mask
/// entry along. Mask entries are addressed by buffer offset.
///
/// An iterator fault, or a source offset past the end of the source mask,
/// stops the copy with `PartialCopy`, reporting how many elements were
/// already copied.
///
/// # Panics
/// If the arrays are of different kinds.
#[expand_kinds]
pub fn copy_iter(
    dest: &mut Dense,
    src: &Dense,
    dest_iter: Option<FlatIterator>,
    src_iter: Option<FlatIterator>,
) -> Result<usize> {
    assert_same_kind(dest, src);

    if dest_iter.is_none() && src_iter.is_none() && dest.is_materializable() && src.is_materializable() {
        return Ok(copy_dense(dest, src));
    }

    let mut dest_iter = match dest_iter {
        Some(iter) => iter.bounded(dest.data_len()),
        None => dest.flat_iter(),
    };
    let mut src_iter = match src_iter {
        Some(iter) => iter.bounded(src.data_len()),
        None => src.flat_iter(),
    };

    if src.is_masked() {
        let len = src.size().max(dest.data_len());
        dest.grow_mask(len);
    }
    let masks = match (dest.mask.as_deref_mut(), src.mask.as_deref()) {
        (Some(dest_mask), Some(src_mask)) => Some((dest_mask, src_mask)),
        _ => None,
    };

    let count = match (&dest.storage, &src.storage) {
        (Storage::Kind(to), Storage::Kind(from)) => {
            copy_offsets(to, from, &mut dest_iter, &mut src_iter, masks)?
        }
        (Storage::Opaque(to), Storage::Opaque(from)) => {
            copy_offsets(&to.values, &from.values, &mut dest_iter, &mut src_iter, masks)?
        }
        _ => unreachable!(),
    };
    trace!(count, "iterator copy");

    Ok(count)
}

fn copy_offsets<T: Clone>(
    dest: &Buffer<T>,
    src: &Buffer<T>,
    dest_iter: &mut FlatIterator,
    src_iter: &mut FlatIterator,
    mut masks: Option<(&mut [bool], &[bool])>,
) -> Result<usize> {
    // Views of one vector: read from a snapshot so that the source is not
    // borrowed while the destination is written.
    let snapshot;
    let src = if dest.aliases(src) {
        snapshot = src.detach();
        &snapshot
    } else {
        src
    };
    let mut dest_data = dest.borrow_mut();
    let src_data = src.borrow();

    let mut copied = 0;
    loop {
        let to = match dest_iter.next_offset().map_err(|err| interrupted(copied, err))? {
            Some(offset) => offset,
            None => break,
        };
        let from = match src_iter.next_offset().map_err(|err| interrupted(copied, err))? {
            Some(offset) => offset,
            None => break,
        };

        if let Some((dest_mask, src_mask)) = masks.as_mut() {
            let masked = *src_mask.get(from).ok_or_else(|| {
                let len = src_mask.len();
                interrupted(copied, DenseError::OutOfBounds { offset: from, len })
            })?;
            let len = dest_mask.len();
            let slot = dest_mask
                .get_mut(to)
                .ok_or_else(|| interrupted(copied, DenseError::OutOfBounds { offset: to, len }))?;
            *slot = masked;
        }
        dest_data[to] = src_data[from].clone();
        copied += 1;
    }

    Ok(copied)
}

fn interrupted(copied: usize, err: DenseError) -> DenseError {
    warn!(copied, error = %err, "iterator copy interrupted");
    DenseError::PartialCopy {
        copied,
        source: Box::new(err),
    }
}
