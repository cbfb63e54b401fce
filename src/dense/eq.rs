use super::Dense;
use crate::storage::{Buffer, Storage};
use dense_macros::expand_kinds;

/// Structural equality: same kind, same shape and equal elements at every
/// logical position. Strides, offsets and masks are not compared.
///
/// The fixed-kind path reads `self` in raw buffer order only when that order
/// is its logical order. A non-materializable `self` is walked through its
/// `FlatIterator` rather than its raw buffer, so both sides are compared by
/// logical position and the relation stays symmetric across strides.
#[expand_kinds]
impl PartialEq for Dense {
    fn eq(&self, other: &Dense) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if self.size() != other.size() || self.kind() != other.kind() || self.shape() != other.shape() {
            return false;
        }

        match (&self.storage, &other.storage) {
            (Storage::Kind(lhs), Storage::Kind(rhs)) => eq_elements(self, lhs, other, rhs),
            (Storage::Opaque(_), Storage::Opaque(_)) => (0..self.size()).all(|index| {
                match (self.get(index), other.get(index)) {
                    (Some(lhs), Some(rhs)) => lhs == rhs,
                    _ => false,
                }
            }),
            _ => false,
        }
    }
}

// Walks `lhs` (its raw buffer when materializable) and reads `rhs` at the
// same logical position.
fn eq_elements<T: PartialEq>(lhs: &Dense, lhs_data: &Buffer<T>, rhs: &Dense, rhs_data: &Buffer<T>) -> bool {
    let (lhs_values, rhs_values) = (lhs_data.borrow(), rhs_data.borrow());
    let equal_at = |index: usize, value: &T| {
        rhs.pattern
            .offset_of(index)
            .and_then(|offset| rhs_values.get(offset))
            .map_or(false, |other| value == other)
    };

    if lhs.is_materializable() {
        lhs_values
            .iter()
            .enumerate()
            .all(|(index, value)| equal_at(index, value))
    } else {
        lhs.flat_iter().enumerate().all(|(index, offset)| match offset {
            Ok(offset) => equal_at(index, &lhs_values[offset]),
            Err(_) => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::access::AccessPattern;
    use crate::dense::Dense;

    #[test]
    #[allow(clippy::eq_op)]
    fn reflexive() {
        let a = Dense::from_vec(vec![1i32, 2, 3, 4], vec![2, 2]).unwrap();
        assert!(a == a);
        assert!(a == a.share());
    }

    #[test]
    fn strides_do_not_matter() {
        let row_major = Dense::from_vec(vec![1u8, 2, 3, 4, 5, 6], vec![2, 3]).unwrap();
        let column_major = Dense::with_pattern(
            vec![1u8, 4, 2, 5, 3, 6],
            AccessPattern::new(vec![2, 3], vec![1, 2], 0).unwrap(),
        )
        .unwrap();
        let reversed = Dense::with_pattern(
            vec![6u8, 5, 4, 3, 2, 1],
            AccessPattern::new(vec![2, 3], vec![-3, -1], 5).unwrap(),
        )
        .unwrap();

        assert!(row_major == column_major);
        assert!(column_major == row_major);
        assert!(row_major == reversed);
        assert!(reversed == column_major);
    }

    #[test]
    fn unequal() {
        let a = Dense::from_vec(vec![1i32, 2, 3, 4], vec![2, 2]).unwrap();
        let values = Dense::from_vec(vec![1i32, 2, 3, 5], vec![2, 2]).unwrap();
        let shape = Dense::from_vec(vec![1i32, 2, 3, 4], vec![4]).unwrap();
        let kind = Dense::from_vec(vec![1i64, 2, 3, 4], vec![2, 2]).unwrap();
        let size = Dense::from_vec(vec![1i32, 2], vec![2, 1]).unwrap();
        assert!(a != values);
        assert!(a != shape);
        assert!(a != kind);
        assert!(a != size);

        let f = Dense::from_vec(vec![1.0f32, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
        assert!(a != f);
        assert!(f != a);
    }

    #[test]
    fn masks_are_ignored() {
        let a = Dense::from_vec(vec![true, false], vec![2]).unwrap();
        let b = Dense::from_vec(vec![true, false], vec![2])
            .unwrap()
            .with_mask(vec![true, true])
            .unwrap();
        assert!(a == b);
    }

    #[test]
    fn malformed_pattern_is_unequal() {
        let a = Dense::from_vec(vec![1u32, 2], vec![2]).unwrap();
        let mut b = Dense::from_vec(vec![1u32, 2], vec![2]).unwrap();
        b.set_pattern(AccessPattern::from_raw_parts_unchecked(vec![2], vec![], 0));
        assert!(b != a);
        assert!(a != b);
    }

    #[test]
    fn opaque() {
        let pattern = AccessPattern::contiguous(vec![2]);
        let reversed = AccessPattern::new(vec![2], vec![-1], 1).unwrap();
        let a = Dense::from_opaque(vec![(1u8, 'a'), (2, 'b')], pattern.clone()).unwrap();
        let b = Dense::from_opaque(vec![(2u8, 'b'), (1, 'a')], reversed).unwrap();
        let c = Dense::from_opaque(vec![(1u8, 'a'), (2, 'c')], pattern.clone()).unwrap();
        let d = Dense::from_opaque(vec![(1u16, 'a'), (2, 'b')], pattern).unwrap();
        assert!(a == b);
        assert!(b == a);
        assert!(a != c);
        assert!(a != d);
    }
}
