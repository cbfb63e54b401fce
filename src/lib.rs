//! Primitive storage engine of a dense N-dimensional array.
//!
//! A `Dense` array holds a backing buffer of one element kind, an
//! `AccessPattern` mapping logical elements onto buffer offsets, and an
//! optional validity mask. Six primitives operate on it: `memset`, `zero`,
//! the three copies (`copy_dense`, `copy_sliced`, `copy_iter`), `slice` and
//! equality. Each one loops over the buffer directly when the array is
//! materializable and walks a `FlatIterator` otherwise, and each one has a
//! compiled path per fixed element kind next to a type-erased path for any
//! other element type.
//!
//! ```
//! use dense_core::prelude::*;
//!
//! let mut a = Dense::from_vec(vec![0i32; 6], vec![2, 3]).unwrap();
//! a.memset(7i32).unwrap();
//! assert_eq!(a.to_vec::<i32>().unwrap(), vec![7; 6]);
//! ```

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use proptest::prelude::*;

    fn reversed(shape: &[usize]) -> AccessPattern {
        let strides = row_major_strides(shape).into_iter().map(|stride| -stride).collect();
        let size: usize = shape.iter().product();
        AccessPattern::new(shape.to_vec(), strides, size - 1).unwrap()
    }

    fn shape_and_data() -> impl Strategy<Value = (Vec<usize>, Vec<i16>)> {
        prop::collection::vec(1usize..4, 0..4).prop_flat_map(|shape| {
            let size: usize = shape.iter().product();
            (Just(shape), prop::collection::vec(any::<i16>(), size))
        })
    }

    #[test]
    fn memset_zero_copy_2x3() {
        let mut a = Dense::from_vec(vec![0i32; 6], vec![2, 3]).unwrap();
        a.memset(7i32).unwrap();
        assert_eq!(a.to_vec::<i32>().unwrap(), vec![7; 6]);

        a.zero();
        assert_eq!(a.to_vec::<i32>().unwrap(), vec![0; 6]);

        let src = Dense::from_vec(vec![1i32, 2, 3, 4, 5, 6], vec![2, 3]).unwrap();
        assert_eq!(copy_sliced(&mut a, 0, 3, &src, 0, 6), 3);
        assert_eq!(a.to_vec::<i32>().unwrap(), vec![1, 2, 3, 0, 0, 0]);
    }

    #[test]
    fn transposed_views() {
        let a = Dense::from_vec(vec![1i32, 2, 3, 4, 5, 6], vec![2, 3]).unwrap();
        let transposed = a.view(AccessPattern::new(vec![3, 2], vec![1, 3], 0).unwrap(), 0, 6).unwrap();
        assert_eq!(transposed.to_vec::<i32>().unwrap(), vec![1, 4, 2, 5, 3, 6]);

        let mut b = Dense::from_vec(vec![0i32; 6], vec![3, 2]).unwrap();
        assert_eq!(copy_iter(&mut b, &transposed, None, None).unwrap(), 6);
        assert!(b == transposed);
        assert!(transposed == b);
        assert!(b != a);
    }

    #[test]
    #[should_panic(expected = "Cannot copy arrays of different kinds")]
    fn copy_f32_into_i32() {
        let mut a = Dense::from_vec(vec![0i32; 6], vec![2, 3]).unwrap();
        let b = Dense::from_vec(vec![0.0f32; 6], vec![2, 3]).unwrap();
        copy_dense(&mut a, &b);
    }

    #[test]
    fn f32_and_i32_differ() {
        let a = Dense::from_vec(vec![0i32; 6], vec![2, 3]).unwrap();
        let b = Dense::from_vec(vec![0.0f32; 6], vec![2, 3]).unwrap();
        assert!(a != b);
    }

    #[test]
    fn copy_onto_shared_self() {
        let mut a = Dense::from_vec(vec![1u8, 2, 3, 4, 5, 6], vec![2, 3]).unwrap();
        let shared = a.share();
        assert_eq!(copy_dense(&mut a, &shared), 6);
        assert_eq!(a.to_vec::<u8>().unwrap(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn masked_copy_into_sliced_view() {
        let a = Dense::from_vec(vec![0.0f64; 6], vec![2, 3]).unwrap();
        let src = Dense::from_vec(vec![1.0f64, 2.0, 3.0], vec![3])
            .unwrap()
            .with_mask(vec![false, true, false])
            .unwrap();

        let mut row = a.share();
        row.set_pattern(AccessPattern::contiguous(vec![3]));
        row.slice(3, 6).unwrap();
        assert_eq!(copy_iter(&mut row, &src, None, None).unwrap(), 3);
        assert_eq!(row.mask(), Some(&[false, true, false][..]));
        assert_eq!(a.to_vec::<f64>().unwrap(), vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0]);
        assert!(!a.is_masked());
    }

    proptest! {
        #[test]
        fn memset_reads_back(shape in prop::collection::vec(1usize..4, 0..4), value in any::<i32>()) {
            let size: usize = shape.iter().product();
            let mut contiguous = Dense::from_vec(vec![0i32; size], shape.clone()).unwrap();
            contiguous.memset(value).unwrap();
            prop_assert_eq!(contiguous.to_vec::<i32>().unwrap(), vec![value; size]);

            let mut strided = Dense::with_pattern(vec![0i32; size], reversed(&shape)).unwrap();
            strided.memset(value).unwrap();
            prop_assert_eq!(strided.to_vec::<i32>().unwrap(), vec![value; size]);
            prop_assert!(strided.memset(value as i64).is_err());
        }

        #[test]
        fn eq_is_reflexive_and_symmetric((shape, data) in shape_and_data()) {
            let a = Dense::from_vec(data.clone(), shape.clone()).unwrap();
            let backwards: Vec<i16> = data.iter().rev().cloned().collect();
            let b = Dense::with_pattern(backwards, reversed(&shape)).unwrap();
            prop_assert!(a == a.share());
            prop_assert!(a == b);
            prop_assert!(b == a);

            let mut changed = data;
            changed[0] = changed[0].wrapping_add(1);
            let c = Dense::from_vec(changed, shape).unwrap();
            prop_assert!(a != c);
            prop_assert!(c != a);
            prop_assert!(b != c);
        }

        #[test]
        fn copy_iter_counts_shorter_side(dest_len in 1usize..12, src_len in 1usize..12) {
            let mut dest = Dense::from_vec(vec![0u32; dest_len], vec![dest_len]).unwrap();
            let values: Vec<u32> = (0..src_len as u32).collect();
            let src = Dense::with_pattern(values, reversed(&[src_len])).unwrap()
                .with_mask(vec![true; src_len]).unwrap();

            let count = copy_iter(&mut dest, &src, None, None).unwrap();
            prop_assert_eq!(count, dest_len.min(src_len));
            let copied = dest.to_vec::<u32>().unwrap();
            for (index, value) in copied.iter().take(count).enumerate() {
                prop_assert_eq!(*value, (src_len - 1 - index) as u32);
            }
            let mask = dest.mask().unwrap();
            prop_assert!(mask[..count].iter().all(|&masked| masked));
        }
    }
}

pub mod access;
pub mod dense;
pub mod error;
pub mod kind;
pub mod prelude;
pub mod storage;
