use super::Dense;
use crate::error::{DenseError, Result};
use tracing::debug;

impl Dense {
    /// Attaches a mask, one entry per logical element; `true` marks the
    /// element as invalid.
    pub fn with_mask(mut self, mask: Vec<bool>) -> Result<Self> {
        if mask.len() != self.size() {
            return Err(DenseError::MaskLength {
                expected: self.size(),
                got: mask.len(),
            });
        }

        self.mask = Some(mask);
        Ok(self)
    }

    #[inline]
    pub fn is_masked(&self) -> bool {
        self.mask.is_some()
    }

    pub fn mask(&self) -> Option<&[bool]> {
        self.mask.as_deref()
    }

    /// Marks every element valid. No-op on unmasked arrays.
    pub fn reset_mask(&mut self) {
        if let Some(mask) = self.mask.as_mut() {
            for entry in mask.iter_mut() {
                *entry = false;
            }
        }
    }

    /// Replaces the mask with a copy of `src`, reusing the current allocation
    /// when it is large enough.
    pub(crate) fn overwrite_mask(&mut self, src: &[bool]) {
        match self.mask.as_mut() {
            Some(mask) => {
                if mask.capacity() < src.len() {
                    debug!(from = mask.capacity(), to = src.len(), "reallocating mask");
                }
                mask.clear();
                mask.extend_from_slice(src);
            }
            None => {
                debug!(len = src.len(), "attaching mask");
                self.mask = Some(src.to_vec());
            }
        }
    }

    /// Grows the mask to at least `len` entries, keeping the existing ones;
    /// new entries are valid. Attaches a mask to unmasked arrays.
    pub(crate) fn grow_mask(&mut self, len: usize) -> &mut [bool] {
        let mask = self.mask.get_or_insert_with(|| {
            debug!(len, "attaching mask");
            Vec::with_capacity(len)
        });
        if mask.len() < len {
            if mask.capacity() < len {
                debug!(from = mask.capacity(), to = len, "reallocating mask");
            }
            mask.resize(len, false);
        }

        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn array() -> Dense {
        Dense::from_vec(vec![1u32, 2, 3, 4], vec![2, 2]).unwrap()
    }

    #[test]
    fn with_mask() {
        let a = array().with_mask(vec![false, true, false, false]).unwrap();
        assert!(a.is_masked());
        assert_eq!(a.mask(), Some(&[false, true, false, false][..]));

        let err = array().with_mask(vec![true]).unwrap_err();
        assert!(matches!(err, DenseError::MaskLength { expected: 4, got: 1 }));
    }

    #[test]
    fn reset_mask() {
        let mut a = array().with_mask(vec![true; 4]).unwrap();
        a.reset_mask();
        assert_eq!(a.mask(), Some(&[false; 4][..]));

        let mut b = array();
        b.reset_mask();
        assert!(!b.is_masked());
    }

    #[test]
    fn overwrite_mask() {
        let mut a = array().with_mask(vec![false; 4]).unwrap();
        a.overwrite_mask(&[true, true]);
        assert_eq!(a.mask(), Some(&[true, true][..]));

        let mut b = array();
        b.overwrite_mask(&[true, false, true]);
        assert_eq!(b.mask(), Some(&[true, false, true][..]));
    }

    #[test]
    fn grow_mask() {
        let mut a = array().with_mask(vec![true, false, false, true]).unwrap();
        assert_eq!(a.grow_mask(6), &[true, false, false, true, false, false]);
        // Never shrinks.
        assert_eq!(a.grow_mask(2).len(), 6);

        let mut b = array();
        assert_eq!(b.grow_mask(3), &[false; 3]);
        assert!(b.is_masked());
    }
}
