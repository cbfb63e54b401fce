use super::Dense;
use crate::error::{DenseError, Result};
use crate::kind::Scalar;
use crate::storage::Storage;
use dense_macros::expand_kinds;

#[expand_kinds]
impl Dense {
    /// Sets every logical element to `value`.
    ///
    /// Fails with `DtypeMismatch` when `value` is not of the array's kind, or
    /// with the iterator's fault when the access pattern cannot be walked.
    pub fn memset<V: Into<Scalar>>(&mut self, value: V) -> Result<()> {
        let materializable = self.is_materializable();

        match (&self.storage, value.into()) {
            (Storage::Kind(buffer), Scalar::Kind(value)) => {
                if materializable {
                    buffer.fill(value);
                    Ok(())
                } else {
                    buffer.fill_offsets(&mut self.flat_iter(), value)
                }
            }
            (Storage::Opaque(buffer), Scalar::Opaque(value)) if buffer.kind.accepts(&value) => {
                if materializable {
                    buffer.values.fill(value);
                    Ok(())
                } else {
                    buffer.values.fill_offsets(&mut self.flat_iter(), value)
                }
            }
            (storage, value) => Err(DenseError::DtypeMismatch {
                kind: storage.kind(),
                value: format!("{:?}", value),
            }),
        }
    }

    /// Resets every logical element to the zero value of its kind and marks
    /// every element valid.
    ///
    /// # Panics
    /// If the access pattern cannot be walked.
    pub fn zero(&mut self) {
        let materializable = self.is_materializable();

        let result = match &self.storage {
            Storage::Kind(buffer) => {
                if materializable {
                    buffer.fill(ZERO);
                    Ok(())
                } else {
                    buffer.fill_offsets(&mut self.flat_iter(), ZERO)
                }
            }
            Storage::Opaque(buffer) => {
                if materializable {
                    buffer.values.fill(buffer.kind.zero());
                    Ok(())
                } else {
                    buffer.values.fill_offsets(&mut self.flat_iter(), buffer.kind.zero())
                }
            }
        };
        if let Err(err) = result {
            panic!("Cannot zero an array with a malformed access pattern: {}", err);
        }

        self.reset_mask();
    }
}
