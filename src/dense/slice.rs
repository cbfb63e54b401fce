use super::Dense;
use crate::access::AccessPattern;
use crate::error::{DenseError, Result};

impl Dense {
    /// Narrows the backing buffer to raw positions `[start, end)` of the
    /// current view, without copying.
    ///
    /// The access pattern and the mask are left as they are: install the
    /// pattern matching the new view with `set_pattern`.
    pub fn slice(&mut self, start: usize, end: usize) -> Result<()> {
        self.storage = self.storage.slice(start, end).ok_or(DenseError::OutOfBounds {
            offset: end,
            len: self.storage.len(),
        })?;

        Ok(())
    }

    /// New array over raw positions `[start, end)` of this one's buffer,
    /// walked through `pattern`. Writes through either array are visible in
    /// both. The view starts unmasked.
    pub fn view(&self, pattern: AccessPattern, start: usize, end: usize) -> Result<Dense> {
        let storage = self.storage.slice(start, end).ok_or(DenseError::OutOfBounds {
            offset: end,
            len: self.storage.len(),
        })?;
        pattern.validate(storage.len())?;

        Ok(Dense {
            storage,
            pattern,
            mask: None,
        })
    }

    /// Second handle on the same buffer, pattern and mask.
    pub fn share(&self) -> Dense {
        Dense {
            storage: self.storage.clone(),
            pattern: self.pattern.clone(),
            mask: self.mask.clone(),
        }
    }
}
