pub use crate::access::{row_major_strides, AccessPattern, FlatIterator};
pub use crate::dense::{copy_dense, copy_iter, copy_sliced, Dense};
pub use crate::error::{DenseError, Result};
pub use crate::kind::{DynElement, Element, ElementKind, OpaqueKind, OpaqueValue, Scalar};
