//! `kind` defines the element kinds a dense array can hold.
//!
//! The fixed kinds (integers, floats, complex numbers, booleans, strings and
//! raw pointers) each get a compiled fast path: their enum variants and
//! `Element` implementations are generated by the `expand_kinds` procedural
//! macro from `dense_macros`, which keeps the kind list in one place. Any
//! other type is *parameterized* and goes through the type-erased machinery
//! of the `opaque` submodule.

use crate::storage::{Buffer, Storage};
use dense_macros::expand_kinds;
use std::any::{self, TypeId};
use std::fmt;

pub mod opaque;
pub use opaque::{DynElement, OpaqueKind, OpaqueValue};

/// Category of the elements of an array.
#[expand_kinds]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Kind,
    /// Any type outside of the fixed set.
    Parameterized { type_id: TypeId, name: &'static str },
}

#[expand_kinds]
impl ElementKind {
    /// Whether the kind has a compiled fast path.
    pub fn is_parameterized(&self) -> bool {
        match self {
            ElementKind::Kind => false,
            ElementKind::Parameterized { .. } => true,
        }
    }
}

#[expand_kinds]
impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Kind => f.write_str(any::type_name::<Elem>()),
            ElementKind::Parameterized { name, .. } => f.write_str(name),
        }
    }
}

impl From<&OpaqueKind> for ElementKind {
    fn from(kind: &OpaqueKind) -> Self {
        ElementKind::Parameterized {
            type_id: kind.type_id(),
            name: kind.type_name(),
        }
    }
}

/// Element types with a compiled fast path.
pub trait Element: Clone + PartialEq + fmt::Debug + 'static {
    const KIND: ElementKind;

    fn zero() -> Self;
    fn into_storage(buffer: Buffer<Self>) -> Storage;
    fn buffer(storage: &Storage) -> Option<&Buffer<Self>>;
}

#[expand_kinds]
impl Element for Elem {
    const KIND: ElementKind = ElementKind::Kind;

    #[inline]
    fn zero() -> Self {
        ZERO
    }

    fn into_storage(buffer: Buffer<Self>) -> Storage {
        Storage::Kind(buffer)
    }

    fn buffer(storage: &Storage) -> Option<&Buffer<Self>> {
        match storage {
            Storage::Kind(buffer) => Some(buffer),
            _ => None,
        }
    }
}

/// A single value of any kind, as passed to `memset` or `set`.
#[expand_kinds]
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Kind(Elem),
    Opaque(OpaqueValue),
}

#[expand_kinds]
impl From<Elem> for Scalar {
    fn from(value: Elem) -> Self {
        Scalar::Kind(value)
    }
}

impl From<OpaqueValue> for Scalar {
    fn from(value: OpaqueValue) -> Self {
        Scalar::Opaque(value)
    }
}

#[expand_kinds]
impl Scalar {
    /// Wraps a value of a parameterized kind.
    pub fn opaque<T: DynElement>(value: T) -> Self {
        Scalar::Opaque(OpaqueValue::new(value))
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Scalar::Kind(_) => ElementKind::Kind,
            Scalar::Opaque(value) => ElementKind::Parameterized {
                type_id: value.type_id(),
                name: value.type_name(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn element_kinds() {
        assert_eq!(<i32 as Element>::KIND, ElementKind::I32);
        assert_eq!(<Complex64 as Element>::KIND, ElementKind::Complex64);
        assert_eq!(<String as Element>::KIND, ElementKind::String);
        assert!(!ElementKind::Bool.is_parameterized());
        assert!(ElementKind::from(&OpaqueKind::of::<(u8, u8)>()).is_parameterized());
    }

    #[test]
    fn zero_values() {
        assert_eq!(<bool as Element>::zero(), false);
        assert_eq!(<u16 as Element>::zero(), 0);
        assert_eq!(<f64 as Element>::zero(), 0.0);
        assert_eq!(<Complex64 as Element>::zero(), Complex64::new(0.0, 0.0));
        assert_eq!(<String as Element>::zero(), "");
        assert!(<*mut std::ffi::c_void as Element>::zero().is_null());
    }

    #[test]
    fn scalar_kinds() {
        assert_eq!(Scalar::from(7i32).kind(), ElementKind::I32);
        assert_eq!(Scalar::from(7.0f32).kind(), ElementKind::F32);
        assert_eq!(Scalar::from(String::from("a")).kind(), ElementKind::String);
        let kind = Scalar::opaque((1u8, 2u8)).kind();
        assert_eq!(kind, ElementKind::from(&OpaqueKind::of::<(u8, u8)>()));
        assert!(kind.is_parameterized());
    }

    #[test]
    fn display() {
        assert_eq!(ElementKind::I32.to_string(), "i32");
        assert_eq!(ElementKind::Bool.to_string(), "bool");
        assert_eq!(ElementKind::from(&OpaqueKind::of::<(u8, u8)>()).to_string(), "(u8, u8)");
    }
}
