use proc_macro2::{Ident, Span};
use syn::Result;

use crate::search_replace::Substitution;

/// Name of the enum variant / path segment standing for "any fixed kind".
pub const PLACEHOLDER: &str = "Kind";
/// Name of the type standing for the element type of the current kind.
pub const ELEM: &str = "Elem";
/// Name of the expression standing for the zero value of the current kind.
pub const ZERO: &str = "ZERO";

/// One entry of the fixed kind table.
pub struct Kind {
    pub variant: &'static str,
    pub ty: &'static str,
    pub zero: &'static str,
}

/// Every element kind that gets a compiled fast path.
///
/// The order is the declaration order of the generated enum variants.
pub const KINDS: &[Kind] = &[
    Kind { variant: "Bool", ty: "bool", zero: "false" },
    Kind { variant: "Isize", ty: "isize", zero: "0" },
    Kind { variant: "I8", ty: "i8", zero: "0" },
    Kind { variant: "I16", ty: "i16", zero: "0" },
    Kind { variant: "I32", ty: "i32", zero: "0" },
    Kind { variant: "I64", ty: "i64", zero: "0" },
    Kind { variant: "Usize", ty: "usize", zero: "0" },
    Kind { variant: "U8", ty: "u8", zero: "0" },
    Kind { variant: "U16", ty: "u16", zero: "0" },
    Kind { variant: "U32", ty: "u32", zero: "0" },
    Kind { variant: "U64", ty: "u64", zero: "0" },
    Kind { variant: "F32", ty: "f32", zero: "0.0" },
    Kind { variant: "F64", ty: "f64", zero: "0.0" },
    Kind {
        variant: "Complex32",
        ty: "::num_complex::Complex32",
        zero: "::num_complex::Complex32::new(0.0, 0.0)",
    },
    Kind {
        variant: "Complex64",
        ty: "::num_complex::Complex64",
        zero: "::num_complex::Complex64::new(0.0, 0.0)",
    },
    Kind {
        variant: "String",
        ty: "::std::string::String",
        zero: "::std::string::String::new()",
    },
    Kind {
        variant: "RawPointer",
        ty: "*mut ::std::ffi::c_void",
        zero: "::std::ptr::null_mut()",
    },
];

impl Kind {
    pub fn substitution(&self) -> Result<Substitution> {
        Ok(Substitution {
            variant: Ident::new(self.variant, Span::call_site()),
            ty: syn::parse_str(self.ty)?,
            zero: syn::parse_str(self.zero)?,
        })
    }
}

pub fn substitutions() -> Result<Vec<Substitution>> {
    KINDS.iter().map(Kind::substitution).collect()
}
