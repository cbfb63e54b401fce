//! Type-erased element support for kinds without a compiled fast path.

use std::any::{self, Any, TypeId};
use std::fmt;

/// Object-safe accessors of a parameterized element.
///
/// Implemented for every `Any + Clone + PartialEq + Debug` type.
pub trait DynElement: Any + fmt::Debug {
    fn clone_box(&self) -> Box<dyn DynElement>;
    fn dyn_eq(&self, other: &dyn DynElement) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn element_type_id(&self) -> TypeId;
    fn type_name(&self) -> &'static str;
}

impl<T> DynElement for T
where
    T: Any + Clone + PartialEq + fmt::Debug,
{
    fn clone_box(&self) -> Box<dyn DynElement> {
        Box::new(self.clone())
    }

    fn dyn_eq(&self, other: &dyn DynElement) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .map_or(false, |other| self == other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn element_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn type_name(&self) -> &'static str {
        any::type_name::<T>()
    }
}

/// A boxed parameterized element.
pub struct OpaqueValue(Box<dyn DynElement>);

impl OpaqueValue {
    pub fn new<T: DynElement>(value: T) -> Self {
        OpaqueValue(Box::new(value))
    }

    pub fn type_id(&self) -> TypeId {
        self.0.as_ref().element_type_id()
    }

    pub fn type_name(&self) -> &'static str {
        self.0.as_ref().type_name()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_ref().as_any().downcast_ref::<T>()
    }
}

impl Clone for OpaqueValue {
    fn clone(&self) -> Self {
        OpaqueValue(self.0.as_ref().clone_box())
    }
}

impl PartialEq for OpaqueValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_ref().dyn_eq(other.0.as_ref())
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.0.as_ref(), f)
    }
}

/// Runtime description of a parameterized kind, resolved once when an
/// opaque array is built.
#[derive(Clone, Copy)]
pub struct OpaqueKind {
    type_id: TypeId,
    type_name: &'static str,
    zero: fn() -> OpaqueValue,
}

fn default_value<T: DynElement + Default>() -> OpaqueValue {
    OpaqueValue::new(T::default())
}

impl OpaqueKind {
    pub fn of<T: DynElement + Default>() -> Self {
        OpaqueKind {
            type_id: TypeId::of::<T>(),
            type_name: any::type_name::<T>(),
            zero: default_value::<T>,
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn zero(&self) -> OpaqueValue {
        (self.zero)()
    }

    pub fn accepts(&self, value: &OpaqueValue) -> bool {
        value.type_id() == self.type_id
    }
}

impl fmt::Debug for OpaqueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueKind")
            .field("type_name", &self.type_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn clone_and_eq() {
        let a = OpaqueValue::new(Point { x: 1, y: 2 });
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(b.downcast_ref::<Point>(), Some(&Point { x: 1, y: 2 }));
        assert_ne!(a, OpaqueValue::new(Point { x: 2, y: 1 }));
        assert_ne!(a, OpaqueValue::new((1, 2)));
    }

    #[test]
    fn kind() {
        let kind = OpaqueKind::of::<Point>();
        assert_eq!(kind.type_id(), TypeId::of::<Point>());
        assert!(kind.accepts(&OpaqueValue::new(Point::default())));
        assert!(!kind.accepts(&OpaqueValue::new(0u8)));
        assert_eq!(kind.zero(), OpaqueValue::new(Point::default()));
        assert_eq!(format!("{:?}", kind.zero()), "Point { x: 0, y: 0 }");
    }
}
