use std::fmt;

/// Returned when a cast asks for a type other than the one held
///
/// Casting an empty [`AnyValue`](crate::AnyValue) yields the same error,
/// whatever type was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypeMismatch;

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Type mismatch in any cast")
    }
}

impl std::error::Error for TypeMismatch {}
