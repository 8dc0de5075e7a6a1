use crate::error::TypeMismatch;
use crate::holder::Holder;
use crate::value::ErasedValue;

/// Recovers a copy of the value held by `value` if it is exactly a `T`
///
/// Matching is by type identity: a `u8` is not an `i32`, a `&str` is not a
/// `String`, and an empty container matches nothing. The container is left
/// as it was.
///
/// # Examples
///
/// ```
/// use sovran_any::{any_cast, AnyValue, TypeMismatch};
///
/// let value = AnyValue::new(42i32);
/// assert_eq!(any_cast::<i32>(&value), Ok(42));
/// assert_eq!(any_cast::<String>(&value), Err(TypeMismatch));
/// assert_eq!(any_cast::<i32>(&AnyValue::empty()), Err(TypeMismatch));
/// ```
///
/// # Errors
///
/// Returns `TypeMismatch` if the container is empty or holds another type.
pub fn any_cast<T>(value: &ErasedValue<impl ?Sized + Holder>) -> Result<T, TypeMismatch>
where
    T: Clone + 'static,
{
    value.cast::<T>()
}
