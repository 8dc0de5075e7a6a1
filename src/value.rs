use crate::error::TypeMismatch;
use crate::holder::{Erase, Holder, SyncHolder};
use std::any::type_name;
use std::fmt;
use std::mem;

/// Container for values of any clonable type, including `Rc` and `RefCell`
///
/// It is neither `Send` nor `Sync`. Use [`SyncAnyValue`] to move values
/// across threads.
pub type AnyValue = ErasedValue<dyn Holder>;

/// Container for values that are `Send + Sync`, and is itself `Send + Sync`
pub type SyncAnyValue = ErasedValue<dyn SyncHolder>;

/// A container that owns at most one value of any clonable type
///
/// `ErasedValue` hides the concrete type of what it stores, so values of
/// different types can live side by side in a `Vec`, a struct field or a
/// return value. The original value is recovered with an explicit cast
/// that only succeeds for the exact type that was stored.
///
/// Cloning clones the stored value; the copy never shares state with the
/// original. The holder `H` decides what can be stored and which auto
/// traits the container has; use it through [`AnyValue`] or
/// [`SyncAnyValue`].
///
/// # Examples
///
/// ```
/// use sovran_any::{AnyValue, TypeMismatch};
///
/// let mut value = AnyValue::new(42i32);
/// assert!(value.has_value());
/// assert_eq!(value.cast::<i32>()?, 42);
/// assert_eq!(value.cast::<i64>(), Err(TypeMismatch));
///
/// value.reset();
/// assert!(!value.has_value());
/// # Ok::<(), TypeMismatch>(())
/// ```
pub struct ErasedValue<H: ?Sized> {
    holder: Option<Box<H>>,
}

impl<H: ?Sized + Holder> ErasedValue<H> {
    /// Creates a container holding `value`
    ///
    /// Containers are valid values too, so they nest; an inner container is
    /// stored as is, not unwrapped.
    pub fn new<T>(value: T) -> Self
    where
        H: Erase<T>,
    {
        Self {
            holder: Some(H::erase(value)),
        }
    }

    /// Creates a container holding nothing
    pub fn empty() -> Self {
        Self { holder: None }
    }

    /// Returns true if the container holds a value
    pub fn has_value(&self) -> bool {
        self.holder.is_some()
    }

    /// Returns true if the container holds a value of exactly type `T`
    pub fn is<T: 'static>(&self) -> bool {
        self.holder
            .as_deref()
            .is_some_and(|h| h.as_any().is::<T>())
    }

    /// Drops the held value, if any
    pub fn reset(&mut self) {
        self.holder = None;
    }

    /// Replaces the held value with `value`, whatever type either one has
    pub fn set<T>(&mut self, value: T)
    where
        H: Erase<T>,
    {
        self.holder = Some(H::erase(value));
    }

    /// Moves the held value out into a new container, leaving this one empty
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Moves the value held by `source` into this container
    ///
    /// Whatever this container held before is dropped and `source` is left
    /// empty. If `source` is empty, so is this container afterwards.
    pub fn assign(&mut self, source: &mut Self) {
        self.holder = source.holder.take();
    }

    /// Exchanges the held values of two containers without copying them
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.holder, &mut other.holder);
    }

    /// Returns a copy of the held value if it is exactly a `T`
    ///
    /// The container keeps its value.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if the container is empty or holds another type.
    pub fn cast<T>(&self) -> Result<T, TypeMismatch>
    where
        T: Clone + 'static,
    {
        self.downcast_ref::<T>().cloned()
    }

    /// Borrows the held value if it is exactly a `T`
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if the container is empty or holds another type.
    pub fn downcast_ref<T: 'static>(&self) -> Result<&T, TypeMismatch> {
        self.holder
            .as_deref()
            .and_then(|h| h.as_any().downcast_ref::<T>())
            .ok_or_else(mismatch::<T>)
    }

    /// Mutably borrows the held value if it is exactly a `T`
    ///
    /// Changes made through the reference are only visible through this
    /// container, never through earlier clones of it.
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_any::{AnyValue, TypeMismatch};
    ///
    /// let mut names = AnyValue::new(vec!["alice".to_string()]);
    /// let snapshot = names.clone();
    ///
    /// names.downcast_mut::<Vec<String>>()?.push("bob".to_string());
    ///
    /// assert_eq!(names.downcast_ref::<Vec<String>>()?.len(), 2);
    /// assert_eq!(snapshot.downcast_ref::<Vec<String>>()?.len(), 1);
    /// # Ok::<(), TypeMismatch>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if the container is empty or holds another type.
    pub fn downcast_mut<T: 'static>(&mut self) -> Result<&mut T, TypeMismatch> {
        self.holder
            .as_deref_mut()
            .and_then(|h| h.as_any_mut().downcast_mut::<T>())
            .ok_or_else(mismatch::<T>)
    }

    /// Consumes the container and moves the held value out if it is exactly a `T`
    ///
    /// The value is dropped on a mismatch; check with [`is`](Self::is) first
    /// to keep it.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if the container is empty or holds another type.
    pub fn into_inner<T: 'static>(self) -> Result<T, TypeMismatch> {
        self.holder
            .ok_or_else(mismatch::<T>)?
            .into_any()
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| mismatch::<T>())
    }
}

fn mismatch<T>() -> TypeMismatch {
    tracing::trace!(requested = type_name::<T>(), "any cast failed");
    TypeMismatch
}

impl<H: ?Sized> Default for ErasedValue<H> {
    fn default() -> Self {
        Self { holder: None }
    }
}

impl<H: ?Sized + Holder> Clone for ErasedValue<H> {
    fn clone(&self) -> Self {
        Self {
            holder: self.holder.as_deref().map(dyn_clone::clone_box),
        }
    }
}

impl<H: ?Sized> fmt::Debug for ErasedValue<H> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AnyValue")
            .field("has_value", &self.holder.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::panic::{self, AssertUnwindSafe};
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    struct Config {
        name: String,
        retries: u8,
    }

    #[test]
    fn test_empty_and_default() {
        assert!(!AnyValue::empty().has_value());
        let value: AnyValue = Default::default();
        assert!(!value.has_value());
        assert!(!SyncAnyValue::default().has_value());
        assert!(!AnyValue::empty().is::<()>());
    }

    #[test]
    fn test_new_and_cast() -> Result<(), TypeMismatch> {
        let value = AnyValue::new(Config {
            name: "primary".to_string(),
            retries: 3,
        });

        assert!(value.has_value());
        assert!(value.is::<Config>());

        let config = value.cast::<Config>()?;
        assert_eq!(config.name, "primary");
        assert_eq!(config.retries, 3);

        // Still there after the cast
        assert_eq!(value.cast::<Config>()?, config);
        Ok(())
    }

    #[test]
    fn test_related_types_do_not_match() {
        let value = AnyValue::new(1u8);

        assert_eq!(value.cast::<u16>(), Err(TypeMismatch));
        assert_eq!(value.cast::<i8>(), Err(TypeMismatch));
        assert_eq!(value.cast::<u32>(), Err(TypeMismatch));

        let text = AnyValue::new("static str");
        assert_eq!(text.cast::<String>(), Err(TypeMismatch));
        assert_eq!(text.cast::<&'static str>(), Ok("static str"));
    }

    #[test]
    fn test_clone_from_replaces_value() -> Result<(), TypeMismatch> {
        let source = AnyValue::new(10u64);
        let mut target = AnyValue::new("old".to_string());

        target.clone_from(&source);
        assert_eq!(target.cast::<u64>()?, 10);
        assert!(target.downcast_ref::<String>().is_err());

        target.clone_from(&AnyValue::empty());
        assert!(!target.has_value());
        Ok(())
    }

    #[test]
    fn test_take_and_assign() -> Result<(), TypeMismatch> {
        let mut first = AnyValue::new(5i32);
        let second = first.take();

        assert!(!first.has_value());
        assert_eq!(second.cast::<i32>()?, 5);

        let mut source = AnyValue::new(String::from("moved"));
        let mut target = AnyValue::new(0.5f32);
        target.assign(&mut source);

        assert!(!source.has_value());
        assert_eq!(target.cast::<String>()?, "moved");

        target.assign(&mut source);
        assert!(!target.has_value());
        Ok(())
    }

    #[test]
    fn test_set_changes_type() -> Result<(), TypeMismatch> {
        let mut value = AnyValue::empty();
        value.set(1i32);
        assert_eq!(value.cast::<i32>()?, 1);

        value.set("two".to_string());
        assert!(!value.is::<i32>());
        assert_eq!(value.cast::<String>()?, "two");
        Ok(())
    }

    #[test]
    fn test_into_inner() {
        let value = AnyValue::new(vec![1u8, 2, 3]);
        assert_eq!(value.clone().into_inner::<Vec<i8>>(), Err(TypeMismatch));
        assert_eq!(value.into_inner::<Vec<u8>>(), Ok(vec![1, 2, 3]));
        assert_eq!(AnyValue::empty().into_inner::<()>(), Err(TypeMismatch));
    }

    #[test]
    fn test_downcast_mut_on_empty() {
        let mut value = AnyValue::empty();
        assert_eq!(value.downcast_mut::<i32>(), Err(TypeMismatch));
    }

    #[test]
    fn test_debug_output() {
        assert_eq!(
            format!("{:?}", AnyValue::new(1)),
            "AnyValue { has_value: true, .. }"
        );
        assert_eq!(
            format!("{:?}", AnyValue::empty()),
            "AnyValue { has_value: false, .. }"
        );
    }

    #[derive(Debug)]
    struct FailingClone;

    impl Clone for FailingClone {
        fn clone(&self) -> Self {
            panic!("clone failed");
        }
    }

    #[test]
    fn test_failed_clone_leaves_target_unchanged() {
        let source = AnyValue::new(FailingClone);
        let mut target = AnyValue::new(5i32);

        let result = panic::catch_unwind(AssertUnwindSafe(|| target.clone_from(&source)));

        let payload = result.unwrap_err();
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"clone failed"));
        assert_eq!(target.cast::<i32>(), Ok(5));
        assert!(source.is::<FailingClone>());
    }

    #[test]
    fn test_non_thread_safe_values() -> Result<(), TypeMismatch> {
        let counter = Rc::new(RefCell::new(0));
        let mut value = AnyValue::new(Rc::clone(&counter));
        let copy = value.clone();

        *value.downcast_ref::<Rc<RefCell<i32>>>()?.borrow_mut() += 1;

        // Both clones share the Rc payload, as cloning an Rc does
        assert_eq!(*copy.downcast_ref::<Rc<RefCell<i32>>>()?.borrow(), 1);
        assert_eq!(Rc::strong_count(&counter), 3);

        value.reset();
        assert_eq!(Rc::strong_count(&counter), 2);
        Ok(())
    }

    #[test]
    fn test_sync_value_operations() -> Result<(), TypeMismatch> {
        let mut value = SyncAnyValue::new(String::from("sync"));
        let copy = value.clone();

        value.set(3u8);
        assert_eq!(value.cast::<u8>()?, 3);
        assert_eq!(copy.cast::<String>()?, "sync");

        let moved = value.take();
        assert!(!value.has_value());
        assert_eq!(moved.into_inner::<u8>(), Ok(3));
        Ok(())
    }
}
