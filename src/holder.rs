use dyn_clone::DynClone;
use std::any::Any;

/// Type-independent face of a stored value
///
/// Cloning a boxed holder goes through [`DynClone`], which copies the stored
/// value into a new allocation. Everything else type-specific is reached by
/// downcasting through the `as_any` hooks.
pub trait Holder: DynClone {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// A [`Holder`] whose value can be sent and shared across threads
pub trait SyncHolder: Holder + Send + Sync {}

/// Boxes a `T` up as the holder trait object `Self`
pub trait Erase<T> {
    fn erase(value: T) -> Box<Self>;
}

/// Holder bound to one concrete type `T`
#[derive(Clone)]
pub(crate) struct ValueHolder<T> {
    value: T,
}

impl<T: Clone + 'static> Holder for ValueHolder<T> {
    fn as_any(&self) -> &dyn Any {
        &self.value
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut self.value
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        Box::new(self.value)
    }
}

impl<T: Clone + Send + Sync + 'static> SyncHolder for ValueHolder<T> {}

impl<T: Clone + 'static> Erase<T> for dyn Holder {
    fn erase(value: T) -> Box<Self> {
        Box::new(ValueHolder { value })
    }
}

impl<T: Clone + Send + Sync + 'static> Erase<T> for dyn SyncHolder {
    fn erase(value: T) -> Box<Self> {
        Box::new(ValueHolder { value })
    }
}
