use std::any::Any;

/// A piece of application state stored in [`crate::StateCtx`].
///
/// States are plain data. The UI reads them through `StateCtx::state_mut` /
/// `StateCtx::cached` and commands receive cloned snapshots of them, so a
/// state that wants to be visible to commands must implement [`State::snapshot`]
/// (usually by cloning itself).
pub trait State: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Clone this state for a command snapshot.
    ///
    /// Returning `None` (the default) keeps the state out of command
    /// snapshots; UI-only states such as text-edit buffers can skip the clone.
    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }

    /// Replace `self` with a value delivered through an [`crate::Updater`].
    ///
    /// Implementations should call [`state_assign_impl`].
    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Shared implementation for [`State::assign_box`].
///
/// A type mismatch means an updater published under the wrong `TypeId`; the
/// value is dropped and logged rather than poisoning the context.
pub fn state_assign_impl<T: State + Sized>(dst: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *dst = *value,
        Err(_) => log::error!(
            "state assign: dropped value of unexpected type for {}",
            std::any::type_name::<T>()
        ),
    }
}
