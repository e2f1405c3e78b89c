use std::any::Any;

use crate::State;

/// A compute-shaped cache stored alongside plain states.
///
/// Computes hold the latest status/result of some asynchronous work. The UI
/// reads them via `StateCtx::cached::<T>()`; commands update them via
/// [`crate::Updater::set`]. Anything that performs IO belongs in a
/// [`crate::Command`], which is dispatched explicitly and never implicitly.
pub trait Compute: State {}

/// Shared implementation for `assign_box` on compute-shaped caches.
pub fn assign_impl<T: Compute + Sized>(dst: &mut T, new_self: Box<dyn Any + Send>) {
    crate::state_assign_impl(dst, new_self);
}
