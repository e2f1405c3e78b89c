//! Frame-synchronous state management for the app.
//!
//! States are plain values owned by a [`StateCtx`]; the UI reads and mutates
//! them between frames. Computes are states whose values are produced
//! asynchronously by [`Command`]s and applied back on the UI thread by
//! [`StateCtx::sync_computes`]. The [`Time`] state is the injectable clock.

mod command;
mod compute;
mod ctx;
mod error;
mod snapshot;
mod state;
mod task;
mod time;
mod updater;

pub use command::Command;
pub use compute::{Compute, assign_impl};
pub use ctx::StateCtx;
pub use error::Error;
pub use snapshot::{CommandSnapshot, ComputeSnapshot, StateSnapshot};
pub use state::{State, state_assign_impl};
pub use task::{TaskHandle, TaskId};
pub use time::Time;
pub use updater::{LatestOnlyUpdater, Updater};
