use std::any::Any;
use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::{CommandSnapshot, LatestOnlyUpdater};

/// A manual-only asynchronous side effect.
///
/// Commands are the only place network IO is allowed. They are dispatched
/// explicitly via `StateCtx::dispatch::<C>()`, receive a snapshot of the
/// states taken at dispatch time, and report results by publishing whole
/// replacement values through the updater. Dispatching a command cancels the
/// previous in-flight task of the same type (cooperatively, through the
/// token) and supersedes its generation.
pub trait Command: Any + Default {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> Pin<Box<dyn Future<Output = ()> + Send>>;
}
