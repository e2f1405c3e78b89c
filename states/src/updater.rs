use std::any::{Any, TypeId};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use flume::Sender;

use crate::State;

pub(crate) type Update = (TypeId, Box<dyn Any + Send>);

/// Write-half handed to commands and computes.
///
/// `set` publishes a whole replacement value for a registered state or
/// compute; `StateCtx::sync_computes()` applies it on the next frame.
#[derive(Clone)]
pub struct Updater {
    send: Sender<Update>,
}

impl Updater {
    pub(crate) fn new(send: Sender<Update>) -> Self {
        Self { send }
    }

    pub fn set<T: State + Send>(&self, value: T) {
        // The receiver only disappears when the whole ctx is torn down.
        let _ = self.send.send((TypeId::of::<T>(), Box::new(value)));
    }
}

/// An [`Updater`] bound to one dispatch generation of a command type.
///
/// Every dispatch of the same command type bumps a shared generation counter;
/// `set` silently drops updates from any dispatch that is no longer the
/// latest. This is what prevents a slow, superseded list fetch from
/// overwriting the response of a newer one.
#[derive(Clone)]
pub struct LatestOnlyUpdater {
    inner: Updater,
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl LatestOnlyUpdater {
    pub(crate) fn new(inner: Updater, generation: u64, latest: Arc<AtomicU64>) -> Self {
        Self {
            inner,
            generation,
            latest,
        }
    }

    /// Whether this dispatch is still the most recent one for its command.
    pub fn is_latest(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }

    pub fn set<T: State + Send>(&self, value: T) {
        if self.is_latest() {
            self.inner.set(value);
        } else {
            log::debug!(
                "discarding stale update for {} (generation {})",
                std::any::type_name::<T>(),
                self.generation
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Flag(bool);

    impl State for Flag {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
            crate::state_assign_impl(self, new_self);
        }
    }

    #[test]
    fn latest_only_drops_superseded_generation() {
        let (send, recv) = flume::unbounded();
        let latest = Arc::new(AtomicU64::new(2));

        let stale = LatestOnlyUpdater::new(Updater::new(send.clone()), 1, latest.clone());
        let current = LatestOnlyUpdater::new(Updater::new(send), 2, latest);

        stale.set(Flag(true));
        assert!(recv.is_empty(), "stale generation must be discarded");

        current.set(Flag(true));
        assert_eq!(recv.len(), 1);
    }
}
