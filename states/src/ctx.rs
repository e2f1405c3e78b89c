use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use flume::{Receiver, Sender};
use tokio_util::sync::CancellationToken;

use crate::updater::Update;
use crate::{
    Command, CommandSnapshot, Compute, ComputeSnapshot, Error, LatestOnlyUpdater, State,
    StateSnapshot, TaskHandle, TaskId, Updater,
};

enum Slot {
    State(Box<dyn State>),
    Compute(Box<dyn Compute>),
}

impl Slot {
    fn as_any(&self) -> &dyn std::any::Any {
        match self {
            Slot::State(state) => state.as_any(),
            Slot::Compute(compute) => compute.as_any(),
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        match self {
            Slot::State(state) => state.as_any_mut(),
            Slot::Compute(compute) => compute.as_any_mut(),
        }
    }

    fn snapshot(&self) -> Option<Box<dyn std::any::Any + Send>> {
        match self {
            Slot::State(state) => state.snapshot(),
            Slot::Compute(compute) => compute.snapshot(),
        }
    }

    fn assign_box(&mut self, new_self: Box<dyn std::any::Any + Send>) {
        match self {
            Slot::State(state) => state.assign_box(new_self),
            Slot::Compute(compute) => compute.assign_box(new_self),
        }
    }
}

/// Owner of all application state.
///
/// The UI reads and mutates states synchronously between frames; commands run
/// on the async runtime and feed results back through a flume channel, which
/// [`StateCtx::sync_computes`] drains at the top of every frame. Nothing else
/// mutates the storage, so there is no locking anywhere.
pub struct StateCtx {
    storage: HashMap<TypeId, Slot>,
    update_send: Sender<Update>,
    update_recv: Receiver<Update>,
    tasks: HashMap<TypeId, TaskHandle>,
    generations: HashMap<TypeId, Arc<AtomicU64>>,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (update_send, update_recv) = flume::unbounded();
        Self {
            storage: HashMap::new(),
            update_send,
            update_recv,
            tasks: HashMap::new(),
            generations: HashMap::new(),
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        self.storage
            .insert(TypeId::of::<T>(), Slot::State(Box::new(state)));
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        self.storage
            .insert(TypeId::of::<T>(), Slot::Compute(Box::new(compute)));
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.storage
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::state_not_found(TypeId::of::<T>(), type_name::<T>()))
    }

    /// # Panics
    /// Panics when `T` was never registered; that is a setup bug.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        self.storage
            .get_mut(&TypeId::of::<T>())
            .and_then(|slot| slot.as_any_mut().downcast_mut::<T>())
            .unwrap_or_else(|| panic!("state {} is not registered", type_name::<T>()))
    }

    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    pub fn try_cached<T: Compute>(&self) -> Result<&T, Error> {
        self.storage
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::compute_not_found(TypeId::of::<T>(), type_name::<T>()))
    }

    /// # Panics
    /// Panics when `T` was never recorded; that is a setup bug.
    pub fn cached<T: Compute>(&self) -> &T {
        self.try_cached::<T>()
            .unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn updater(&self) -> Updater {
        Updater::new(self.update_send.clone())
    }

    /// Clone every snapshot-capable state and compute for a command.
    pub fn command_snapshot(&self) -> CommandSnapshot {
        let mut states = StateSnapshot::new();
        let mut computes = ComputeSnapshot::new();
        for (type_id, slot) in &self.storage {
            let Some(cloned) = slot.snapshot() else {
                continue;
            };
            match slot {
                Slot::State(_) => states.insert_cloned(*type_id, cloned),
                Slot::Compute(_) => computes.insert_cloned(*type_id, cloned),
            }
        }
        CommandSnapshot::new(states, computes)
    }

    /// Bump the generation for `C` and build the write-half for its next run.
    ///
    /// Exposed so tests can drive `Command::run` directly and still get the
    /// latest-wins semantics of a real dispatch.
    pub fn latest_updater<C: Command>(&mut self) -> LatestOnlyUpdater {
        let (generation, latest) = self.next_generation(TypeId::of::<C>());
        LatestOnlyUpdater::new(self.updater(), generation, latest)
    }

    /// Dispatch a command: snapshot the states, cancel the previous in-flight
    /// task of the same type, and spawn the new one.
    pub fn dispatch<C: Command>(&mut self) {
        let snap = self.command_snapshot();
        let type_id = TypeId::of::<C>();

        if let Some(previous) = self.tasks.get(&type_id) {
            previous.cancel();
        }

        let (generation, latest) = self.next_generation(type_id);
        let updater = LatestOnlyUpdater::new(self.updater(), generation, latest);
        let token = CancellationToken::new();
        self.tasks
            .insert(type_id, TaskHandle::new(TaskId::new(type_id, generation), token.clone()));

        spawn(C::default().run(snap, updater, token));
    }

    /// Apply every update published by commands and computes since the last
    /// call. Call once per frame, before rendering.
    pub fn sync_computes(&mut self) {
        while let Ok((type_id, boxed)) = self.update_recv.try_recv() {
            match self.storage.get_mut(&type_id) {
                Some(slot) => slot.assign_box(boxed),
                None => log::warn!("dropping update for unregistered state {type_id:?}"),
            }
        }
    }

    fn next_generation(&mut self, type_id: TypeId) -> (u64, Arc<AtomicU64>) {
        let latest = self.generations.entry(type_id).or_default().clone();
        let generation = latest.fetch_add(1, Ordering::SeqCst) + 1;
        (generation, latest)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn(fut: Pin<Box<dyn Future<Output = ()> + Send>>) {
    use std::sync::OnceLock;

    // Prefer an ambient runtime (integration tests run under #[tokio::test]);
    // otherwise lazily start a shared background runtime that lives for the
    // rest of the process, so it is never dropped from async context.
    static RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

    if let Ok(handle) = tokio::runtime::Handle::try_current() {
        handle.spawn(fut);
        return;
    }

    RUNTIME
        .get_or_init(|| {
            tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .expect("failed to build command runtime")
        })
        .spawn(fut);
}

#[cfg(target_arch = "wasm32")]
fn spawn(fut: Pin<Box<dyn Future<Output = ()> + Send>>) {
    wasm_bindgen_futures::spawn_local(fut);
}
