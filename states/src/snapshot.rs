use std::any::{Any, TypeId, type_name};
use std::collections::BTreeMap;

use crate::{Compute, State};

#[derive(Default)]
pub struct StateSnapshot {
    inner: BTreeMap<TypeId, Box<dyn Any + Send>>,
}

impl StateSnapshot {
    pub fn new() -> Self {
        Self {
            inner: BTreeMap::new(),
        }
    }

    pub fn insert_cloned(&mut self, id: TypeId, value: Box<dyn Any + Send>) {
        self.inner.insert(id, value);
    }

    pub fn get<T: State>(&self) -> Option<&T> {
        self.inner
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
    }
}

#[derive(Default)]
pub struct ComputeSnapshot {
    inner: BTreeMap<TypeId, Box<dyn Any + Send>>,
}

impl ComputeSnapshot {
    pub fn new() -> Self {
        Self {
            inner: BTreeMap::new(),
        }
    }

    pub fn insert_cloned(&mut self, id: TypeId, value: Box<dyn Any + Send>) {
        self.inner.insert(id, value);
    }

    pub fn get<T: Compute>(&self) -> Option<&T> {
        self.inner
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
    }
}

/// Read-only view of the context handed to a [`crate::Command`].
///
/// Snapshots are taken at dispatch time, so a command sees the states as they
/// were when the user triggered it, independent of later frames.
#[derive(Default)]
pub struct CommandSnapshot {
    states: StateSnapshot,
    computes: ComputeSnapshot,
}

impl CommandSnapshot {
    pub fn new(states: StateSnapshot, computes: ComputeSnapshot) -> Self {
        Self { states, computes }
    }

    /// # Panics
    /// Panics when the state was never registered or does not snapshot
    /// itself; both are wiring bugs, not runtime conditions.
    pub fn state<T: State>(&self) -> &T {
        self.states
            .get::<T>()
            .unwrap_or_else(|| panic!("state snapshot for {} is missing", type_name::<T>()))
    }

    /// # Panics
    /// Same contract as [`CommandSnapshot::state`].
    pub fn compute<T: Compute>(&self) -> &T {
        self.computes
            .get::<T>()
            .unwrap_or_else(|| panic!("compute snapshot for {} is missing", type_name::<T>()))
    }
}
