use std::any::Any;

use chrono::{DateTime, Utc};

use crate::{State, state_assign_impl};

/// The frame clock.
///
/// The app shell advances it once per frame; everything time-based (search
/// debounce, toast expiry) reads it instead of calling `Utc::now()` directly,
/// so tests can pin or rewind the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time(DateTime<Utc>);

impl Default for Time {
    fn default() -> Self {
        Self(Utc::now())
    }
}

impl Time {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    pub fn tick(&mut self) {
        self.0 = Utc::now();
    }

    pub fn set(&mut self, instant: DateTime<Utc>) {
        self.0 = instant;
    }
}

impl AsRef<DateTime<Utc>> for Time {
    fn as_ref(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl State for Time {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(*self))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
