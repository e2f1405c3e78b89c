use std::any::Any;

use tablero_states::{State, state_assign_impl};

/// Process-wide session context.
///
/// Commands read the token from their snapshot; any 401 publishes a replacement
/// with `expired = true`, which the app shell polls each frame to force logout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub token: Option<String>,
    pub expired: bool,
}

impl SessionState {
    pub fn authenticated(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            expired: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && !self.expired
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The replacement value a command publishes when it sees a 401.
    pub fn expire(&self) -> Self {
        Self {
            token: self.token.clone(),
            expired: true,
        }
    }

    pub fn logout(&mut self) {
        self.token = None;
        self.expired = false;
    }
}

impl State for SessionState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
