//! Row-level actions (delete, toggle status) with an explicit confirmation
//! step.
//!
//! Confirmation is a state in the machine, not a blocking prompt: a row
//! button moves the machine to `PendingConfirm`, the modal either confirms
//! (-> `InFlight`, command dispatched) or declines (-> `Idle`, silently).

use std::any::Any;

use tablero_states::{
    Command, CommandSnapshot, Compute, LatestOnlyUpdater, State, Time, assign_impl,
    state_assign_impl,
};

use crate::config::AppConfig;
use crate::notify::NotificationState;
use crate::session::SessionState;
use crate::users::api;
use crate::users::types::{ToggleStatusRequest, UserStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Delete { id: i64 },
    ToggleStatus { id: i64, current: UserStatus },
}

impl RowAction {
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Delete { .. } => "Are you sure you want to delete this user?",
            Self::ToggleStatus { .. } => "Are you sure you want to change this user's status?",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowActionPhase {
    #[default]
    Idle,
    PendingConfirm(RowAction),
    InFlight(RowAction),
}

/// The confirmation state machine. Mutated by the UI; read by the commands
/// through their snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowActionState {
    phase: RowActionPhase,
}

impl RowActionState {
    /// A row button was clicked; ask for confirmation.
    pub fn request(&mut self, action: RowAction) {
        self.phase = RowActionPhase::PendingConfirm(action);
    }

    pub fn pending(&self) -> Option<RowAction> {
        match self.phase {
            RowActionPhase::PendingConfirm(action) => Some(action),
            _ => None,
        }
    }

    pub fn in_flight(&self) -> Option<RowAction> {
        match self.phase {
            RowActionPhase::InFlight(action) => Some(action),
            _ => None,
        }
    }

    /// The user confirmed. Returns the action so the orchestrator can
    /// dispatch the matching command.
    pub fn confirm(&mut self) -> Option<RowAction> {
        match self.phase {
            RowActionPhase::PendingConfirm(action) => {
                self.phase = RowActionPhase::InFlight(action);
                Some(action)
            }
            _ => None,
        }
    }

    /// The user declined. Silent no-op: nothing is dispatched.
    pub fn decline(&mut self) {
        if matches!(self.phase, RowActionPhase::PendingConfirm(_)) {
            self.phase = RowActionPhase::Idle;
        }
    }

    pub fn reset(&mut self) {
        self.phase = RowActionPhase::Idle;
    }
}

impl State for RowActionState {
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

/// Terminal outcome of the last confirmed row action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RowActionOutcome {
    #[default]
    Idle,
    Done,
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct RowActionCompute {
    pub outcome: RowActionOutcome,
}

impl RowActionCompute {
    pub fn is_done(&self) -> bool {
        matches!(self.outcome, RowActionOutcome::Done)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, RowActionOutcome::Failed(_))
    }

    pub fn acknowledge(&mut self) {
        self.outcome = RowActionOutcome::Idle;
    }
}

impl State for RowActionCompute {
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
        assign_impl(self, new_self);
    }
}

impl Compute for RowActionCompute {}

/// DELETE the user the confirmed action points at.
#[derive(Debug, Default)]
pub struct DeleteUserCommand;

impl Command for DeleteUserCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: tokio_util::sync::CancellationToken,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>> {
        let action = snap.state::<RowActionState>().in_flight();
        let config = snap.state::<AppConfig>().clone();
        let session = snap.state::<SessionState>().clone();
        let now = *snap.state::<Time>().as_ref();

        Box::pin(async move {
            let Some(RowAction::Delete { id }) = action else {
                log::error!("DeleteUserCommand dispatched without a confirmed delete action");
                return;
            };

            match api::delete_user(config.api_url().as_str(), &session, id).await {
                Ok(()) => {
                    updater.set(NotificationState::success("User deleted", now));
                    updater.set(RowActionCompute {
                        outcome: RowActionOutcome::Done,
                    });
                }
                Err(failure) => {
                    log::warn!("delete user {id} failed: {failure}");
                    if failure.is_auth() {
                        updater.set(session.expire());
                    }
                    let message = failure.user_message();
                    updater.set(NotificationState::error(&message, now));
                    updater.set(RowActionCompute {
                        outcome: RowActionOutcome::Failed(message),
                    });
                }
            }
        })
    }
}

/// PATCH the user's status to the complement of its current value.
#[derive(Debug, Default)]
pub struct ToggleStatusCommand;

impl Command for ToggleStatusCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: tokio_util::sync::CancellationToken,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>> {
        let action = snap.state::<RowActionState>().in_flight();
        let config = snap.state::<AppConfig>().clone();
        let session = snap.state::<SessionState>().clone();
        let now = *snap.state::<Time>().as_ref();

        Box::pin(async move {
            let Some(RowAction::ToggleStatus { id, current }) = action else {
                log::error!("ToggleStatusCommand dispatched without a confirmed toggle action");
                return;
            };

            let body = ToggleStatusRequest {
                status: current.toggled(),
            };

            match api::toggle_status(config.api_url().as_str(), &session, id, &body).await {
                Ok(_) => {
                    updater.set(NotificationState::success("User status updated", now));
                    updater.set(RowActionCompute {
                        outcome: RowActionOutcome::Done,
                    });
                }
                Err(failure) => {
                    log::warn!("toggle status for user {id} failed: {failure}");
                    if failure.is_auth() {
                        updater.set(session.expire());
                    }
                    let message = failure.user_message();
                    updater.set(NotificationState::error(&message, now));
                    updater.set(RowActionCompute {
                        outcome: RowActionOutcome::Failed(message),
                    });
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_moves_to_in_flight() {
        let mut state = RowActionState::default();
        state.request(RowAction::Delete { id: 7 });
        assert_eq!(state.pending(), Some(RowAction::Delete { id: 7 }));

        let action = state.confirm();
        assert_eq!(action, Some(RowAction::Delete { id: 7 }));
        assert_eq!(state.in_flight(), Some(RowAction::Delete { id: 7 }));
        assert_eq!(state.pending(), None);
    }

    #[test]
    fn decline_is_a_silent_no_op() {
        let mut state = RowActionState::default();
        state.request(RowAction::ToggleStatus {
            id: 3,
            current: UserStatus::Active,
        });

        state.decline();
        assert_eq!(state, RowActionState::default());
        assert_eq!(state.confirm(), None);
    }

    #[test]
    fn confirm_without_pending_yields_nothing() {
        let mut state = RowActionState::default();
        assert_eq!(state.confirm(), None);
        assert_eq!(state.in_flight(), None);
    }
}
