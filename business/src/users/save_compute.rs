//! Create/edit submission: input state, outcome cache, and the command.

use std::any::Any;

use tablero_states::{
    Command, CommandSnapshot, Compute, LatestOnlyUpdater, State, Time, assign_impl,
    state_assign_impl,
};

use crate::config::AppConfig;
use crate::error::{ActionState, ApiFailure};
use crate::notify::NotificationState;
use crate::session::SessionState;
use crate::users::api;
use crate::users::form::{FormMode, UserFormValues, validate_form};

/// What the dialog is submitting. The UI fills this in, then dispatches
/// `SaveUserCommand`.
#[derive(Debug, Clone, Default)]
pub struct SaveUserInput {
    pub mode: FormMode,
    pub values: UserFormValues,
}

impl State for SaveUserInput {
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

/// Submission state machine: Idle -> Submitting -> Saved | Failed.
///
/// `Saved` is acknowledged by the orchestrator (close dialog, refetch, back
/// to Idle). `Failed` keeps the attempted values so the dialog re-renders
/// them with inline errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SaveOutcome {
    #[default]
    Idle,
    Submitting,
    Saved,
    Failed(ActionState<UserFormValues>),
}

#[derive(Debug, Clone, Default)]
pub struct SaveUserCompute {
    pub outcome: SaveOutcome,
}

impl SaveUserCompute {
    pub fn is_submitting(&self) -> bool {
        matches!(self.outcome, SaveOutcome::Submitting)
    }

    pub fn is_saved(&self) -> bool {
        matches!(self.outcome, SaveOutcome::Saved)
    }

    pub fn failure(&self) -> Option<&ActionState<UserFormValues>> {
        match &self.outcome {
            SaveOutcome::Failed(action) => Some(action),
            _ => None,
        }
    }

    /// Reset after the orchestrator has reacted to a terminal outcome.
    pub fn acknowledge(&mut self) {
        self.outcome = SaveOutcome::Idle;
    }
}

impl State for SaveUserCompute {
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

impl Compute for SaveUserCompute {}

/// Submit the form: validate client-side, then `POST /users` (create) or
/// `PUT /users/{id}` (edit). A validation failure never reaches the wire.
#[derive(Debug, Default)]
pub struct SaveUserCommand;

impl Command for SaveUserCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: tokio_util::sync::CancellationToken,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>> {
        let input = snap.state::<SaveUserInput>().clone();
        let config = snap.state::<AppConfig>().clone();
        let session = snap.state::<SessionState>().clone();
        let now = *snap.state::<Time>().as_ref();

        Box::pin(async move {
            if let Err(errors) = validate_form(input.mode, &input.values) {
                updater.set(SaveUserCompute {
                    outcome: SaveOutcome::Failed(ActionState::from_failure(
                        ApiFailure::Validation(errors),
                        input.values,
                    )),
                });
                return;
            }

            updater.set(SaveUserCompute {
                outcome: SaveOutcome::Submitting,
            });

            let base = config.api_url();
            let body = input.values.to_request(input.mode);
            let result = match input.mode {
                FormMode::Create => api::create_user(base.as_str(), &session, &body).await,
                FormMode::Edit(id) => api::update_user(base.as_str(), &session, id, &body).await,
            };

            match result {
                Ok(_) => {
                    let message = match input.mode {
                        FormMode::Create => "User created",
                        FormMode::Edit(_) => "User updated",
                    };
                    updater.set(NotificationState::success(message, now));
                    updater.set(SaveUserCompute {
                        outcome: SaveOutcome::Saved,
                    });
                }
                Err(failure) => {
                    log::warn!("save user failed: {failure}");
                    if failure.is_auth() {
                        updater.set(session.expire());
                    }
                    updater.set(SaveUserCompute {
                        outcome: SaveOutcome::Failed(ActionState::from_failure(
                            failure,
                            input.values,
                        )),
                    });
                }
            }
        })
    }
}
