//! Login form state, validation, and the login command.
//!
//! `POST /login` exchanges credentials for a bearer token; on success the
//! command publishes an authenticated `SessionState` and the app shell
//! routes to the users page.

use std::any::Any;

use tablero_states::{
    Command, CommandSnapshot, Compute, LatestOnlyUpdater, State, assign_impl, state_assign_impl,
};
use validator::Validate;

use crate::config::AppConfig;
use crate::error::{ApiFailure, FieldErrors, field_errors_from};
use crate::session::SessionState;
use crate::users::api;
use crate::users::types::LoginRequest;

/// Login form buffers. Mutated by the login page, read by `LoginCommand`
/// through its snapshot.
#[derive(Debug, Clone, Default, Validate)]
pub struct LoginFormState {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub show_password: bool,
}

impl LoginFormState {
    pub fn validate_fields(&self) -> Result<(), FieldErrors> {
        self.validate().map_err(|e| field_errors_from(&e))
    }
}

impl State for LoginFormState {
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

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoginOutcome {
    #[default]
    Idle,
    Submitting,
    LoggedIn,
    Failed {
        errors: FieldErrors,
        message: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct LoginCompute {
    pub outcome: LoginOutcome,
}

impl LoginCompute {
    pub fn is_submitting(&self) -> bool {
        matches!(self.outcome, LoginOutcome::Submitting)
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        match &self.outcome {
            LoginOutcome::Failed { errors, .. } => errors.get(field).map(|s| s.as_str()),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match &self.outcome {
            LoginOutcome::Failed { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    pub fn acknowledge(&mut self) {
        self.outcome = LoginOutcome::Idle;
    }
}

impl State for LoginCompute {
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

impl Compute for LoginCompute {}

/// Validate the credentials client-side, then exchange them for a token.
#[derive(Debug, Default)]
pub struct LoginCommand;

impl Command for LoginCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: tokio_util::sync::CancellationToken,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>> {
        let form = snap.state::<LoginFormState>().clone();
        let config = snap.state::<AppConfig>().clone();

        Box::pin(async move {
            if let Err(errors) = form.validate_fields() {
                updater.set(LoginCompute {
                    outcome: LoginOutcome::Failed {
                        errors,
                        message: String::new(),
                    },
                });
                return;
            }

            updater.set(LoginCompute {
                outcome: LoginOutcome::Submitting,
            });

            let body = LoginRequest {
                username: form.username.clone(),
                password: form.password.clone(),
            };

            match api::login(config.api_url().as_str(), &body).await {
                Ok(response) => {
                    updater.set(SessionState::authenticated(response.token));
                    updater.set(LoginCompute {
                        outcome: LoginOutcome::LoggedIn,
                    });
                }
                Err(failure) => {
                    log::warn!("login failed: {failure}");
                    let message = match &failure {
                        // A 401 here is just wrong credentials, not an
                        // expired session.
                        ApiFailure::Auth => "Invalid username or password".to_string(),
                        other => other.user_message(),
                    };
                    updater.set(LoginCompute {
                        outcome: LoginOutcome::Failed {
                            errors: FieldErrors::new(),
                            message,
                        },
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
    fn empty_username_is_rejected() {
        let form = LoginFormState {
            username: String::new(),
            password: "secret1".to_string(),
            show_password: false,
        };
        let errors = form.validate_fields().unwrap_err();
        assert_eq!(
            errors.get("username").map(|s| s.as_str()),
            Some("Username is required")
        );
    }

    #[test]
    fn short_password_is_rejected() {
        let form = LoginFormState {
            username: "admin".to_string(),
            password: "12345".to_string(),
            show_password: false,
        };
        let errors = form.validate_fields().unwrap_err();
        assert_eq!(
            errors.get("password").map(|s| s.as_str()),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn valid_credentials_pass_validation() {
        let form = LoginFormState {
            username: "admin".to_string(),
            password: "123456".to_string(),
            show_password: false,
        };
        assert!(form.validate_fields().is_ok());
    }
}
