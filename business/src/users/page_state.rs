//! UI-facing state for the users page: dialog open/close, form input
//! buffers, password visibility.
//!
//! Lives in the business layer so widgets stay dumb: they read this state,
//! mutate it through its methods, and dispatch commands.

use std::any::Any;

use tablero_states::{State, state_assign_impl};

use crate::error::{ActionState, FieldErrors};
use crate::users::form::{FormMode, UserFormValues};
use crate::users::types::UserRecord;

#[derive(Debug, Clone, Default)]
pub struct UsersPageState {
    pub dialog_open: bool,
    pub mode: FormMode,
    pub form: UserFormValues,
    pub form_errors: FieldErrors,
    pub form_message: String,

    /// Local visibility toggles for the password fields.
    pub show_password: bool,
    pub show_confirm_password: bool,

    /// Set once the first fetch has been dispatched.
    pub initial_fetch_done: bool,
}

impl UsersPageState {
    pub fn open_create_dialog(&mut self) {
        self.dialog_open = true;
        self.mode = FormMode::Create;
        self.form = UserFormValues::default();
        self.clear_feedback();
    }

    pub fn open_edit_dialog(&mut self, record: &UserRecord) {
        self.dialog_open = true;
        self.mode = FormMode::Edit(record.id);
        self.form = UserFormValues::from_record(record);
        self.clear_feedback();
    }

    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
        self.mode = FormMode::Create;
        self.form = UserFormValues::default();
        self.clear_feedback();
    }

    /// Re-render the dialog with the attempted values and inline errors.
    pub fn apply_failure(&mut self, action: &ActionState<UserFormValues>) {
        if let Some(values) = &action.form_data {
            self.form = values.clone();
        }
        self.form_errors = action.errors.clone();
        self.form_message = action.message.clone();
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.form_errors.get(field).map(|s| s.as_str())
    }

    fn clear_feedback(&mut self) {
        self.form_errors.clear();
        self.form_message.clear();
        self.show_password = false;
        self.show_confirm_password = false;
    }
}

impl State for UsersPageState {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiFailure;
    use crate::users::types::UserStatus;

    fn record() -> UserRecord {
        UserRecord {
            id: 42,
            username: "alice".to_string(),
            status: UserStatus::Inactive,
        }
    }

    #[test]
    fn edit_dialog_prefills_from_record_with_blank_passwords() {
        let mut state = UsersPageState::default();
        state.open_edit_dialog(&record());

        assert!(state.dialog_open);
        assert_eq!(state.mode, FormMode::Edit(42));
        assert_eq!(state.form.username, "alice");
        assert_eq!(state.form.status, UserStatus::Inactive);
        assert!(state.form.password.is_empty());
        assert!(state.form.confirm_password.is_empty());
    }

    #[test]
    fn reopening_create_clears_previous_errors() {
        let mut state = UsersPageState::default();
        state.open_edit_dialog(&record());

        let mut errors = FieldErrors::new();
        errors.insert("username".to_string(), "already taken".to_string());
        state.apply_failure(&ActionState::from_failure(
            ApiFailure::Validation(errors),
            state.form.clone(),
        ));
        assert!(state.field_error("username").is_some());

        state.open_create_dialog();
        assert!(state.form_errors.is_empty());
        assert!(state.form_message.is_empty());
        assert_eq!(state.form, UserFormValues::default());
    }

    #[test]
    fn failure_repopulates_attempted_values() {
        let mut state = UsersPageState::default();
        state.open_create_dialog();

        let attempted = UserFormValues {
            username: "bob".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret2".to_string(),
            status: UserStatus::Active,
        };
        let mut errors = FieldErrors::new();
        errors.insert(
            "confirm_password".to_string(),
            "Passwords do not match".to_string(),
        );
        state.apply_failure(&ActionState::from_failure(
            ApiFailure::Validation(errors),
            attempted.clone(),
        ));

        assert_eq!(state.form, attempted);
        assert_eq!(
            state.field_error("confirm_password"),
            Some("Passwords do not match")
        );
    }
}
