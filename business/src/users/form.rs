//! Create/edit form values and client-side validation.
//!
//! Validation runs synchronously before any network call; a form that fails
//! here never reaches the wire. One message per field, first failing rule
//! wins.

use validator::Validate;

use crate::error::FieldErrors;
use crate::users::types::{SaveUserRequest, UserRecord, UserStatus};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Which endpoint a submission targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit(i64),
}

impl FormMode {
    pub fn is_edit(self) -> bool {
        matches!(self, Self::Edit(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct UserFormValues {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub status: UserStatus,
}

impl UserFormValues {
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            username: record.username.clone(),
            password: String::new(),
            confirm_password: String::new(),
            status: record.status,
        }
    }

    /// Whether this submission intends to set a password. Always true for
    /// create; in edit mode, only when one of the password fields was touched.
    fn sets_password(&self, mode: FormMode) -> bool {
        !mode.is_edit() || !self.password.is_empty() || !self.confirm_password.is_empty()
    }

    /// The request body for `POST /users` / `PUT /users/{id}`. In edit mode a
    /// blank password is omitted so the stored credential stays untouched.
    pub fn to_request(&self, mode: FormMode) -> SaveUserRequest {
        SaveUserRequest {
            username: self.username.clone(),
            password: if self.sets_password(mode) {
                Some(self.password.clone())
            } else {
                None
            },
            status: self.status,
        }
    }
}

/// Validate the form for the given mode. `Err` carries one message per
/// failing field.
pub fn validate_form(mode: FormMode, values: &UserFormValues) -> Result<(), FieldErrors> {
    let mut errors = match values.validate() {
        Ok(()) => FieldErrors::new(),
        Err(derive_errors) => crate::error::field_errors_from(&derive_errors),
    };

    if values.sets_password(mode) {
        if values.password.is_empty() {
            errors
                .entry("password".to_string())
                .or_insert_with(|| "Password is required".to_string());
        } else if values.password.chars().count() < MIN_PASSWORD_LEN {
            errors.entry("password".to_string()).or_insert_with(|| {
                format!("Password must be at least {MIN_PASSWORD_LEN} characters")
            });
        }

        if values.confirm_password != values.password {
            errors
                .entry("confirm_password".to_string())
                .or_insert_with(|| "Passwords do not match".to_string());
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
