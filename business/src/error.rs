//! Failure taxonomy for API calls and the submission-boundary conversion
//! into renderable form state.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::http::{HttpError, Response};

/// Message shown whenever the backend rejects the token. A 401 always wins
/// over whatever message the server put in the body.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

/// One message per field, first failing rule wins. `BTreeMap` keeps render
/// order stable.
pub type FieldErrors = BTreeMap<String, String>;

/// Flatten `validator` derive output into one message per field.
pub fn field_errors_from(errors: &validator::ValidationErrors) -> FieldErrors {
    let mut map = FieldErrors::new();
    for (field, field_errors) in errors.field_errors() {
        let Some(first) = field_errors.first() else {
            continue;
        };
        let message = first
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "Invalid value".to_string());
        map.entry(field.to_string()).or_insert(message);
    }
    map
}

/// Every way a remote call can fail, tagged so callers match instead of
/// sniffing payload shapes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiFailure {
    /// Field-scoped rejection, recoverable by editing the form.
    #[error("validation failed")]
    Validation(FieldErrors),

    /// 401 from any endpoint. Fatal to the session.
    #[error("{SESSION_EXPIRED_MESSAGE}")]
    Auth,

    /// Anything else: network failure, 5xx, unparseable body.
    #[error("{message}")]
    Transport { status: Option<u16>, message: String },
}

/// Error payload shapes the backend emits.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<FieldErrors>,
}

impl ApiFailure {
    /// Classify a non-2xx response.
    pub fn from_response(response: &Response) -> Self {
        if response.status == 401 {
            return Self::Auth;
        }

        let body: Option<ErrorBody> = response.json().ok();

        if let Some(errors) = body.as_ref().and_then(|b| b.errors.clone())
            && !errors.is_empty()
        {
            return Self::Validation(errors);
        }

        let message = body
            .and_then(|b| b.message)
            .unwrap_or_else(|| format!("Request failed with status {}", response.status));

        Self::Transport {
            status: Some(response.status),
            message,
        }
    }

    pub fn from_http_error(error: HttpError) -> Self {
        Self::Transport {
            status: None,
            message: error.message,
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth)
    }

    /// The message to surface to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(_) => "Please correct the highlighted fields.".to_string(),
            Self::Auth => SESSION_EXPIRED_MESSAGE.to_string(),
            Self::Transport { message, .. } => message.clone(),
        }
    }
}

/// Outcome of one submission attempt, carried back to the form so it can
/// re-render with the attempted values and inline field errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionState<T> {
    pub errors: FieldErrors,
    pub message: String,
    pub form_data: Option<T>,
}

impl<T> Default for ActionState<T> {
    fn default() -> Self {
        Self {
            errors: FieldErrors::new(),
            message: String::new(),
            form_data: None,
        }
    }
}

impl<T> ActionState<T> {
    pub fn from_failure(failure: ApiFailure, form_data: T) -> Self {
        let message = failure.user_message();
        let errors = match failure {
            ApiFailure::Validation(errors) => errors,
            _ => FieldErrors::new(),
        };
        Self {
            errors,
            message,
            form_data: Some(form_data),
        }
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(|s| s.as_str())
    }
}
