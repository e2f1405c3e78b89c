//! Domain logic for the admin console: configuration, HTTP, session,
//! notifications, login, and the users subsystem. No egui rendering here.

pub mod config;
pub mod error;
pub mod http;
pub mod login;
pub mod notify;
pub mod session;
pub mod users;

pub use config::AppConfig;
pub use error::{ActionState, ApiFailure, FieldErrors, SESSION_EXPIRED_MESSAGE};
pub use login::{LoginCommand, LoginCompute, LoginFormState, LoginOutcome};
pub use notify::{Notification, NotificationState, Severity};
pub use session::SessionState;
