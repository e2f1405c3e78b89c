mod notifications;
pub mod users;

pub use notifications::notification_toast;
