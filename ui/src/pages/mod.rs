mod login_page;
mod users_page;

pub use login_page::login_page;
pub use users_page::users_page;
