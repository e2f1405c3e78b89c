mod confirm;
mod dialog;
mod filter;
mod table;

pub use confirm::confirm_modal;
pub use dialog::user_dialog;
pub use filter::filter_bar;
pub use table::users_table;
