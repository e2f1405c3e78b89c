//! Users domain: wire types, list query, form validation, and the
//! state/compute/command triples for fetching, saving, and row actions.
//!
//! UI code under `ui/src/widgets/**` defines no domain `State`/`Compute`/
//! `Command`; it reads via `ctx.cached::<T>()`, mutates page state through
//! its methods, and triggers work via `ctx.dispatch::<Cmd>()`.

pub mod api;
pub mod form;
pub mod list_compute;
pub mod page_state;
pub mod query;
pub mod row_actions;
pub mod types;

mod save_compute;

pub use form::{FormMode, UserFormValues, validate_form};
pub use list_compute::{FetchUsersCommand, UsersListCompute};
pub use page_state::UsersPageState;
pub use query::{
    ListQueryState, PAGE_SIZE_OPTIONS, SEARCH_DEBOUNCE_MS, SortDirection, SortField, StatusFilter,
    UserSort,
};
pub use row_actions::{
    DeleteUserCommand, RowAction, RowActionCompute, RowActionOutcome, RowActionState,
    ToggleStatusCommand,
};
pub use save_compute::{SaveOutcome, SaveUserCommand, SaveUserCompute, SaveUserInput};
pub use types::{
    ListUsersResponse, LoginRequest, LoginResponse, SaveUserRequest, ToggleStatusRequest,
    UserRecord, UserStatus,
};
