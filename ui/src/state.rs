use tablero_business::users::{
    ListQueryState, RowActionCompute, RowActionState, SaveUserCompute, SaveUserInput,
    UsersListCompute, UsersPageState,
};
use tablero_business::{
    AppConfig, LoginCompute, LoginFormState, NotificationState, SessionState,
};
use tablero_states::{StateCtx, Time};

/// The main application state: a `StateCtx` with every domain state and
/// compute registered.
pub struct State {
    pub ctx: StateCtx,
}

impl Default for State {
    fn default() -> Self {
        Self::with_config(AppConfig::default())
    }
}

impl State {
    /// Point the app at a specific backend; used by tests with a mock server.
    pub fn test(base_url: String) -> Self {
        Self::with_config(AppConfig::new(base_url))
    }

    fn with_config(config: AppConfig) -> Self {
        let mut ctx = StateCtx::new();

        ctx.add_state(Time::default());
        ctx.add_state(config);
        ctx.add_state(SessionState::default());
        ctx.add_state(NotificationState::default());
        ctx.add_state(LoginFormState::default());
        ctx.add_state(ListQueryState::default());
        ctx.add_state(SaveUserInput::default());
        ctx.add_state(RowActionState::default());
        ctx.add_state(UsersPageState::default());

        ctx.record_compute(UsersListCompute::default());
        ctx.record_compute(SaveUserCompute::default());
        ctx.record_compute(RowActionCompute::default());
        ctx.record_compute(LoginCompute::default());

        Self { ctx }
    }
}
