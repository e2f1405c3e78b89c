//! Shared harness for command integration tests: a wiremock server plus a
//! `StateCtx` registered with every state and compute the app uses.

#![allow(dead_code)]

use serde_json::json;
use tablero_business::users::{
    FetchUsersCommand, ListQueryState, RowActionCompute, RowActionState, SaveUserCompute,
    SaveUserInput, UserRecord, UserStatus, UsersListCompute, UsersPageState,
};
use tablero_business::{
    AppConfig, LoginCompute, LoginFormState, NotificationState, SessionState,
};
use tablero_states::{Command, StateCtx, Time};
use tokio_util::sync::CancellationToken;
use wiremock::MockServer;

pub struct TestHarness {
    pub server: MockServer,
    pub ctx: StateCtx,
}

impl TestHarness {
    pub async fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let server = MockServer::start().await;

        let mut ctx = StateCtx::new();
        ctx.add_state(AppConfig::new(server.uri()));
        ctx.add_state(SessionState::default());
        ctx.add_state(Time::default());
        ctx.add_state(NotificationState::default());
        ctx.add_state(ListQueryState::default());
        ctx.add_state(SaveUserInput::default());
        ctx.add_state(RowActionState::default());
        ctx.add_state(UsersPageState::default());
        ctx.add_state(LoginFormState::default());
        ctx.record_compute(UsersListCompute::default());
        ctx.record_compute(SaveUserCompute::default());
        ctx.record_compute(RowActionCompute::default());
        ctx.record_compute(LoginCompute::default());

        Self { server, ctx }
    }

    pub fn set_authenticated(&mut self, token: &str) {
        let session = SessionState::authenticated(token);
        self.ctx.update::<SessionState>(|s| *s = session);
    }

    /// Run one command to completion on the test runtime and apply its
    /// updates, the same way a dispatch-then-frame cycle would.
    pub async fn run_command<C: Command>(&mut self) {
        let snap = self.ctx.command_snapshot();
        let updater = self.ctx.latest_updater::<C>();
        C::default()
            .run(snap, updater, CancellationToken::new())
            .await;
        self.ctx.sync_computes();
    }

    pub async fn fetch_users(&mut self) {
        self.run_command::<FetchUsersCommand>().await;
    }

    pub fn rows(&self) -> &[UserRecord] {
        self.ctx.cached::<UsersListCompute>().rows()
    }
}

pub fn user(id: i64, username: &str, status: UserStatus) -> UserRecord {
    UserRecord {
        id,
        username: username.to_string(),
        status,
    }
}

pub fn users_body(rows: &[UserRecord], total: u64) -> serde_json::Value {
    json!({ "data": rows, "total": total })
}
