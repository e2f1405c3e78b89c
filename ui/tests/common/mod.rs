#![allow(dead_code)]

use egui_kittest::Harness;
use tablero_business::SessionState;
use tablero_ui::TableroApp;
use tablero_ui::state::State;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestCtx<'a> {
    /// Mock server must be retained to keep HTTP endpoints alive during tests.
    pub mock_server: MockServer,
    pub harness: Harness<'a, TableroApp>,
}

impl<'a> TestCtx<'a> {
    pub fn harness_mut(&mut self) -> &mut Harness<'a, TableroApp> {
        &mut self.harness
    }

    /// Run enough frames for async command results and debounce commits to
    /// land in the UI.
    pub async fn settle(&mut self) {
        self.harness.step();
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        for _ in 0..10 {
            self.harness.step();
        }
    }
}

/// App harness with a valid session token, landing on the users page.
pub async fn setup_authenticated<'a>() -> TestCtx<'a> {
    setup(true).await
}

/// App harness without a session token, landing on the login page.
pub async fn setup_unauthenticated<'a>() -> TestCtx<'a> {
    setup(false).await
}

async fn setup<'a>(authenticated: bool) -> TestCtx<'a> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mock_server = MockServer::start().await;

    let mut state = State::test(mock_server.uri());
    if authenticated {
        state
            .ctx
            .update::<SessionState>(|session| *session = SessionState::authenticated("test-token"));
    }

    let app = TableroApp::new(state);
    let harness = Harness::new_eframe(|_| app);

    TestCtx {
        mock_server,
        harness,
    }
}

/// Mount a `GET /users` mock returning the given rows.
pub async fn mock_users_list(server: &MockServer, data: serde_json::Value, total: u64) {
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": data,
            "total": total,
        })))
        .mount(server)
        .await;
}

pub fn user_json(id: i64, username: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "username": username,
        "status": status,
    })
}
