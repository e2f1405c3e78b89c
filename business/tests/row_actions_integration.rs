//! Delete and toggle-status through the confirmation state machine.

mod common;

use common::{TestHarness, user, users_body};
use serde_json::json;
use tablero_business::users::{
    DeleteUserCommand, RowAction, RowActionCompute, RowActionState, ToggleStatusCommand,
    UserStatus,
};
use tablero_business::{NotificationState, Severity};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn confirmed_delete_hits_the_endpoint() {
    let mut harness = TestHarness::new().await;
    harness.set_authenticated("tok-1");

    harness.ctx.update::<RowActionState>(|actions| {
        actions.request(RowAction::Delete { id: 7 });
        actions.confirm();
    });

    Mock::given(method("DELETE"))
        .and(path("/users/7"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&harness.server)
        .await;

    harness.run_command::<DeleteUserCommand>().await;

    assert!(harness.ctx.cached::<RowActionCompute>().is_done());
    let toast = harness
        .ctx
        .state_mut::<NotificationState>()
        .current()
        .cloned()
        .expect("success toast");
    assert_eq!(toast.message, "User deleted");
    assert_eq!(toast.severity, Severity::Success);
}

#[tokio::test]
async fn declined_delete_issues_no_call() {
    let mut harness = TestHarness::new().await;
    harness.set_authenticated("tok-1");

    harness.ctx.update::<RowActionState>(|actions| {
        actions.request(RowAction::Delete { id: 7 });
        actions.decline();
    });

    Mock::given(method("DELETE"))
        .and(path("/users/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&harness.server)
        .await;

    // Nothing was confirmed, so the command has nothing to act on even if it
    // were dispatched by mistake.
    harness.run_command::<DeleteUserCommand>().await;

    assert!(!harness.ctx.cached::<RowActionCompute>().is_done());
    assert!(harness.ctx.state_mut::<NotificationState>().current().is_none());
}

#[tokio::test]
async fn toggle_patches_the_complement_status() {
    let mut harness = TestHarness::new().await;
    harness.set_authenticated("tok-1");

    harness.ctx.update::<RowActionState>(|actions| {
        actions.request(RowAction::ToggleStatus {
            id: 3,
            current: UserStatus::Active,
        });
        actions.confirm();
    });

    Mock::given(method("PATCH"))
        .and(path("/users/3"))
        .and(body_json(json!({ "status": "inactive" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "username": "bob", "status": "inactive",
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    harness.run_command::<ToggleStatusCommand>().await;

    assert!(harness.ctx.cached::<RowActionCompute>().is_done());
}

#[tokio::test]
async fn failed_delete_reports_and_leaves_rows_alone() {
    let mut harness = TestHarness::new().await;
    harness.set_authenticated("tok-1");

    let rows = vec![user(7, "alice", UserStatus::Active)];
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_body(&rows, 1)))
        .mount(&harness.server)
        .await;
    harness.fetch_users().await;

    harness.ctx.update::<RowActionState>(|actions| {
        actions.request(RowAction::Delete { id: 7 });
        actions.confirm();
    });

    Mock::given(method("DELETE"))
        .and(path("/users/7"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({ "message": "user has open sessions" })),
        )
        .mount(&harness.server)
        .await;

    harness.run_command::<DeleteUserCommand>().await;

    assert!(harness.ctx.cached::<RowActionCompute>().is_failed());
    assert_eq!(harness.rows(), rows.as_slice());
    let toast = harness
        .ctx
        .state_mut::<NotificationState>()
        .current()
        .cloned()
        .expect("error toast");
    assert_eq!(toast.message, "user has open sessions");
    assert_eq!(toast.severity, Severity::Error);
}
