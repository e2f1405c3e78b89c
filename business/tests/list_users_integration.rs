//! `GET /users` through `FetchUsersCommand`: wire shape, row replacement,
//! failure behavior, stale-response discard, and session expiry.

mod common;

use common::{TestHarness, user, users_body};
use tablero_business::users::{
    FetchUsersCommand, ListQueryState, SortField, StatusFilter, UserStatus, UsersListCompute,
};
use tablero_business::{NotificationState, SESSION_EXPIRED_MESSAGE, SessionState, Severity};
use tablero_states::Command;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn default_query_maps_to_one_based_page_and_omits_status() {
    let mut harness = TestHarness::new().await;
    harness.set_authenticated("tok-1");

    let rows = vec![
        user(1, "alice", UserStatus::Active),
        user(2, "bob", UserStatus::Inactive),
    ];
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .and(query_param("search", ""))
        .and(query_param_is_missing("status"))
        .and(query_param_is_missing("orderBy"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_body(&rows, 2)))
        .expect(1)
        .mount(&harness.server)
        .await;

    harness.fetch_users().await;

    let compute = harness.ctx.cached::<UsersListCompute>();
    assert_eq!(compute.rows(), rows.as_slice());
    assert_eq!(compute.total, 2);
    assert!(compute.loaded_once);
    assert!(!compute.is_loading());
    assert_eq!(compute.error_message(), None);
}

#[tokio::test]
async fn filter_sort_and_pagination_are_forwarded() {
    let mut harness = TestHarness::new().await;
    harness.set_authenticated("tok-1");

    harness.ctx.update::<ListQueryState>(|query| {
        query.set_page(2);
        query.set_page_size(5);
        query.set_status_filter(StatusFilter::Active);
        query.toggle_sort(SortField::Username);
        query.toggle_sort(SortField::Username); // asc -> desc
    });

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "3"))
        .and(query_param("limit", "5"))
        .and(query_param("status", "active"))
        .and(query_param("orderBy", "username"))
        .and(query_param("orderDir", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_body(&[], 0)))
        .expect(1)
        .mount(&harness.server)
        .await;

    harness.fetch_users().await;
    assert!(harness.rows().is_empty());
}

#[tokio::test]
async fn refetch_replaces_rows_wholesale() {
    let mut harness = TestHarness::new().await;
    harness.set_authenticated("tok-1");

    let before = vec![
        user(1, "alice", UserStatus::Active),
        user(2, "bob", UserStatus::Inactive),
    ];
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_body(&before, 2)))
        .mount(&harness.server)
        .await;
    harness.fetch_users().await;
    assert_eq!(harness.rows(), before.as_slice());

    // The next page after a mutation: nothing from the old set lingers.
    let after = vec![user(3, "carol", UserStatus::Active)];
    harness.server.reset().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_body(&after, 1)))
        .mount(&harness.server)
        .await;
    harness.fetch_users().await;

    let compute = harness.ctx.cached::<UsersListCompute>();
    assert_eq!(compute.rows(), after.as_slice());
    assert_eq!(compute.total, 1);
}

#[tokio::test]
async fn failed_fetch_keeps_previous_rows_and_raises_a_toast() {
    let mut harness = TestHarness::new().await;
    harness.set_authenticated("tok-1");

    let rows = vec![user(1, "alice", UserStatus::Active)];
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_body(&rows, 1)))
        .mount(&harness.server)
        .await;
    harness.fetch_users().await;
    assert_eq!(harness.rows(), rows.as_slice());

    harness.server.reset().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({ "message": "database unavailable" })),
        )
        .mount(&harness.server)
        .await;

    harness.fetch_users().await;

    let compute = harness.ctx.cached::<UsersListCompute>();
    assert_eq!(compute.rows(), rows.as_slice());
    assert_eq!(compute.error_message(), Some("database unavailable"));

    let toast = harness
        .ctx
        .state_mut::<NotificationState>()
        .current()
        .cloned()
        .expect("a toast should be shown");
    assert_eq!(toast.severity, Severity::Error);
    assert_eq!(toast.message, "database unavailable");
}

#[tokio::test]
async fn superseded_fetch_is_discarded() {
    let mut harness = TestHarness::new().await;
    harness.set_authenticated("tok-1");

    let stale_rows = vec![user(9, "stale", UserStatus::Active)];
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_body(&stale_rows, 1)))
        .mount(&harness.server)
        .await;

    // The older dispatch's updater, captured before the newer one.
    let stale_snap = harness.ctx.command_snapshot();
    let stale_updater = harness.ctx.latest_updater::<FetchUsersCommand>();

    let fresh_rows = vec![user(1, "fresh", UserStatus::Active)];
    harness.server.reset().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_body(&fresh_rows, 1)))
        .mount(&harness.server)
        .await;

    harness.fetch_users().await;
    assert_eq!(harness.rows(), fresh_rows.as_slice());

    harness.server.reset().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_body(&stale_rows, 1)))
        .mount(&harness.server)
        .await;

    // The stale run finishes last; its generation lost, so nothing changes.
    FetchUsersCommand
        .run(stale_snap, stale_updater, CancellationToken::new())
        .await;
    harness.ctx.sync_computes();

    assert_eq!(harness.rows(), fresh_rows.as_slice());
}

#[tokio::test]
async fn unauthorized_fetch_expires_the_session() {
    let mut harness = TestHarness::new().await;
    harness.set_authenticated("tok-1");

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&harness.server)
        .await;

    harness.fetch_users().await;

    let session = harness.ctx.state_mut::<SessionState>().clone();
    assert!(session.expired);
    assert!(!session.is_authenticated());

    let compute = harness.ctx.cached::<UsersListCompute>();
    assert_eq!(compute.error_message(), Some(SESSION_EXPIRED_MESSAGE));
}
