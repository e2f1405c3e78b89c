//! Integration tests for the login flow: routing, client-side validation,
//! and the token exchange.

mod common;

use kittest::Queryable;
use tablero_business::LoginFormState;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use common::{mock_users_list, setup_unauthenticated};

/// Without a session token the app lands on the login page.
#[tokio::test]
async fn login_form_is_shown_without_a_session() {
    let mut ctx = setup_unauthenticated().await;

    ctx.harness_mut().step();

    let harness = ctx.harness_mut();
    assert!(harness.query_by_label("Username").is_some());
    assert!(harness.query_by_label("Password").is_some());
    assert!(harness.query_by_label("Sign in").is_some());
    assert!(
        harness.query_by_label("Users").is_none(),
        "users page should not render without a session"
    );
}

/// Client-side validation rejects the form before any request is made.
#[tokio::test]
async fn invalid_credentials_never_reach_the_wire() {
    let mut ctx = setup_unauthenticated().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.mock_server)
        .await;

    ctx.harness_mut().step();
    ctx.harness_mut().get_by_label("Sign in").click();
    ctx.settle().await;

    assert!(
        ctx.harness_mut()
            .query_by_label_contains("Username is required")
            .is_some(),
        "validation errors should be shown inline"
    );
}

/// A successful token exchange routes to the users page.
#[tokio::test]
async fn successful_login_shows_the_users_page() {
    let mut ctx = setup_unauthenticated().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "token": "issued-token" })),
        )
        .mount(&ctx.mock_server)
        .await;
    mock_users_list(&ctx.mock_server, serde_json::json!([]), 0).await;

    ctx.harness_mut().step();
    ctx.harness_mut()
        .state_mut()
        .state
        .ctx
        .update::<LoginFormState>(|form| {
            form.username = "admin".to_string();
            form.password = "123456".to_string();
        });
    ctx.harness_mut().get_by_label("Sign in").click();
    ctx.settle().await;

    assert!(
        ctx.harness_mut().query_by_label("Users").is_some(),
        "users page should render after login"
    );
}
