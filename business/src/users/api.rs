//! API client helpers for the `/users` and `/login` endpoints.
//!
//! Business-layer network IO, intended to be called from commands. Each
//! helper attaches the bearer token from the session and maps non-2xx
//! responses through [`ApiFailure::from_response`], so a 401 surfaces as
//! `ApiFailure::Auth` uniformly.

use serde::de::DeserializeOwned;

use crate::error::ApiFailure;
use crate::http::{Client, RequestBuilder, Response};
use crate::session::SessionState;
use crate::users::types::{
    ListUsersResponse, LoginRequest, LoginResponse, SaveUserRequest, ToggleStatusRequest,
    UserRecord,
};

pub type ApiResult<T> = Result<T, ApiFailure>;

async fn send(request: RequestBuilder) -> ApiResult<Response> {
    let response = request.send().await.map_err(ApiFailure::from_http_error)?;
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiFailure::from_response(&response))
    }
}

fn parse<T: DeserializeOwned>(response: &Response, what: &str) -> ApiResult<T> {
    response.json().map_err(|e| ApiFailure::Transport {
        status: Some(response.status),
        message: format!("Failed to parse {what}: {e}"),
    })
}

fn json_body<T: serde::Serialize>(
    request: RequestBuilder,
    body: &T,
) -> ApiResult<RequestBuilder> {
    request.json(body).map_err(|e| ApiFailure::Transport {
        status: None,
        message: format!("Failed to serialize request: {e}"),
    })
}

/// GET `/users` with the query parameters built by `ListQueryState`.
pub async fn list_users(
    api_base_url: &str,
    session: &SessionState,
    query: Vec<(String, String)>,
) -> ApiResult<ListUsersResponse> {
    let request = Client::get(format!("{api_base_url}/users"))
        .bearer(session.token())
        .query_pairs(query);

    let response = send(request).await?;
    parse(&response, "ListUsersResponse")
}

/// POST `/users`
pub async fn create_user(
    api_base_url: &str,
    session: &SessionState,
    body: &SaveUserRequest,
) -> ApiResult<UserRecord> {
    let request = json_body(
        Client::post(format!("{api_base_url}/users")).bearer(session.token()),
        body,
    )?;

    let response = send(request).await?;
    parse(&response, "UserRecord")
}

/// PUT `/users/{id}`
pub async fn update_user(
    api_base_url: &str,
    session: &SessionState,
    id: i64,
    body: &SaveUserRequest,
) -> ApiResult<UserRecord> {
    let request = json_body(
        Client::put(format!("{api_base_url}/users/{id}")).bearer(session.token()),
        body,
    )?;

    let response = send(request).await?;
    parse(&response, "UserRecord")
}

/// PATCH `/users/{id}` with the new status only.
pub async fn toggle_status(
    api_base_url: &str,
    session: &SessionState,
    id: i64,
    body: &ToggleStatusRequest,
) -> ApiResult<UserRecord> {
    let request = json_body(
        Client::patch(format!("{api_base_url}/users/{id}")).bearer(session.token()),
        body,
    )?;

    let response = send(request).await?;
    parse(&response, "UserRecord")
}

/// DELETE `/users/{id}` -> 204, no body to parse.
pub async fn delete_user(api_base_url: &str, session: &SessionState, id: i64) -> ApiResult<()> {
    let request = Client::delete(format!("{api_base_url}/users/{id}")).bearer(session.token());
    send(request).await?;
    Ok(())
}

/// POST `/login`. Unauthenticated; no bearer.
pub async fn login(api_base_url: &str, body: &LoginRequest) -> ApiResult<LoginResponse> {
    let request = json_body(Client::post(format!("{api_base_url}/login")), body)?;
    let response = send(request).await?;
    parse(&response, "LoginResponse")
}
