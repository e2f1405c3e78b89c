//! Users list cache + the fetch command that fills it.
//!
//! The cache is compute-shaped: UI reads it via
//! `ctx.cached::<UsersListCompute>()` and never mutates it directly. The only
//! writer is `FetchUsersCommand`, dispatched by the page orchestrator
//! whenever the query state reports itself dirty.

use std::any::Any;

use tablero_states::{
    Command, CommandSnapshot, Compute, LatestOnlyUpdater, State, Time, assign_impl,
    state_assign_impl,
};

use crate::config::AppConfig;
use crate::notify::NotificationState;
use crate::session::SessionState;
use crate::users::api;
use crate::users::query::ListQueryState;
use crate::users::types::UserRecord;

/// Latest known page of users. On a failed refresh the previous rows stay in
/// place; only `error` changes.
#[derive(Debug, Clone, Default)]
pub struct UsersListCompute {
    pub rows: Vec<UserRecord>,
    pub total: u64,
    pub loading: bool,
    pub error: Option<String>,
    pub loaded_once: bool,
}

impl UsersListCompute {
    pub fn rows(&self) -> &[UserRecord] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Total page count for the current page size.
    pub fn page_count(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        (self.total as usize).div_ceil(page_size)
    }
}

impl State for UsersListCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

impl Compute for UsersListCompute {}

/// Manual-only refresh of the users list.
///
/// Reads the committed query, issues `GET /users`, and replaces the cache
/// wholesale on success. A 401 additionally expires the session. A
/// superseded run is discarded by the updater's generation check.
#[derive(Debug, Default)]
pub struct FetchUsersCommand;

impl Command for FetchUsersCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: tokio_util::sync::CancellationToken,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>> {
        let query = snap.state::<ListQueryState>().clone();
        let config = snap.state::<AppConfig>().clone();
        let session = snap.state::<SessionState>().clone();
        let previous = snap.compute::<UsersListCompute>().clone();
        let now = *snap.state::<Time>().as_ref();

        Box::pin(async move {
            updater.set(UsersListCompute {
                loading: true,
                error: None,
                ..previous.clone()
            });

            let result = api::list_users(
                config.api_url().as_str(),
                &session,
                query.to_query_params(),
            )
            .await;

            match result {
                Ok(list) => {
                    updater.set(UsersListCompute {
                        rows: list.data,
                        total: list.total,
                        loading: false,
                        error: None,
                        loaded_once: true,
                    });
                }
                Err(failure) => {
                    log::warn!("users list fetch failed: {failure}");
                    if failure.is_auth() {
                        updater.set(session.expire());
                    }
                    let message = failure.user_message();
                    updater.set(NotificationState::error(&message, now));
                    updater.set(UsersListCompute {
                        loading: false,
                        error: Some(message),
                        ..previous
                    });
                }
            }
        })
    }
}
