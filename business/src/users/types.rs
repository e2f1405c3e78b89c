//! Wire types for the user-accounts endpoints.

use serde::{Deserialize, Serialize};

/// Account status. Serialized lowercase on every endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

/// One row of the users table. Identity is `id`; local copies are read-only
/// projections replaced wholesale after every successful fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub status: UserStatus,
}

/// `GET /users` response envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub data: Vec<UserRecord>,
    pub total: u64,
}

/// Body for `POST /users` and `PUT /users/{id}`.
///
/// A blank password in edit mode is omitted entirely so the stored credential
/// is never overwritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveUserRequest {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub status: UserStatus,
}

/// Body for `PATCH /users/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleStatusRequest {
    pub status: UserStatus,
}

/// Body for `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `POST /login` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}
