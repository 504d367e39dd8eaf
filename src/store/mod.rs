//! Accounts and saved resumes.
//!
//! A [`Session`] is the context object controllers hold: it owns a [`StorageBackend`], tracks
//! who is signed in and exposes the account operations. Expected failures such as bad
//! credentials come back as [`AuthError`] values; [`AuthResponse`] is the flattened form for
//! callers that want a `{success, user, error}` record.

mod backend;
mod password;
mod session;

pub use backend::{JsonFileStorage, MemoryStorage, StorageBackend, StoreState, STORE_FILE_NAME};
pub use session::Session;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Resume;

/// Failures of a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access store file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store file {} is not valid", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode store contents")]
    Encode(#[from] serde_json::Error),
}

/// Account and resume operation failures.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Not signed in")]
    NotAuthenticated,
    #[error("No saved resume with id '{0}'")]
    ResumeNotFound(String),
    #[error("Failed to hash password")]
    PasswordHash,
    #[error("Storage failure")]
    Storage(#[from] StoreError),
}

/// A stored account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    #[serde(default)]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub saved_resumes: Vec<Resume>,
}

/// Public view of a [`User`], without credentials or resumes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            image: user.image.clone(),
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}

/// Structured outcome of `login`/`signup`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<UserProfile, AuthError>> for AuthResponse {
    fn from(result: Result<UserProfile, AuthError>) -> Self {
        match result {
            Ok(user) => Self {
                success: true,
                user: Some(user),
                error: None,
            },
            Err(err) => Self {
                success: false,
                user: None,
                error: Some(err.to_string()),
            },
        }
    }
}
