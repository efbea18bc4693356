use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::auth::Credentials;
use crate::project::Project;
use crate::user::UserRecord;

mod api_http;
pub use api_http::HttpApi;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("server responded {0}")]
    Status(StatusCode),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// The server refused the session, as opposed to failing to serve it.
    pub fn is_auth_rejected(&self) -> bool {
        match self {
            Self::Status(status) => {
                *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
            }
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// The backend endpoints the user center consumes.
#[async_trait]
pub trait Api: Send + Sync {
    /// `GET /users/{user_id}`
    async fn user(&self, creds: &Credentials) -> Result<UserRecord>;
    /// `GET /projects/`, first page only
    async fn projects(&self, creds: &Credentials) -> Result<Vec<Project>>;
    /// `PUT /email/`, asks the backend to send a verification mail
    async fn update_email(&self, creds: &Credentials, email: &str) -> Result<()>;
}

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
}

/// Primary keys come back as integers, but are handled as opaque strings.
pub fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
        Unsigned(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
        Id::Unsigned(n) => n.to_string(),
    })
}
