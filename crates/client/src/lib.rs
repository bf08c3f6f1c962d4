//! `upskeel-client` — typed REST bindings for the Upskeel API.
//!
//! One method per remote operation, grouped by resource. Every authenticated
//! call attaches the bearer token held by the client; the server remains the
//! authority on whether that token is still good.

mod auth;
mod courses;
mod dto;
mod enrollments;
mod error;
mod requests;

pub use dto::{
    Course, CourseUpdate, Enrollment, InstructorRequest, NewCourse, Preferences, Profile,
    ReassignCourse, Registration, ReviewAction, UserSummary,
};
pub use error::ApiError;

use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// HTTP client for the Upskeel API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            token: None,
        }
    }

    /// Attach a bearer token for authenticated calls.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace or clear the bearer token in place (e.g. after a re-login).
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut req = self.http.request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Map a non-success response into [`ApiError::Api`], preferring the
    /// server-supplied `message` field over the bare status line.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let fallback = status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message.unwrap_or(fallback),
            Err(_) => fallback,
        };

        tracing::debug!(status = status.as_u16(), %message, "API call rejected");

        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Error envelope the API uses for rejected requests.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}
