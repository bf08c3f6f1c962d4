//! Account and identity endpoints (`/auth/...`).

use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use crate::dto::{Profile, Registration, ReviewAction, UserSummary};
use crate::error::ApiError;
use crate::ApiClient;

/// Body of a successful credential exchange.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

impl ApiClient {
    /// Exchange credentials for a bearer token.
    ///
    /// This is the session store's single network dependency; everything
    /// else on this client is screen plumbing.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let response = self
            .request(Method::POST, "/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let body: TokenResponse = Self::check(response).await?.json().await?;
        Ok(body.token)
    }

    /// Register a new account. An Instructor signup enters the approval
    /// queue rather than becoming active immediately.
    pub async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let response = self
            .request(Method::POST, "/auth/register")
            .json(registration)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// Fetch the calling account's profile.
    pub async fn me(&self) -> Result<Profile, ApiError> {
        self.get_json("/auth/me").await
    }

    /// List all accounts (Admin).
    pub async fn users(&self) -> Result<Vec<UserSummary>, ApiError> {
        self.get_json("/auth/users").await
    }

    /// Approve or reject an account by email (Admin).
    pub async fn review_user(&self, action: ReviewAction, email: &str) -> Result<(), ApiError> {
        let response = self
            .request(Method::PATCH, &format!("/auth/users/{}", action.as_str()))
            .json(&json!({ "email": email }))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// Start a password reset for the given address.
    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        let response = self
            .request(Method::POST, "/auth/forgot-password")
            .json(&json!({ "email": email }))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// Complete a password reset with the emailed token.
    pub async fn reset_password(
        &self,
        email: &str,
        reset_token: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .request(Method::POST, "/auth/reset-password")
            .json(&json!({
                "email": email,
                "token": reset_token,
                "newPassword": new_password,
            }))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }
}
