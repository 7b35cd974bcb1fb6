//! Authentication endpoints
//!
//! `login` and `logout` mutate the parent client's auth state so that
//! every other sub-client rides the same session.

use serde_json::{json, Value};
use tracing::info;

use super::{ApiResponse, BlogApi};
use crate::error::TestkitResult;

pub struct AuthApi<'a> {
    pub(super) api: &'a BlogApi,
}

impl AuthApi<'_> {
    /// Register a new account. Password policy: min 8 chars with upper,
    /// lower and a digit.
    pub async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> TestkitResult<ApiResponse> {
        self.api
            .post(
                "auth/register",
                json!({"email": email, "name": name, "password": password}),
            )
            .await
    }

    /// Log in and, on success, install the returned JWT as the bearer
    /// token for all subsequent calls.
    pub async fn login(
        &self,
        email_or_username: &str,
        password: &str,
    ) -> TestkitResult<ApiResponse> {
        let response = self
            .api
            .post(
                "auth/login",
                json!({"emailOrUsername": email_or_username, "password": password}),
            )
            .await?;

        if response.success {
            info!("logged in as {}", email_or_username);
            if let Some(token) = response.data_field("accessToken").and_then(Value::as_str) {
                self.api.set_bearer(token);
            }
        }
        Ok(response)
    }

    /// Log out. The bearer token is dropped even when the server call
    /// fails, so the client never keeps a half-dead session.
    pub async fn logout(&self) -> TestkitResult<ApiResponse> {
        let response = self.api.post_empty("auth/logout").await;
        self.api.drop_bearer();
        response
    }

    /// The currently authenticated user's profile.
    pub async fn me(&self) -> TestkitResult<ApiResponse> {
        self.api.get("auth/me", &[]).await
    }
}
