//! Authenticated user sessions

use serde_json::Value;
use tracing::{info, warn};

use crate::api::BlogApi;
use crate::config::Settings;
use crate::error::{TestkitError, TestkitResult};

/// A logged-in user bound to a test's API client. Dropping the struct
/// does not log out; teardown does that explicitly.
#[derive(Debug, Clone)]
pub struct UserSession {
    pub email: String,
    pub name: String,
    pub id: i64,
    pub token: String,
}

/// Pull id and display name out of the login body's `user` object.
/// The backend calls the display field `username`; older responses
/// used `name`, and the email stands in when neither is present.
fn parse_user(user: &Value, fallback: &str) -> (i64, String) {
    let id = user.get("id").and_then(Value::as_i64).unwrap_or(0);
    let name = user
        .get("username")
        .and_then(Value::as_str)
        .or_else(|| user.get("name").and_then(Value::as_str))
        .unwrap_or(fallback)
        .to_string();
    (id, name)
}

impl UserSession {
    /// Log in with the configured standing credentials. Missing
    /// credentials skip the test rather than fail it; a rejected login
    /// is a fixture failure.
    pub async fn login(settings: &Settings, api: &BlogApi) -> TestkitResult<Self> {
        let Some(credentials) = settings.credentials.clone() else {
            return Err(TestkitError::Skipped(
                "BLOG_USER_EMAIL / BLOG_USER_PASSWORD not set".to_string(),
            ));
        };

        let response = api
            .auth()
            .login(&credentials.email, &credentials.password)
            .await?;
        if !response.success {
            return Err(TestkitError::Fixture(format!(
                "login as {} rejected ({}): {}",
                credentials.email,
                response.status,
                response.error_text()
            )));
        }

        let token = response
            .data_field("accessToken")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let user = response.data_field("user").cloned().unwrap_or(Value::Null);
        let (id, name) = parse_user(&user, &credentials.email);

        info!("session user ready: {} (id {})", credentials.email, id);
        Ok(Self {
            email: credentials.email,
            name,
            id,
            token,
        })
    }

    /// Best-effort logout used by teardown.
    pub async fn logout(&self, api: &BlogApi) {
        if let Err(e) = api.auth().logout().await {
            warn!("logout for {} failed: {}", self.email, e);
        }
    }
}

/// The browser-facing view of a session: a logged-in page plus the
/// user behind it.
#[derive(Clone)]
pub struct AuthUser {
    pub session: UserSession,
}

/// A post created through the API for a test, remembered so teardown
/// can delete it.
#[derive(Debug, Clone)]
pub struct PostRecord {
    pub id: i64,
    pub title: String,
    pub author_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_user_prefers_username() {
        let user = json!({"id": 7, "username": "writer01", "name": "Writer", "role": "user"});
        let (id, name) = parse_user(&user, "w@example.com");
        assert_eq!(id, 7);
        assert_eq!(name, "writer01");
    }

    #[test]
    fn parse_user_falls_back_to_name_then_email() {
        let user = json!({"id": 3, "name": "Writer"});
        assert_eq!(parse_user(&user, "w@example.com").1, "Writer");

        let user = json!({"id": 3});
        assert_eq!(parse_user(&user, "w@example.com").1, "w@example.com");

        // Entirely absent user object.
        assert_eq!(parse_user(&Value::Null, "w@example.com"), (0, "w@example.com".to_string()));
    }
}
