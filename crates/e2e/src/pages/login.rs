//! Login page

use crate::testkit::{Page, TestkitResult};

const EMAIL_INPUT: &str = "input[autocomplete='username']";
const PASSWORD_INPUT: &str = "input[type='password'][autocomplete='current-password']";
const LOGIN_BUTTON: &str = "button[type='submit']";
const ERROR_TOAST: &str = "div[class*='bg-[#FEF2F2]'] p";
const BELL_ICON: &str = "span.MuiBadge-root button";

pub struct LoginPage<'a> {
    page: &'a Page,
}

impl<'a> LoginPage<'a> {
    pub fn new(page: &'a Page) -> Self {
        Self { page }
    }

    pub async fn open(&self) -> TestkitResult<()> {
        self.page.goto("/login").await?;
        self.page.wait_visible(EMAIL_INPUT).await?;
        tracing::info!("login page open");
        Ok(())
    }

    /// Fill the form and submit. Does not wait for the outcome; use
    /// [`redirected_after_login`] or [`error_visible`] to assert it.
    ///
    /// [`redirected_after_login`]: Self::redirected_after_login
    /// [`error_visible`]: Self::error_visible
    pub async fn login(&self, email: &str, password: &str) -> TestkitResult<()> {
        self.page.fill(EMAIL_INPUT, email).await?;
        self.page.fill(PASSWORD_INPUT, password).await?;
        self.page.click(LOGIN_BUTTON).await?;
        self.page.settle().await;
        Ok(())
    }

    /// True when the error toast appears within the window.
    pub async fn error_visible(&self, timeout_ms: u64) -> TestkitResult<bool> {
        self.page.is_visible_within(ERROR_TOAST, timeout_ms).await
    }

    pub async fn error_message(&self) -> TestkitResult<String> {
        Ok(self.page.inner_text(ERROR_TOAST).await?.trim().to_string())
    }

    /// True once the app navigates away from `/login`, polled for up
    /// to `timeout_ms`.
    pub async fn redirected_after_login(&self, timeout_ms: u64) -> TestkitResult<bool> {
        let deadline = std::time::Instant::now() + std::time::Duration::from_millis(timeout_ms);
        loop {
            let url = self.page.url().await?;
            if !url.to_lowercase().contains("/login") {
                return Ok(true);
            }
            if std::time::Instant::now() >= deadline {
                return Ok(false);
            }
            tokio::time::sleep(std::time::Duration::from_millis(250)).await;
        }
    }

    /// The bell icon only renders for authenticated users.
    pub async fn logged_in(&self, timeout_ms: u64) -> TestkitResult<bool> {
        self.page.is_visible_within(BELL_ICON, timeout_ms).await
    }
}
