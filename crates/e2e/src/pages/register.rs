//! Registration page

use crate::testkit::{Page, TestkitResult};

const NAME_INPUT: &str = "input[autocomplete='name']";
const EMAIL_INPUT: &str = "input[type='email'][autocomplete='email']";
const PASSWORD_INPUT: &str = "input[autocomplete='new-password']:first-of-type";
const CONFIRM_PASSWORD_INPUT: &str = "input[autocomplete='new-password']:last-of-type";
const REGISTER_BUTTON: &str = "button[type='submit']";
const LOGIN_LINK: &str = "a[href='/login']";

pub struct RegisterPage<'a> {
    page: &'a Page,
}

impl<'a> RegisterPage<'a> {
    pub fn new(page: &'a Page) -> Self {
        Self { page }
    }

    pub async fn open(&self) -> TestkitResult<()> {
        self.page.goto("/register").await?;
        self.page.wait_visible(EMAIL_INPUT).await?;
        tracing::info!("register page open");
        Ok(())
    }

    /// Fill the form (password entered twice) and submit.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> TestkitResult<()> {
        self.page.fill(NAME_INPUT, name).await?;
        self.page.fill(EMAIL_INPUT, email).await?;
        self.page.fill(PASSWORD_INPUT, password).await?;
        self.page.fill(CONFIRM_PASSWORD_INPUT, password).await?;
        self.page.click(REGISTER_BUTTON).await?;
        self.page.settle().await;
        Ok(())
    }

    pub async fn go_to_login(&self) -> TestkitResult<()> {
        self.page.click(LOGIN_LINK).await
    }

    /// True once the app navigates away from `/register`, polled for
    /// up to `timeout_ms`.
    pub async fn left_register_page(&self, timeout_ms: u64) -> TestkitResult<bool> {
        let deadline = std::time::Instant::now() + std::time::Duration::from_millis(timeout_ms);
        loop {
            let url = self.page.url().await?;
            if !url.to_lowercase().contains("/register") {
                return Ok(true);
            }
            if std::time::Instant::now() >= deadline {
                return Ok(false);
            }
            tokio::time::sleep(std::time::Duration::from_millis(250)).await;
        }
    }
}
