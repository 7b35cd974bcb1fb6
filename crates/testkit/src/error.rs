//! Error types for the test kit

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestkitError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Playwright not found. Install with: npm install playwright && npx playwright install")]
    DriverNotFound,

    #[error("Browser driver error: {0}")]
    Driver(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("Fixture setup failed: {0}")]
    Fixture(String),

    #[error("Skipped: {0}")]
    Skipped(String),
}

impl TestkitError {
    /// Configuration absence is a skip, not a failure. The fixture layer
    /// uses this to short-circuit tests as not-applicable.
    pub fn is_skip(&self) -> bool {
        matches!(self, TestkitError::Skipped(_))
    }
}

pub type TestkitResult<T> = Result<T, TestkitError>;
