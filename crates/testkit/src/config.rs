//! Suite configuration
//!
//! Everything has a usable default for a local deployment; env vars
//! override individual knobs. Credentials for the pre-verified test
//! account are optional on purpose: their absence makes auth-dependent
//! tests skip rather than fail.

use std::env;
use std::path::PathBuf;

/// Suite-wide settings, resolved once per process.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the SPA frontend
    pub ui_url: String,

    /// Base URL of the REST API
    pub api_url: String,

    /// Pre-existing verified account, if configured
    pub credentials: Option<Credentials>,

    /// Run the browser headless
    pub headless: bool,

    /// Record a video per browser context
    pub record_video: bool,

    /// Root directory for failure screenshots and videos
    pub artifacts_dir: PathBuf,

    pub timeouts: Timeouts,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Timeouts in milliseconds. All waits are condition-based except
/// `settle_ms`, the one sanctioned fixed post-action delay.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub api_request_ms: u64,
    pub element_ms: u64,
    pub navigation_ms: u64,
    pub settle_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            api_request_ms: 15_000,
            element_ms: 10_000,
            navigation_ms: 30_000,
            settle_ms: 500,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ui_url: "http://localhost:3000".to_string(),
            api_url: "http://localhost:3001/api".to_string(),
            credentials: None,
            headless: true,
            record_video: false,
            artifacts_dir: PathBuf::from("test-artifacts"),
            timeouts: Timeouts::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Ok(v) = env::var("BLOG_UI_URL") {
            settings.ui_url = v;
        }
        if let Ok(v) = env::var("BLOG_API_URL") {
            settings.api_url = v;
        }
        if let Ok(v) = env::var("BLOG_ARTIFACTS_DIR") {
            settings.artifacts_dir = PathBuf::from(v);
        }
        settings.headless = env_flag("BLOG_HEADLESS", settings.headless);
        settings.record_video = env_flag("BLOG_RECORD_VIDEO", settings.record_video);

        let email = env::var("BLOG_USER_EMAIL").unwrap_or_default();
        let password = env::var("BLOG_USER_PASSWORD").unwrap_or_default();
        if !email.is_empty() && !password.is_empty() {
            settings.credentials = Some(Credentials { email, password });
        }

        settings
    }

    pub fn screenshots_dir(&self) -> PathBuf {
        self.artifacts_dir.join("screenshots")
    }

    pub fn videos_dir(&self) -> PathBuf {
        self.artifacts_dir.join("videos")
    }

    /// Host portion of the UI origin, for cookie transplanting.
    pub fn ui_host(&self) -> String {
        let stripped = self
            .ui_url
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        stripped
            .split(&[':', '/'][..])
            .next()
            .unwrap_or("localhost")
            .to_string()
    }
}

/// Whether the live-backend integration suite is enabled (BLOG_E2E=1).
pub fn live_suite_enabled() -> bool {
    matches!(
        env::var("BLOG_E2E").ok().as_deref(),
        Some("1") | Some("true") | Some("yes")
    )
}

/// Timestamp for artifact file names.
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

fn env_flag(name: &str, default: bool) -> bool {
    match env::var(name).ok().as_deref() {
        Some("1") | Some("true") | Some("yes") => true,
        Some("0") | Some("false") | Some("no") => false,
        _ => default,
    }
}
