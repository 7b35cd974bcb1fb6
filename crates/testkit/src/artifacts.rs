//! Failure artifacts
//!
//! Screenshots and videos for failed tests. Every function here is
//! best-effort: artifact capture must never turn a clean failure into
//! a confusing secondary error, so problems are logged and swallowed.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::browser::Page;
use crate::config::{timestamp, Settings};

/// Test names land in filenames; keep only a safe subset.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Take a full-page screenshot of the failed test's page.
pub async fn capture_failure(settings: &Settings, page: &Page, test_name: &str) {
    let dir = settings.screenshots_dir();
    let path = dir.join(format!("FAILED_{}_{}.png", sanitize(test_name), timestamp()));
    match page.screenshot(&path, true).await {
        Ok(()) => info!("failure screenshot: {}", path.display()),
        Err(e) => warn!("failure screenshot for {} not captured: {}", test_name, e),
    }
}

/// Move a recorded video into the artifacts directory under a name
/// that identifies the failed test.
pub fn preserve_video(settings: &Settings, recorded: &Path, test_name: &str) -> Option<PathBuf> {
    let dir = settings.videos_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        warn!("videos dir {} not created: {}", dir.display(), e);
        return None;
    }
    let target = dir.join(format!("FAILED_{}_{}.webm", sanitize(test_name), timestamp()));
    match std::fs::rename(recorded, &target) {
        Ok(()) => {
            info!("failure video: {}", target.display());
            Some(target)
        }
        Err(e) => {
            warn!("video for {} not preserved: {}", test_name, e);
            None
        }
    }
}
