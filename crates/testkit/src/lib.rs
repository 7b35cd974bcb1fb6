//! Shared test infrastructure for the blog platform's end-to-end suite
//!
//! Three layers:
//! - `data`: fluent builders and quick factories for request payloads
//! - `api`: a typed client for the backend, partitioned by domain
//! - `browser` + `fixtures`: a shared Playwright browser, per-test
//!   contexts, lazy fixtures and teardown with failure artifacts

pub mod api;
pub mod artifacts;
pub mod browser;
pub mod config;
pub mod data;
pub mod error;
pub mod fixtures;

pub use api::{ApiResponse, BlogApi, ReactTarget, SearchType, VoteType};
pub use browser::{BrowserConfig, BrowserEngine, Page};
pub use config::Settings;
pub use data::{
    quick_comment, quick_post, quick_user, BlockBuilder, BlockType, CommentBuilder, CommentScope,
    PostBuilder, PostType, UserBuilder,
};
pub use error::{TestkitError, TestkitResult};
pub use fixtures::{Harness, PostRecord, TestCtx, UserSession};

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing once per process. `RUST_LOG` controls the
/// filter; defaults to `info`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
