//! Test fixtures
//!
//! Two layers of shared state. The [`Harness`] is process-wide: one
//! browser and the resolved settings for the whole run, created on
//! first use. The [`TestCtx`] is per-test: it owns its own API client
//! so auth state never crosses test boundaries, and its page, session
//! and seeded data are built lazily the first time a test asks for
//! them and torn down in reverse order when the test ends, pass or
//! fail. The runner executes tests on concurrent threads, so nothing
//! mutable may live on the harness.

mod session;

pub use session::{AuthUser, PostRecord, UserSession};

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use once_cell::sync::OnceCell as SyncOnceCell;
use tokio::sync::{Mutex, OnceCell};
use tracing::{info, warn};

use crate::api::BlogApi;
use crate::artifacts;
use crate::browser::{BrowserConfig, BrowserEngine, Page};
use crate::config::Settings;
use crate::data::PostData;
use crate::error::{TestkitError, TestkitResult};

static HARNESS: SyncOnceCell<Harness> = SyncOnceCell::new();

/// Process-wide shared infrastructure. Holds only resources that are
/// safe to share between concurrently running tests.
pub struct Harness {
    pub settings: Settings,
    engine: OnceCell<BrowserEngine>,
}

impl Harness {
    /// The shared harness, created on first access.
    pub fn global() -> &'static Harness {
        HARNESS.get_or_init(|| {
            crate::init_tracing();
            let settings = Settings::from_env();
            info!(
                "harness ready: ui={} api={}",
                settings.ui_url, settings.api_url
            );
            Harness {
                settings,
                engine: OnceCell::new(),
            }
        })
    }

    /// The shared browser, launched on first use so API-only tests
    /// never pay for it.
    pub async fn engine(&'static self) -> TestkitResult<&'static BrowserEngine> {
        self.engine
            .get_or_try_init(|| async {
                let video_dir = self
                    .settings
                    .record_video
                    .then(|| self.settings.videos_dir());
                if let Some(dir) = &video_dir {
                    std::fs::create_dir_all(dir)?;
                }
                BrowserEngine::launch(BrowserConfig {
                    headless: self.settings.headless,
                    video_dir,
                    timeouts: self.settings.timeouts,
                })
                .await
            })
            .await
    }

    /// A fresh page in its own context.
    pub async fn open_page(&'static self) -> TestkitResult<Page> {
        let engine = self.engine().await?;
        engine.open_page(&self.settings.ui_url).await
    }
}

/// Per-test state. Fixtures are lazy; ask only for what the test
/// needs. The API client is owned by this context, so login, cookies
/// and `clear_session` on it cannot interfere with other tests.
pub struct TestCtx {
    pub name: String,
    pub harness: &'static Harness,
    api: BlogApi,
    page: OnceCell<Page>,
    user: OnceCell<UserSession>,
    auth: OnceCell<AuthUser>,
    seeded: Mutex<Vec<PostRecord>>,
}

impl TestCtx {
    fn new(name: &str, harness: &'static Harness) -> TestkitResult<Self> {
        let api = BlogApi::new(
            harness.settings.api_url.clone(),
            Duration::from_millis(harness.settings.timeouts.api_request_ms),
        )?;
        Ok(Self {
            name: name.to_string(),
            harness,
            api,
            page: OnceCell::new(),
            user: OnceCell::new(),
            auth: OnceCell::new(),
            seeded: Mutex::new(Vec::new()),
        })
    }

    /// This test's private API client.
    pub fn api(&self) -> &BlogApi {
        &self.api
    }

    pub fn settings(&self) -> &Settings {
        &self.harness.settings
    }

    /// This test's browser page, opened on first use.
    pub async fn page(&self) -> TestkitResult<&Page> {
        self.page
            .get_or_try_init(|| self.harness.open_page())
            .await
    }

    /// The standing test user, logged in through this test's API client.
    pub async fn user(&self) -> TestkitResult<&UserSession> {
        self.user
            .get_or_try_init(|| UserSession::login(&self.harness.settings, &self.api))
            .await
    }

    /// A page that starts out authenticated: logs in through the API,
    /// then transplants the session into the browser by installing the
    /// API cookies and writing the bearer token into the SPA's client
    /// storage.
    pub async fn auth_user(&self) -> TestkitResult<&AuthUser> {
        self.auth
            .get_or_try_init(|| async {
                let session = self.user().await?.clone();
                let page = self.page().await?;
                let cookies = self.api.cookies();
                page.add_cookies(&cookies, &self.harness.settings.ui_host())
                    .await?;
                // Storage is per-origin; the page must be on the app
                // before localStorage is writable.
                page.goto("/").await?;
                if !session.token.is_empty() {
                    let script = format!(
                        "localStorage.setItem('accessToken', {})",
                        serde_json::to_string(&session.token)?
                    );
                    page.eval(&script).await?;
                }
                Ok(AuthUser { session })
            })
            .await
    }

    /// Create a post through the API and register it for teardown.
    pub async fn seed_post(&self, post: &PostData) -> TestkitResult<PostRecord> {
        let response = self.api.posts().create(post).await?;
        if !response.success {
            return Err(TestkitError::Fixture(format!(
                "seed post rejected ({}): {}",
                response.status,
                response.error_text()
            )));
        }
        let id = response
            .data_field("id")
            .and_then(serde_json::Value::as_i64)
            .ok_or_else(|| TestkitError::Fixture("seed post response had no id".to_string()))?;
        let record = PostRecord {
            id,
            title: post.title.clone(),
            author_id: post.author_id,
        };
        self.seeded.lock().await.push(record.clone());
        Ok(record)
    }

    /// Seed several posts in order.
    pub async fn seed_posts(&self, posts: &[PostData]) -> TestkitResult<Vec<PostRecord>> {
        let mut records = Vec::with_capacity(posts.len());
        for post in posts {
            records.push(self.seed_post(post).await?);
        }
        Ok(records)
    }

    /// Teardown in reverse creation order. `failed` switches artifact
    /// capture on before anything is closed. Everything released here
    /// belongs to this context alone.
    async fn teardown(&self, failed: bool) {
        if failed {
            if let Some(page) = self.page.get() {
                artifacts::capture_failure(&self.harness.settings, page, &self.name).await;
            }
        }

        let seeded: Vec<PostRecord> = self.seeded.lock().await.drain(..).collect();
        for record in seeded.iter().rev() {
            match self.api.posts().delete(record.id).await {
                Ok(response) if response.success => {
                    info!("seeded post {} deleted", record.id);
                }
                Ok(response) => {
                    warn!("seeded post {} not deleted ({})", record.id, response.status);
                }
                Err(e) => warn!("seeded post {} not deleted: {}", record.id, e),
            }
        }

        if let Some(user) = self.user.get() {
            user.logout(&self.api).await;
        }
        self.api.clear_session();

        if let Some(page) = self.page.get() {
            let video = if failed && self.harness.settings.record_video {
                page.video_path().await.ok().flatten()
            } else {
                None
            };
            if let Err(e) = page.close().await {
                warn!("page close in teardown failed: {}", e);
            }
            // The recording is only complete once the context is closed.
            if let Some(recorded) = video {
                artifacts::preserve_video(&self.harness.settings, &recorded, &self.name);
            }
        }
    }
}

/// Run one test body with fixture setup and guaranteed teardown.
///
/// Panics and fixture errors both count as failure and trigger
/// artifact capture; [`TestkitError::Skipped`] ends the test quietly.
pub async fn run<F, Fut>(name: &str, body: F)
where
    F: FnOnce(Arc<TestCtx>) -> Fut,
    Fut: Future<Output = TestkitResult<()>>,
{
    let harness = Harness::global();
    let ctx = match TestCtx::new(name, harness) {
        Ok(ctx) => Arc::new(ctx),
        Err(e) => panic!("fixture init for {name} failed: {e}"),
    };

    info!("=== {} ===", name);
    let outcome = AssertUnwindSafe(body(ctx.clone())).catch_unwind().await;

    let failed = match &outcome {
        Ok(Ok(())) => false,
        Ok(Err(e)) => !e.is_skip(),
        Err(_) => true,
    };

    ctx.teardown(failed).await;

    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(e)) if e.is_skip() => {
            eprintln!("test {name} skipped: {e}");
        }
        Ok(Err(e)) => panic!("test {name} failed: {e}"),
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::Notify;

    // Two bodies running at once, each on its own context. The second
    // test finishes (and tears down) while the first is still holding
    // its session; the first's bearer must survive.
    #[tokio::test]
    async fn teardown_only_clears_its_own_session() {
        let first_ready = Arc::new(Notify::new());
        let second_done = Arc::new(Notify::new());

        let first = {
            let first_ready = first_ready.clone();
            let second_done = second_done.clone();
            run("session_isolation_first", move |ctx| async move {
                ctx.api().set_bearer("first-token");
                first_ready.notify_one();
                second_done.notified().await;
                assert_eq!(
                    ctx.api().bearer().as_deref(),
                    Some("first-token"),
                    "another test's teardown must not touch this session"
                );
                Ok(())
            })
        };

        let second = {
            let first_ready = first_ready.clone();
            let second_done = second_done.clone();
            async move {
                first_ready.notified().await;
                run("session_isolation_second", move |ctx| async move {
                    ctx.api().set_bearer("second-token");
                    Ok(())
                })
                .await;
                second_done.notify_one();
            }
        };

        tokio::join!(first, second);
    }

    #[tokio::test]
    async fn each_context_gets_its_own_client() {
        let harness = Harness::global();
        let a = TestCtx::new("ctx_a", harness).unwrap();
        let b = TestCtx::new("ctx_b", harness).unwrap();

        a.api().set_bearer("alpha");
        assert!(b.api().bearer().is_none());

        b.api().clear_session();
        assert_eq!(a.api().bearer().as_deref(), Some("alpha"));
    }
}
