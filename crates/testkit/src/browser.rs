//! Playwright browser automation
//!
//! One node process hosts the Playwright driver for the whole test run.
//! The driver is an embedded script speaking line-delimited JSON over
//! stdio: each request carries an id and an op, each reply echoes the
//! id with either a result or an error. Contexts and pages are handles
//! (integers) owned by the driver; the Rust side only routes calls.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command as TokioCommand};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::Timeouts;
use crate::error::{TestkitError, TestkitResult};

/// Slack added on top of the per-call timeout before the Rust side
/// gives up waiting for the driver reply.
const CALL_GRACE_MS: u64 = 5_000;

const DRIVER_JS: &str = r#"
const { chromium } = require('playwright');
const readline = require('readline');

let browser = null;
const contexts = new Map();
const pages = new Map();
let nextHandle = 1;

const rl = readline.createInterface({ input: process.stdin });

function reply(id, ok, payload) {
  process.stdout.write(JSON.stringify(ok ? { id, ok, result: payload } : { id, ok, ...payload }) + '\n');
}

async function dispatch(req) {
  const a = req.args || {};
  switch (req.op) {
    case 'launch': {
      browser = await chromium.launch({ headless: a.headless !== false });
      return null;
    }
    case 'newContext': {
      const opts = { viewport: { width: 1280, height: 720 } };
      if (a.videoDir) opts.recordVideo = { dir: a.videoDir };
      const context = await browser.newContext(opts);
      const handle = nextHandle++;
      contexts.set(handle, context);
      return handle;
    }
    case 'newPage': {
      const page = await contexts.get(a.context).newPage();
      const handle = nextHandle++;
      pages.set(handle, page);
      return handle;
    }
    case 'addCookies': {
      await contexts.get(a.context).addCookies(a.cookies);
      return null;
    }
    case 'goto': {
      await pages.get(a.page).goto(a.url, { timeout: a.timeout });
      return null;
    }
    case 'reload': {
      await pages.get(a.page).reload({ timeout: a.timeout });
      return null;
    }
    case 'click': {
      await pages.get(a.page).click(a.selector, { timeout: a.timeout });
      return null;
    }
    case 'fill': {
      await pages.get(a.page).fill(a.selector, a.value, { timeout: a.timeout });
      return null;
    }
    case 'press': {
      await pages.get(a.page).press(a.selector, a.key, { timeout: a.timeout });
      return null;
    }
    case 'waitForSelector': {
      await pages.get(a.page).waitForSelector(a.selector, { state: a.state, timeout: a.timeout });
      return null;
    }
    case 'waitForUrl': {
      await pages.get(a.page).waitForURL(url => url.href.includes(a.fragment), { timeout: a.timeout });
      return null;
    }
    case 'evaluate': {
      return await pages.get(a.page).evaluate(a.script);
    }
    case 'innerText': {
      return await pages.get(a.page).locator(a.selector).first().innerText({ timeout: a.timeout });
    }
    case 'allInnerTexts': {
      return await pages.get(a.page).locator(a.selector).allInnerTexts();
    }
    case 'count': {
      return await pages.get(a.page).locator(a.selector).count();
    }
    case 'url': {
      return pages.get(a.page).url();
    }
    case 'screenshot': {
      await pages.get(a.page).screenshot({ path: a.path, fullPage: a.fullPage === true });
      return null;
    }
    case 'videoPath': {
      const video = pages.get(a.page).video();
      return video ? await video.path() : null;
    }
    case 'closePage': {
      const page = pages.get(a.page);
      pages.delete(a.page);
      if (page) await page.close();
      return null;
    }
    case 'closeContext': {
      const context = contexts.get(a.context);
      contexts.delete(a.context);
      if (context) await context.close();
      return null;
    }
    default:
      throw new Error('unknown op: ' + req.op);
  }
}

rl.on('line', line => {
  let req;
  try { req = JSON.parse(line); } catch { return; }
  dispatch(req)
    .then(result => reply(req.id, true, result === undefined ? null : result))
    .catch(err => reply(req.id, false, {
      error: String(err && err.message || err),
      timeout: String(err && err.name) === 'TimeoutError',
    }));
});

rl.on('close', async () => {
  if (browser) await browser.close().catch(() => {});
  process.exit(0);
});
"#;

/// Launch options for the shared browser.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub headless: bool,
    pub video_dir: Option<PathBuf>,
    pub timeouts: Timeouts,
}

struct DriverPipe {
    // Held so kill_on_drop reaps the node process with the engine.
    _child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
    next_id: u64,
}

/// The shared browser process. One per test run; contexts and pages
/// are created per test.
pub struct BrowserEngine {
    pipe: Mutex<DriverPipe>,
    config: BrowserConfig,
    // tempdir keeps the driver script alive for the process lifetime
    _driver_dir: tempfile::TempDir,
}

impl BrowserEngine {
    /// Spawn the driver process and launch the browser inside it.
    pub async fn launch(config: BrowserConfig) -> TestkitResult<Self> {
        Self::check_playwright_installed()?;

        let driver_dir = tempfile::tempdir()?;
        let script_path = driver_dir.path().join("driver.js");
        std::fs::write(&script_path, DRIVER_JS)?;

        debug!("starting browser driver: {}", script_path.display());
        let mut child = TokioCommand::new("node")
            .arg(&script_path)
            .current_dir(driver_dir.path())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| TestkitError::Driver("driver stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| TestkitError::Driver("driver stdout unavailable".to_string()))?;

        let engine = Self {
            pipe: Mutex::new(DriverPipe {
                _child: child,
                stdin,
                stdout: BufReader::new(stdout).lines(),
                next_id: 1,
            }),
            config,
            _driver_dir: driver_dir,
        };

        engine
            .call("launch", json!({"headless": engine.config.headless}), 30_000)
            .await?;
        info!("browser launched (headless={})", engine.config.headless);
        Ok(engine)
    }

    fn check_playwright_installed() -> TestkitResult<()> {
        let status = std::process::Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(status) if status.success() => Ok(()),
            _ => Err(TestkitError::DriverNotFound),
        }
    }

    /// Send one op to the driver and wait for its reply. Calls are
    /// serialized; the driver answers in order.
    async fn call(&self, op: &str, args: Value, timeout_ms: u64) -> TestkitResult<Value> {
        let mut pipe = self.pipe.lock().await;
        let id = pipe.next_id;
        pipe.next_id += 1;

        let request = json!({"id": id, "op": op, "args": args});
        let mut line = request.to_string();
        line.push('\n');
        pipe.stdin.write_all(line.as_bytes()).await?;
        pipe.stdin.flush().await?;

        let deadline = Duration::from_millis(timeout_ms + CALL_GRACE_MS);
        loop {
            let next = tokio::time::timeout(deadline, pipe.stdout.next_line()).await;
            let reply = match next {
                Ok(Ok(Some(line))) => line,
                Ok(Ok(None)) => {
                    return Err(TestkitError::Driver("driver exited unexpectedly".to_string()))
                }
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => return Err(TestkitError::Timeout(format!("driver op {op}"))),
            };
            let Ok(value) = serde_json::from_str::<Value>(&reply) else {
                // Stray output from the driver process, not a reply.
                continue;
            };
            if value.get("id").and_then(Value::as_u64) != Some(id) {
                continue;
            }
            if value.get("ok").and_then(Value::as_bool) == Some(true) {
                return Ok(value.get("result").cloned().unwrap_or(Value::Null));
            }
            let message = value
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown driver error")
                .to_string();
            return if value.get("timeout").and_then(Value::as_bool) == Some(true) {
                Err(TestkitError::Timeout(message))
            } else {
                Err(TestkitError::Driver(message))
            };
        }
    }

    /// Open a fresh isolated context with one page.
    pub async fn open_page(&'static self, ui_url: &str) -> TestkitResult<Page> {
        let video_dir = self
            .config
            .video_dir
            .as_ref()
            .map(|dir| dir.to_string_lossy().to_string());
        let context = self
            .call("newContext", json!({"videoDir": video_dir}), 10_000)
            .await?
            .as_u64()
            .ok_or_else(|| TestkitError::Driver("bad context handle".to_string()))?;
        let page = self
            .call("newPage", json!({"context": context}), 10_000)
            .await?
            .as_u64()
            .ok_or_else(|| TestkitError::Driver("bad page handle".to_string()))?;
        Ok(Page {
            engine: self,
            context,
            page,
            ui_url: ui_url.trim_end_matches('/').to_string(),
            timeouts: self.config.timeouts.clone(),
        })
    }

}

/// One page in its own browser context. Created per test, closed in
/// teardown.
#[derive(Clone)]
pub struct Page {
    engine: &'static BrowserEngine,
    context: u64,
    page: u64,
    ui_url: String,
    timeouts: Timeouts,
}

impl Page {
    fn absolute(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.ui_url, path.trim_start_matches('/'))
        }
    }

    /// Navigate to a path relative to the UI base URL, or an absolute URL.
    pub async fn goto(&self, path: &str) -> TestkitResult<()> {
        let url = self.absolute(path);
        debug!("goto {}", url);
        self.engine
            .call(
                "goto",
                json!({"page": self.page, "url": url, "timeout": self.timeouts.navigation_ms}),
                self.timeouts.navigation_ms,
            )
            .await?;
        Ok(())
    }

    pub async fn reload(&self) -> TestkitResult<()> {
        self.engine
            .call(
                "reload",
                json!({"page": self.page, "timeout": self.timeouts.navigation_ms}),
                self.timeouts.navigation_ms,
            )
            .await?;
        Ok(())
    }

    pub async fn click(&self, selector: &str) -> TestkitResult<()> {
        self.engine
            .call(
                "click",
                json!({"page": self.page, "selector": selector, "timeout": self.timeouts.element_ms}),
                self.timeouts.element_ms,
            )
            .await?;
        Ok(())
    }

    pub async fn fill(&self, selector: &str, value: &str) -> TestkitResult<()> {
        self.engine
            .call(
                "fill",
                json!({"page": self.page, "selector": selector, "value": value, "timeout": self.timeouts.element_ms}),
                self.timeouts.element_ms,
            )
            .await?;
        Ok(())
    }

    pub async fn press(&self, selector: &str, key: &str) -> TestkitResult<()> {
        self.engine
            .call(
                "press",
                json!({"page": self.page, "selector": selector, "key": key, "timeout": self.timeouts.element_ms}),
                self.timeouts.element_ms,
            )
            .await?;
        Ok(())
    }

    async fn wait_state(&self, selector: &str, state: &str, timeout_ms: u64) -> TestkitResult<()> {
        self.engine
            .call(
                "waitForSelector",
                json!({"page": self.page, "selector": selector, "state": state, "timeout": timeout_ms}),
                timeout_ms,
            )
            .await?;
        Ok(())
    }

    pub async fn wait_visible(&self, selector: &str) -> TestkitResult<()> {
        self.wait_state(selector, "visible", self.timeouts.element_ms).await
    }

    pub async fn wait_hidden(&self, selector: &str) -> TestkitResult<()> {
        self.wait_state(selector, "hidden", self.timeouts.element_ms).await
    }

    /// True when the selector becomes visible within the window, false
    /// on a clean timeout. Driver errors still propagate.
    pub async fn is_visible_within(&self, selector: &str, timeout_ms: u64) -> TestkitResult<bool> {
        match self.wait_state(selector, "visible", timeout_ms).await {
            Ok(()) => Ok(true),
            Err(TestkitError::Timeout(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Wait until the page URL contains the fragment.
    pub async fn wait_url_contains(&self, fragment: &str) -> TestkitResult<()> {
        self.engine
            .call(
                "waitForUrl",
                json!({"page": self.page, "fragment": fragment, "timeout": self.timeouts.navigation_ms}),
                self.timeouts.navigation_ms,
            )
            .await?;
        Ok(())
    }

    pub async fn eval(&self, script: &str) -> TestkitResult<Value> {
        self.engine
            .call(
                "evaluate",
                json!({"page": self.page, "script": script}),
                self.timeouts.element_ms,
            )
            .await
    }

    pub async fn inner_text(&self, selector: &str) -> TestkitResult<String> {
        let value = self
            .engine
            .call(
                "innerText",
                json!({"page": self.page, "selector": selector, "timeout": self.timeouts.element_ms}),
                self.timeouts.element_ms,
            )
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    pub async fn all_inner_texts(&self, selector: &str) -> TestkitResult<Vec<String>> {
        let value = self
            .engine
            .call(
                "allInnerTexts",
                json!({"page": self.page, "selector": selector}),
                self.timeouts.element_ms,
            )
            .await?;
        Ok(value
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default())
    }

    pub async fn count(&self, selector: &str) -> TestkitResult<usize> {
        let value = self
            .engine
            .call(
                "count",
                json!({"page": self.page, "selector": selector}),
                self.timeouts.element_ms,
            )
            .await?;
        Ok(value.as_u64().unwrap_or(0) as usize)
    }

    pub async fn url(&self) -> TestkitResult<String> {
        let value = self
            .engine
            .call("url", json!({"page": self.page}), self.timeouts.element_ms)
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    /// Install session cookies into this page's context, scoped to the
    /// given domain.
    pub async fn add_cookies(
        &self,
        cookies: &HashMap<String, String>,
        domain: &str,
    ) -> TestkitResult<()> {
        if cookies.is_empty() {
            return Ok(());
        }
        let cookies: Vec<Value> = cookies
            .iter()
            .map(|(name, value)| {
                json!({"name": name, "value": value, "domain": domain, "path": "/"})
            })
            .collect();
        self.engine
            .call(
                "addCookies",
                json!({"context": self.context, "cookies": cookies}),
                self.timeouts.element_ms,
            )
            .await?;
        Ok(())
    }

    pub async fn screenshot(&self, path: &Path, full_page: bool) -> TestkitResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.engine
            .call(
                "screenshot",
                json!({
                    "page": self.page,
                    "path": path.to_string_lossy(),
                    "fullPage": full_page
                }),
                self.timeouts.navigation_ms,
            )
            .await?;
        Ok(())
    }

    /// The recorded video's path, if this context records video. Only
    /// final after the context closes.
    pub async fn video_path(&self) -> TestkitResult<Option<PathBuf>> {
        let value = self
            .engine
            .call("videoPath", json!({"page": self.page}), 10_000)
            .await?;
        Ok(value.as_str().map(PathBuf::from))
    }

    /// Brief pause for client-side rendering to settle after an action.
    pub async fn settle(&self) {
        tokio::time::sleep(Duration::from_millis(self.timeouts.settle_ms)).await;
    }

    /// Close the page and its context. Idempotent at the driver level.
    pub async fn close(&self) -> TestkitResult<()> {
        if let Err(e) = self
            .engine
            .call("closePage", json!({"page": self.page}), 10_000)
            .await
        {
            warn!("page close failed: {}", e);
        }
        self.engine
            .call("closeContext", json!({"context": self.context}), 10_000)
            .await?;
        Ok(())
    }
}
