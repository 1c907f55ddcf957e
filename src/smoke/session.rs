use crate::{
    api::{Browser, FrameState, Page, Playwright, ScreenshotType},
    imp::core::ArcResult,
    smoke::{SmokeConfig, SmokeError},
};
use async_trait::async_trait;
use std::{future::Future, time::Duration};

/// The handful of browser operations the smoke test needs.
///
/// Every call targets the single page the session owns. [`close`](UiSession::close)
/// is called exactly once by the runner, after which the session is not used again.
#[async_trait]
pub trait UiSession: Send {
    async fn goto(&mut self, url: &str) -> Result<(), SmokeError>;

    async fn fill(&mut self, selector: &str, value: &str) -> Result<(), SmokeError>;

    async fn click(&mut self, selector: &str) -> Result<(), SmokeError>;

    /// Waits for the element to become visible, failing once the assertion timeout elapses.
    async fn expect_visible(&mut self, selector: &str) -> Result<(), SmokeError>;

    /// PNG of the current viewport.
    async fn screenshot(&mut self) -> Result<Vec<u8>, SmokeError>;

    async fn close(&mut self) -> Result<(), SmokeError>;
}

/// A headless Chromium page driven through Playwright.
///
/// Dropping the session drops the driver connection, which kills the driver and
/// the browsers it launched, so an unclosed session still leaves nothing running.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    action_timeout: Duration,
    expect_timeout: Duration,
    closed: bool,
    // Dropped last: the connection owns the driver process.
    _playwright: Playwright,
}

impl BrowserSession {
    /// Installs the driver and Chromium if needed, launches the browser and opens one page.
    pub async fn launch(config: &SmokeConfig) -> Result<Self, SmokeError> {
        log::debug!("starting playwright");
        let playwright = Playwright::initialize().await.map_err(SmokeError::launch)?;
        playwright.prepare().map_err(SmokeError::launch)?;
        let browser = playwright
            .chromium()
            .launcher()
            .headless(config.headless)
            .launch()
            .await
            .map_err(SmokeError::launch)?;
        log::debug!("launched chromium {}", browser.version().unwrap_or_default());
        let page = release_on_error(browser.new_page().await, || browser.close()).await?;
        Ok(Self {
            browser,
            page,
            action_timeout: config.action_timeout,
            expect_timeout: config.expect_timeout,
            closed: false,
            _playwright: playwright,
        })
    }

    fn action_ms(&self) -> f64 { self.action_timeout.as_millis() as f64 }
}

#[async_trait]
impl UiSession for BrowserSession {
    async fn goto(&mut self, url: &str) -> Result<(), SmokeError> {
        self.page
            .goto_builder(url)
            .timeout(self.action_ms())
            .goto()
            .await
            .map_err(|source| SmokeError::Navigation {
                url: url.to_owned(),
                source,
            })
    }

    async fn fill(&mut self, selector: &str, value: &str) -> Result<(), SmokeError> {
        self.page
            .fill_builder(selector, value)
            .timeout(self.action_ms())
            .fill()
            .await
            .map_err(|e| SmokeError::action("fill", selector, e))
    }

    async fn click(&mut self, selector: &str) -> Result<(), SmokeError> {
        self.page
            .click_builder(selector)
            .timeout(self.action_ms())
            .click()
            .await
            .map_err(|e| SmokeError::action("click", selector, e))
    }

    async fn expect_visible(&mut self, selector: &str) -> Result<(), SmokeError> {
        let timeout = self.expect_timeout;
        self.page
            .locator(selector)
            .wait_for(FrameState::Visible, Some(timeout.as_millis() as f64))
            .await
            .map_err(|e| SmokeError::visibility(selector, timeout, e))
    }

    async fn screenshot(&mut self) -> Result<Vec<u8>, SmokeError> {
        self.page
            .screenshot_builder()
            .r#type(ScreenshotType::Png)
            .timeout(self.action_ms())
            .screenshot()
            .await
            .map_err(SmokeError::Screenshot)
    }

    async fn close(&mut self) -> Result<(), SmokeError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.browser.close().await.map_err(SmokeError::Close)
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if !self.closed {
            log::warn!("browser session dropped without close; stopping the driver");
        }
    }
}

/// Turns a failed setup step into [`SmokeError::Launch`], running `release` first so the
/// half-built session does not keep a browser open.
async fn release_on_error<T, F, Fut>(result: ArcResult<T>, release: F) -> Result<T, SmokeError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ArcResult<()>>,
{
    match result {
        Ok(x) => Ok(x),
        Err(e) => {
            if let Err(close) = release().await {
                log::warn!("failed to close browser after setup error: {}", close);
            }
            Err(SmokeError::Launch(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imp::core::Error;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    crate::runtime_test!(failed_setup_releases_browser, {
        let released = AtomicUsize::new(0);
        let r: Result<(), SmokeError> = release_on_error(Err(Arc::new(Error::Timeout)), || async {
            released.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .await;
        assert!(matches!(r, Err(SmokeError::Launch(_))));
        assert_eq!(released.load(Ordering::SeqCst), 1);
    });

    crate::runtime_test!(release_failure_keeps_setup_error, {
        let r: Result<(), SmokeError> = release_on_error(Err(Arc::new(Error::Timeout)), || async {
            Err(Arc::new(Error::ReceiverClosed))
        })
        .await;
        assert!(matches!(r, Err(SmokeError::Launch(e)) if e.is_timeout()));
    });

    crate::runtime_test!(successful_setup_keeps_browser, {
        let released = AtomicUsize::new(0);
        let r = release_on_error(Ok(7), || async {
            released.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .await;
        assert_eq!(r.unwrap(), 7);
        assert_eq!(released.load(Ordering::SeqCst), 0);
    });
}
