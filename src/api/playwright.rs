use crate::{
    api::BrowserType,
    imp::{
        core::{Connection, Driver, Error},
        playwright::Playwright as Impl,
        prelude::*,
    },
};
use std::io;

/// Entry point. Owns the driver process; dropping it disposes every browser it launched.
///
/// ```no_run
/// use wordle_smoke::Playwright;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let playwright = Playwright::initialize().await?;
/// playwright.prepare()?;
/// let browser = playwright.chromium().launcher().headless(true).launch().await?;
/// let page = browser.new_page().await?;
/// page.goto_builder("http://localhost:3000").goto().await?;
/// browser.close().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Playwright {
    driver: Driver,
    _conn: Connection,
    inner: Weak<Impl>,
}

impl Playwright {
    /// Installs the embedded driver if needed and connects to it.
    pub async fn initialize() -> Result<Playwright, Error> {
        let driver = Driver::install()?;
        let conn = Connection::run(&driver.executable())?;
        let inner = Impl::wait_initial_object(&conn).await?;
        Ok(Self {
            driver,
            _conn: conn,
            inner,
        })
    }

    /// Installs Chromium for the driver. A no-op when it is already installed.
    pub fn prepare(&self) -> io::Result<()> { self.driver.install_browsers(&["chromium"]) }

    pub fn chromium(&self) -> BrowserType {
        let inner = self
            .inner
            .upgrade()
            .map(|p| p.chromium())
            .unwrap_or_default();
        BrowserType::new(inner)
    }
}
