//! Headless-browser smoke test for the games menu of a local web app.
//!
//! The test logs in at `http://localhost:3000`, opens the games menu and the
//! "Adivinhe a senha" word-guessing game, and writes screenshots of both screens
//! (or of the failure) to `verification/`.
//!
//! The browser is driven through a small client for the
//! [Playwright](https://playwright.dev) driver, embedded at build time.
//!
//! ```no_run
//! use wordle_smoke::{SmokeConfig, SmokeTest};
//!
//! # async fn run() -> Result<(), wordle_smoke::SmokeError> {
//! let report = SmokeTest::new(SmokeConfig::default()).run().await?;
//! assert!(report.is_success());
//! # Ok(())
//! # }
//! ```

#[macro_use]
pub mod api;
mod imp;
pub mod smoke;

pub use crate::imp::core::{Driver, Error, ErrorMessage};
pub use api::Playwright;
pub use smoke::{Credentials, Report, SmokeConfig, SmokeError, SmokeTest, Stage};

#[doc(hidden)]
#[macro_export]
macro_rules! runtime_test {
    ($name:ident, $main:expr) => {
        #[test]
        fn $name() {
            env_logger::builder().is_test(true).try_init().ok();
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .unwrap()
                .block_on(async { $main });
        }
    };
}
