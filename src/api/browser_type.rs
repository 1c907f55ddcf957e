use crate::{
    api::Browser,
    imp::{
        browser_type::{BrowserType as Impl, LaunchArgs},
        core::*,
        prelude::*,
    },
};

#[derive(Debug, Clone)]
pub struct BrowserType {
    inner: Weak<Impl>,
}

impl BrowserType {
    pub(crate) fn new(inner: Weak<Impl>) -> Self { Self { inner } }

    /// Builder for launching a new browser instance.
    pub fn launcher(&self) -> Launcher { Launcher::new(self.inner.clone()) }
}

pub struct Launcher {
    inner: Weak<Impl>,
    args: LaunchArgs,
}

impl Launcher {
    fn new(inner: Weak<Impl>) -> Self {
        Self {
            inner,
            args: LaunchArgs::default(),
        }
    }

    /// Launches the browser. The default timeout of three minutes covers a first-run browser download.
    pub async fn launch(self) -> ArcResult<Browser> {
        let Self { inner, args } = self;
        let r = upgrade(&inner)?.launch(args).await?;
        Ok(Browser::new(r))
    }

    setter! {
        /// Whether to run browser in headless mode. Defaults to `true`.
        headless: Option<bool>
    }
}
