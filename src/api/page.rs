use crate::{
    api::{
        frame::{ClickBuilder, FillBuilder, GotoBuilder},
        Frame, Locator,
    },
    imp::{
        core::*,
        page::{Page as Impl, ScreenshotArgs},
        prelude::*,
        utils::ScreenshotType,
    },
};

/// A single tab. Actions are forwarded to the main frame.
#[derive(Debug, Clone)]
pub struct Page {
    inner: Weak<Impl>,
    main_frame: Frame,
}

impl PartialEq for Page {
    fn eq(&self, other: &Self) -> bool {
        let a = self.inner.upgrade();
        let b = other.inner.upgrade();
        a.and_then(|a| b.map(|b| (a, b)))
            .map(|(a, b)| a.guid() == b.guid())
            .unwrap_or_default()
    }
}

impl Page {
    pub(crate) fn new(inner: Weak<Impl>) -> Self {
        let main_frame = Frame::new(
            inner
                .upgrade()
                .map(|i| i.main_frame())
                .unwrap_or_default(),
        );
        Self { inner, main_frame }
    }

    pub fn goto_builder<'a>(&self, url: &'a str) -> GotoBuilder<'a> {
        self.main_frame.goto_builder(url)
    }

    pub fn fill_builder<'a, 'b>(&self, selector: &'a str, value: &'b str) -> FillBuilder<'a, 'b> {
        self.main_frame.fill_builder(selector, value)
    }

    pub fn click_builder<'a>(&self, selector: &'a str) -> ClickBuilder<'a> {
        self.main_frame.click_builder(selector)
    }

    /// Locator resolving `selector` in the main frame.
    pub fn locator(&self, selector: &str) -> Locator { self.main_frame.locator(selector) }

    pub fn screenshot_builder(&self) -> ScreenshotBuilder { ScreenshotBuilder::new(self.inner.clone()) }
}

pub struct ScreenshotBuilder {
    inner: Weak<Impl>,
    args: ScreenshotArgs,
}

impl ScreenshotBuilder {
    fn new(inner: Weak<Impl>) -> Self {
        Self {
            inner,
            args: ScreenshotArgs::default(),
        }
    }

    /// Captures the visible viewport and returns the encoded image.
    pub async fn screenshot(self) -> ArcResult<Vec<u8>> {
        let Self { inner, args } = self;
        upgrade(&inner)?.screenshot(args).await
    }

    /// Specify screenshot type, `png` when unset.
    pub fn r#type(mut self, x: ScreenshotType) -> Self {
        self.args.r#type = Some(x);
        self
    }

    setter! {
        /// Maximum time in milliseconds. Defaults to `30000`.
        timeout: Option<f64>
    }
}
