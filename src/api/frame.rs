use crate::{
    api::Locator,
    imp::{
        core::*,
        frame::{ClickArgs, FillArgs, Frame as Impl, GotoArgs, WaitForSelectorArgs},
        prelude::*,
        utils::FrameState,
    },
};

/// A frame of a [`Page`](crate::api::Page). Only the main frame is exposed.
///
/// Actions wait for the target element to be actionable and fail with a `TimeoutError`
/// response once their timeout elapses. Timeouts are in milliseconds and default to `30000`.
#[derive(Debug, Clone)]
pub struct Frame {
    inner: Weak<Impl>,
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        let a = self.inner.upgrade();
        let b = other.inner.upgrade();
        a.and_then(|a| b.map(|b| (a, b)))
            .map(|(a, b)| a.guid() == b.guid())
            .unwrap_or_default()
    }
}

impl Frame {
    pub(crate) fn new(inner: Weak<Impl>) -> Self { Self { inner } }

    pub fn goto_builder<'a>(&self, url: &'a str) -> GotoBuilder<'a> {
        GotoBuilder::new(self.inner.clone(), url)
    }

    pub fn fill_builder<'a, 'b>(&self, selector: &'a str, value: &'b str) -> FillBuilder<'a, 'b> {
        FillBuilder::new(self.inner.clone(), selector, value)
    }

    pub fn click_builder<'a>(&self, selector: &'a str) -> ClickBuilder<'a> {
        ClickBuilder::new(self.inner.clone(), selector)
    }

    pub fn wait_for_selector_builder<'a>(&self, selector: &'a str) -> WaitForSelectorBuilder<'a> {
        WaitForSelectorBuilder::new(self.inner.clone(), selector)
    }

    pub fn locator(&self, selector: &str) -> Locator { Locator::new(self.clone(), selector.to_owned()) }
}

pub struct GotoBuilder<'a> {
    inner: Weak<Impl>,
    args: GotoArgs<'a>,
}

impl<'a> GotoBuilder<'a> {
    pub(crate) fn new(inner: Weak<Impl>, url: &'a str) -> Self {
        Self {
            inner,
            args: GotoArgs::new(url),
        }
    }

    /// Navigates and waits for the `load` event.
    pub async fn goto(self) -> ArcResult<()> {
        let Self { inner, args } = self;
        upgrade(&inner)?.goto(args).await
    }

    setter! {
        /// Maximum operation time in milliseconds.
        timeout: Option<f64>
    }
}

/// Fills the first element matching the selector, like `page.fill` in the other Playwright clients.
pub struct FillBuilder<'a, 'b> {
    inner: Weak<Impl>,
    args: FillArgs<'a, 'b>,
}

impl<'a, 'b> FillBuilder<'a, 'b> {
    pub(crate) fn new(inner: Weak<Impl>, selector: &'a str, value: &'b str) -> Self {
        Self {
            inner,
            args: FillArgs::new(selector, value),
        }
    }

    /// Waits for an editable element matching the selector, focuses it and replaces its value.
    pub async fn fill(self) -> ArcResult<()> {
        let Self { inner, args } = self;
        upgrade(&inner)?.fill(args).await
    }

    setter! {
        timeout: Option<f64>
    }
}

/// Clicks the first element matching the selector.
pub struct ClickBuilder<'a> {
    inner: Weak<Impl>,
    args: ClickArgs<'a>,
}

impl<'a> ClickBuilder<'a> {
    pub(crate) fn new(inner: Weak<Impl>, selector: &'a str) -> Self {
        Self {
            inner,
            args: ClickArgs::new(selector),
        }
    }

    /// Waits for the element to be visible, stable and enabled, scrolls it into view and clicks its center.
    pub async fn click(self) -> ArcResult<()> {
        let Self { inner, args } = self;
        upgrade(&inner)?.click(args).await
    }

    setter! {
        timeout: Option<f64>
    }
}

pub struct WaitForSelectorBuilder<'a> {
    inner: Weak<Impl>,
    args: WaitForSelectorArgs<'a>,
}

impl<'a> WaitForSelectorBuilder<'a> {
    pub(crate) fn new(inner: Weak<Impl>, selector: &'a str) -> Self {
        let mut args = WaitForSelectorArgs::new(selector);
        args.omit_return_value = Some(true);
        Self { inner, args }
    }

    /// Returns once the element satisfies `state` (`visible` by default).
    pub async fn wait_for_selector(self) -> ArcResult<()> {
        let Self { inner, args } = self;
        upgrade(&inner)?.wait_for_selector(args).await
    }

    setter! {
        /// Throw when the selector resolves to more than one element.
        strict: Option<bool>,
        state: Option<FrameState>,
        timeout: Option<f64>
    }
}
