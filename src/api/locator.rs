use crate::{
    api::Frame,
    imp::{core::ArcResult, utils::FrameState},
};

/// An element addressed by a selector, resolved each time it is used.
///
/// Locators are strict: waiting on a selector that matches several elements fails,
/// as `expect(locator)` does in the other Playwright clients.
#[derive(Clone, Debug, PartialEq)]
pub struct Locator {
    frame: Frame,
    selector: String,
}

impl Locator {
    pub(crate) fn new(frame: Frame, selector: String) -> Self { Self { frame, selector } }

    /// Waits until the element satisfies `state`. `timeout` is in milliseconds.
    pub async fn wait_for(&self, state: FrameState, timeout: Option<f64>) -> ArcResult<()> {
        let mut b = self
            .frame
            .wait_for_selector_builder(&self.selector)
            .strict(true)
            .state(state);
        if let Some(t) = timeout {
            b = b.timeout(t);
        }
        b.wait_for_selector().await
    }
}
