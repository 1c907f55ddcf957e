use crate::imp::prelude::*;

/// State an element is waited for by [`Locator::wait_for`](crate::api::Locator::wait_for).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameState {
    Attached,
    Detached,
    Hidden,
    Visible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenshotType {
    Jpeg,
    Png,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names() {
        assert_eq!(serde_json::to_value(FrameState::Visible).unwrap(), "visible");
        assert_eq!(serde_json::to_value(FrameState::Hidden).unwrap(), "hidden");
        assert_eq!(serde_json::to_value(ScreenshotType::Png).unwrap(), "png");
    }
}
