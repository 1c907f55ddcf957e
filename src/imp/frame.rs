use crate::imp::{core::*, prelude::*, utils::FrameState};

#[derive(Debug)]
pub(crate) struct Frame {
    channel: ChannelOwner,
}

impl Frame {
    pub(crate) const DEFAULT_TIMEOUT: f64 = 30_000.0;

    pub(crate) fn try_new(channel: ChannelOwner) -> Result<Self, Error> { Ok(Self { channel }) }

    pub(crate) async fn goto(&self, mut args: GotoArgs<'_>) -> ArcResult<()> {
        args.timeout = with_default(args.timeout);
        let _ = self.channel.send_message("goto", args).await?;
        Ok(())
    }

    pub(crate) async fn fill(&self, mut args: FillArgs<'_, '_>) -> ArcResult<()> {
        args.timeout = with_default(args.timeout);
        let _ = self.channel.send_message("fill", args).await?;
        Ok(())
    }

    pub(crate) async fn click(&self, mut args: ClickArgs<'_>) -> ArcResult<()> {
        args.timeout = with_default(args.timeout);
        let _ = self.channel.send_message("click", args).await?;
        Ok(())
    }

    pub(crate) async fn wait_for_selector(&self, mut args: WaitForSelectorArgs<'_>) -> ArcResult<()> {
        args.timeout = with_default(args.timeout);
        let _ = self.channel.send_message("waitForSelector", args).await?;
        Ok(())
    }
}

fn with_default(timeout: Option<f64>) -> Option<f64> {
    Some(timeout.unwrap_or(Frame::DEFAULT_TIMEOUT))
}

impl RemoteObject for Frame {
    fn channel(&self) -> &ChannelOwner { &self.channel }
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GotoArgs<'a> {
    url: &'a str,
    pub(crate) timeout: Option<f64>,
}

impl<'a> GotoArgs<'a> {
    pub(crate) fn new(url: &'a str) -> Self { Self { url, timeout: None } }
}

// `strict` is left unset: the driver acts on the first match.
#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FillArgs<'a, 'b> {
    selector: &'a str,
    value: &'b str,
    pub(crate) timeout: Option<f64>,
}

impl<'a, 'b> FillArgs<'a, 'b> {
    pub(crate) fn new(selector: &'a str, value: &'b str) -> Self {
        Self {
            selector,
            value,
            timeout: None,
        }
    }
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ClickArgs<'a> {
    selector: &'a str,
    pub(crate) timeout: Option<f64>,
}

impl<'a> ClickArgs<'a> {
    pub(crate) fn new(selector: &'a str) -> Self {
        Self {
            selector,
            timeout: None,
        }
    }
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WaitForSelectorArgs<'a> {
    selector: &'a str,
    pub(crate) strict: Option<bool>,
    pub(crate) state: Option<FrameState>,
    pub(crate) timeout: Option<f64>,
    pub(crate) omit_return_value: Option<bool>,
}

impl<'a> WaitForSelectorArgs<'a> {
    pub(crate) fn new(selector: &'a str) -> Self {
        Self {
            selector,
            strict: None,
            state: None,
            timeout: None,
            omit_return_value: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_acts_on_first_match() {
        let mut args = ClickArgs::new("button:has-text('Jogos')");
        args.timeout = with_default(args.timeout);
        assert_eq!(
            serde_json::to_value(&args).unwrap(),
            serde_json::json!({ "selector": "button:has-text('Jogos')", "timeout": 30000.0 })
        );
    }

    #[test]
    fn fill_acts_on_first_match() {
        let mut args = FillArgs::new("#username", "testuser");
        args.timeout = Some(1000.0);
        let v = serde_json::to_value(&args).unwrap();
        assert_eq!(v["value"], "testuser");
        assert!(v.get("strict").is_none());
    }

    #[test]
    fn wait_for_visible_wire_shape() {
        let mut args = WaitForSelectorArgs::new("#word-grid");
        args.state = Some(FrameState::Visible);
        args.timeout = Some(5000.0);
        args.strict = Some(true);
        assert_eq!(
            serde_json::to_value(&args).unwrap(),
            serde_json::json!({
                "selector": "#word-grid",
                "strict": true,
                "state": "visible",
                "timeout": 5000.0
            })
        );
    }
}
