use crate::imp::{browser::Browser, core::*, prelude::*};

#[derive(Debug)]
pub(crate) struct BrowserType {
    channel: ChannelOwner,
}

impl BrowserType {
    // Installing a browser on first launch can be slow.
    const DEFAULT_LAUNCH_TIMEOUT: f64 = 180_000.0;

    pub(crate) fn try_new(channel: ChannelOwner) -> Result<Self, Error> { Ok(Self { channel }) }

    pub(crate) async fn launch(&self, mut args: LaunchArgs) -> ArcResult<Weak<Browser>> {
        args.timeout = Some(args.timeout.unwrap_or(Self::DEFAULT_LAUNCH_TIMEOUT));
        let res = self.channel.send_message("launch", args).await?;
        let guid = guid_at(&res, "browser")?;
        let b = get_object!(self.context()?.lock().unwrap(), &guid, Browser)?;
        Ok(b)
    }
}

impl RemoteObject for BrowserType {
    fn channel(&self) -> &ChannelOwner { &self.channel }
}

#[skip_serializing_none]
#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LaunchArgs {
    pub(crate) headless: Option<bool>,
    pub(crate) timeout: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_args_skip_unset() {
        let args = LaunchArgs {
            headless: Some(true),
            ..LaunchArgs::default()
        };
        assert_eq!(
            serde_json::to_value(&args).unwrap(),
            serde_json::json!({ "headless": true })
        );
    }
}
