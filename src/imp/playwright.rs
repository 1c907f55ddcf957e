use crate::imp::{browser_type::BrowserType, core::*, prelude::*};
use tokio::time::{timeout, Duration};

#[derive(Debug)]
pub(crate) struct Playwright {
    channel: ChannelOwner,
    chromium: Weak<BrowserType>,
}

impl Playwright {
    const INITIALIZE_TIMEOUT: Duration = Duration::from_secs(30);

    pub(crate) fn try_new(ctx: &Context, channel: ChannelOwner) -> Result<Self, Error> {
        let Initializer { chromium } = serde_json::from_value(channel.initializer.clone())?;
        let chromium = get_object!(ctx, &chromium.guid, BrowserType)?;
        Ok(Self { channel, chromium })
    }

    pub(crate) async fn wait_initial_object(conn: &Connection) -> Result<Weak<Self>, Error> {
        let rx = conn.send_initialize()?;
        let res = match timeout(Self::INITIALIZE_TIMEOUT, rx).await {
            Ok(res) => res.map_err(|_| Error::ReceiverClosed)?,
            Err(_) => return Err(Error::Timeout),
        };
        let body = res?.map_err(Error::ErrorResponded)?;
        let guid = guid_at(&body, "playwright")?;
        let ctx = upgrade(&conn.context())?;
        let ctx = ctx.lock().unwrap();
        get_object!(ctx, &guid, Playwright)
    }

    pub(crate) fn chromium(&self) -> Weak<BrowserType> { self.chromium.clone() }
}

impl RemoteObject for Playwright {
    fn channel(&self) -> &ChannelOwner { &self.channel }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Initializer {
    chromium: OnlyGuid,
}
